//! Unit Fixtures

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::{
    catalog::BaseUnits,
    conversions::ConversionEdge,
    units::{UomName, UomType},
};

/// Wrapper for units in YAML
#[derive(Debug, Deserialize)]
pub struct UnitsFixture {
    /// Base unit per measurement type, replacing the defaults when present
    #[serde(default)]
    pub base_units: Option<BaseUnitsFixture>,

    /// Conversion edges, in definition order
    #[serde(default)]
    pub conversions: Vec<ConversionEdge>,
}

/// Base units from YAML fixtures (e.g. `volume: millilitres`)
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct BaseUnitsFixture(BTreeMap<UomType, UomName>);

impl From<BaseUnitsFixture> for BaseUnits {
    fn from(fixture: BaseUnitsFixture) -> Self {
        let mut units = BaseUnits::empty();

        for (uom_type, name) in fixture.0 {
            units.set(uom_type, name);
        }

        units
    }
}
