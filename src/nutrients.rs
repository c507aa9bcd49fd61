//! Nutrients

use std::collections::{BTreeMap, btree_map};

use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::BaseUnits,
    conversions::{ConversionError, UnitConverter},
    units::{UnitError, UnitOfMeasure, UomType},
};

/// Errors that can occur while normalising or accumulating nutrient facts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NutrientError {
    /// The base-unit table has no entry for a measurement type.
    #[error("no base unit defined for {0}")]
    MissingBaseUnit(UomType),

    /// A nutrient quantity could not be converted into its base unit.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// Accumulated quantities did not share a unit.
    #[error(transparent)]
    Units(#[from] UnitError),
}

/// A nutrient quantity per reference amount of a product (e.g. 3.3g protein per 100g).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NutrientFact {
    /// Nutrient name
    #[serde(rename = "name")]
    pub nutrient_name: String,

    /// Quantity of the nutrient
    #[serde(rename = "amount")]
    pub quantity_amount: UnitOfMeasure,

    /// Reference amount of product the quantity applies to
    #[serde(rename = "per")]
    pub quantity_per: UnitOfMeasure,
}

impl NutrientFact {
    /// Creates a new nutrient fact.
    pub fn new(
        nutrient_name: impl Into<String>,
        quantity_amount: UnitOfMeasure,
        quantity_per: UnitOfMeasure,
    ) -> Self {
        Self {
            nutrient_name: nutrient_name.into(),
            quantity_amount,
            quantity_per,
        }
    }

    /// Returns this fact with both quantities converted into the base unit of
    /// their measurement type.
    ///
    /// # Errors
    ///
    /// - [`NutrientError::MissingBaseUnit`]: no base unit is defined for a quantity's type.
    /// - [`NutrientError::Conversion`]: a quantity cannot be converted into its base unit.
    pub fn in_base_units(
        &self,
        converter: &UnitConverter<'_>,
        base_units: &BaseUnits,
    ) -> Result<NutrientFact, NutrientError> {
        let to_base = |quantity: &UnitOfMeasure| -> Result<UnitOfMeasure, NutrientError> {
            let base = base_units
                .get(quantity.uom_type())
                .ok_or(NutrientError::MissingBaseUnit(quantity.uom_type()))?;

            Ok(converter.convert(quantity, base)?)
        };

        Ok(NutrientFact {
            nutrient_name: self.nutrient_name.clone(),
            quantity_amount: to_base(&self.quantity_amount)?,
            quantity_per: to_base(&self.quantity_per)?,
        })
    }
}

/// Accumulated nutrient facts keyed by nutrient name, in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NutrientTotals {
    facts: BTreeMap<String, NutrientFact>,
}

impl NutrientTotals {
    /// Create empty totals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a fact (already in base units) into the totals.
    ///
    /// The first fact for a nutrient is stored as-is. Later facts add their
    /// quantity to the stored quantity, keeping the stored reference amount.
    ///
    /// # Errors
    ///
    /// Returns [`UnitError::IncompatibleUnits`] if the quantities do not share a unit,
    /// or [`UnitError::Overflow`] if the total does not fit.
    pub fn merge(mut self, fact: NutrientFact) -> Result<Self, UnitError> {
        match self.facts.entry(fact.nutrient_name.clone()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(fact);
            }
            btree_map::Entry::Occupied(mut entry) => {
                let total = entry.get().quantity_amount.sum(&fact.quantity_amount)?;

                entry.get_mut().quantity_amount = total;
            }
        }

        Ok(self)
    }

    /// Get the accumulated fact for a nutrient.
    pub fn get(&self, nutrient_name: &str) -> Option<&NutrientFact> {
        self.facts.get(nutrient_name)
    }

    /// Iterate over accumulated facts in nutrient name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &NutrientFact)> {
        self.facts.iter().map(|(name, fact)| (name.as_str(), fact))
    }

    /// Number of distinct nutrients.
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    /// Whether no nutrients have been accumulated.
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }

    /// Consume the totals, returning the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, NutrientFact> {
        self.facts
    }
}
