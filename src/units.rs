//! Units of measure

use std::fmt;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

/// Errors from arithmetic on quantities.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitError {
    /// Two quantities were summed without sharing a unit name and type.
    #[error("cannot sum {left} with {right}")]
    IncompatibleUnits {
        /// Unit of the left-hand quantity
        left: Unit,

        /// Unit of the right-hand quantity
        right: Unit,
    },

    /// The sum does not fit in a decimal.
    #[error("sum overflowed in {0}")]
    Overflow(Unit),
}

/// Name of a unit of measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UomName {
    /// Cups
    Cups,

    /// Tablespoons
    Tablespoons,

    /// Teaspoons
    Teaspoons,

    /// Millilitres
    #[serde(alias = "milliliters", alias = "ml")]
    Millilitres,

    /// Litres
    #[serde(alias = "liters", alias = "l")]
    Litres,

    /// Grams
    #[serde(alias = "g")]
    Grams,

    /// Kilograms
    #[serde(alias = "kilogram", alias = "kg")]
    Kilograms,

    /// Ounces
    #[serde(alias = "oz")]
    Ounces,

    /// Pounds
    #[serde(alias = "lb")]
    Pounds,

    /// Whole, countable things (eggs, lemons)
    Whole,
}

impl fmt::Display for UomName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UomName::Cups => "cups",
            UomName::Tablespoons => "tablespoons",
            UomName::Teaspoons => "teaspoons",
            UomName::Millilitres => "millilitres",
            UomName::Litres => "litres",
            UomName::Grams => "grams",
            UomName::Kilograms => "kilograms",
            UomName::Ounces => "ounces",
            UomName::Pounds => "pounds",
            UomName::Whole => "whole",
        };

        f.write_str(name)
    }
}

/// What a unit of measure measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UomType {
    /// Mass
    Mass,

    /// Volume
    Volume,

    /// Count
    Whole,
}

impl fmt::Display for UomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UomType::Mass => "mass",
            UomType::Volume => "volume",
            UomType::Whole => "whole",
        };

        f.write_str(name)
    }
}

/// A unit without an amount: the node type of the conversion graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
pub struct Unit {
    /// Unit name
    pub name: UomName,

    /// Measurement type
    #[serde(rename = "type")]
    pub uom_type: UomType,
}

impl Unit {
    /// Creates a new unit.
    pub const fn new(name: UomName, uom_type: UomType) -> Self {
        Self { name, uom_type }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.uom_type)
    }
}

/// An amount expressed in a unit.
///
/// Values are immutable: conversions and sums produce new instances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct UnitOfMeasure {
    amount: Decimal,
    name: UomName,
    #[serde(rename = "type")]
    uom_type: UomType,
}

impl UnitOfMeasure {
    /// Creates a new quantity.
    pub const fn new(amount: Decimal, name: UomName, uom_type: UomType) -> Self {
        Self {
            amount,
            name,
            uom_type,
        }
    }

    /// Creates a new quantity of the given unit.
    pub const fn of(amount: Decimal, unit: Unit) -> Self {
        Self::new(amount, unit.name, unit.uom_type)
    }

    /// Returns the amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Returns the unit name.
    pub fn name(&self) -> UomName {
        self.name
    }

    /// Returns the measurement type.
    pub fn uom_type(&self) -> UomType {
        self.uom_type
    }

    /// Returns the unit this quantity is expressed in.
    pub fn unit(&self) -> Unit {
        Unit::new(self.name, self.uom_type)
    }

    /// Returns this quantity scaled by `factor` and relabelled as `to`, or
    /// `None` if the amount overflows.
    pub(crate) fn scaled(&self, factor: Decimal, to: Unit) -> Option<Self> {
        self.amount
            .checked_mul(factor)
            .map(|amount| Self::of(amount, to))
    }

    /// Sums two quantities sharing the same unit.
    ///
    /// # Errors
    ///
    /// - [`UnitError::IncompatibleUnits`]: the unit names or types differ.
    /// - [`UnitError::Overflow`]: the total does not fit in a decimal.
    pub fn sum(&self, other: &UnitOfMeasure) -> Result<UnitOfMeasure, UnitError> {
        if self.unit() != other.unit() {
            return Err(UnitError::IncompatibleUnits {
                left: self.unit(),
                right: other.unit(),
            });
        }

        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::of(amount, self.unit()))
            .ok_or(UnitError::Overflow(self.unit()))
    }
}

impl fmt::Display for UnitOfMeasure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount.normalize(), self.name)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const GRAMS: Unit = Unit::new(UomName::Grams, UomType::Mass);
    const MILLILITRES: Unit = Unit::new(UomName::Millilitres, UomType::Volume);

    #[test]
    fn sum_adds_amounts_in_the_same_unit() -> TestResult {
        let a = UnitOfMeasure::of(Decimal::new(125, 1), GRAMS);
        let b = UnitOfMeasure::of(Decimal::from(3), GRAMS);

        let total = a.sum(&b)?;

        assert_eq!(total, UnitOfMeasure::of(Decimal::new(155, 1), GRAMS));

        Ok(())
    }

    #[test]
    fn sum_rejects_mismatched_units() {
        let a = UnitOfMeasure::of(Decimal::ONE, GRAMS);
        let b = UnitOfMeasure::of(Decimal::ONE, MILLILITRES);

        assert_eq!(
            a.sum(&b),
            Err(UnitError::IncompatibleUnits {
                left: GRAMS,
                right: MILLILITRES,
            })
        );
    }

    #[test]
    fn sum_rejects_same_name_with_different_type() {
        let weird = Unit::new(UomName::Grams, UomType::Volume);
        let a = UnitOfMeasure::of(Decimal::ONE, GRAMS);
        let b = UnitOfMeasure::of(Decimal::ONE, weird);

        assert!(matches!(
            a.sum(&b),
            Err(UnitError::IncompatibleUnits { .. })
        ));
    }

    #[test]
    fn sum_overflow_is_an_error() {
        let a = UnitOfMeasure::of(Decimal::MAX, GRAMS);
        let b = UnitOfMeasure::of(Decimal::ONE, GRAMS);

        assert_eq!(a.sum(&b), Err(UnitError::Overflow(GRAMS)));
    }

    #[test]
    fn scaled_overflow_is_none() {
        let grams = UnitOfMeasure::of(Decimal::MAX, GRAMS);

        assert_eq!(grams.scaled(Decimal::TEN, GRAMS), None);
    }

    #[test]
    fn scaled_produces_new_value() -> TestResult {
        let cups = UnitOfMeasure::new(Decimal::TWO, UomName::Cups, UomType::Volume);

        let millilitres = cups
            .scaled(Decimal::new(236_588, 3), MILLILITRES)
            .ok_or("overflow")?;

        assert_eq!(cups.amount(), Decimal::TWO);
        assert_eq!(millilitres.amount(), Decimal::new(473_176, 3));
        assert_eq!(millilitres.unit(), MILLILITRES);

        Ok(())
    }

    #[test]
    fn deserializes_from_yaml() -> TestResult {
        let uom: UnitOfMeasure =
            serde_norway::from_str("{ amount: 236.588, name: ml, type: volume }")?;

        assert_eq!(uom, UnitOfMeasure::of(Decimal::new(236_588, 3), MILLILITRES));

        Ok(())
    }

    #[test]
    fn display_drops_trailing_zeros() {
        let uom = UnitOfMeasure::of(Decimal::new(2500, 2), GRAMS);

        assert_eq!(uom.to_string(), "25 grams");
    }
}
