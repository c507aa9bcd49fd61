//! Unit converter

use tracing::trace;

use crate::{
    conversions::{ConversionTable, error::ConversionError},
    units::{Unit, UnitOfMeasure},
};

/// Default number of edges a conversion may traverse (one intermediate unit).
pub const DEFAULT_MAX_HOPS: usize = 2;

/// Resolves quantities between units using a [`ConversionTable`].
///
/// A direct edge is preferred. Otherwise the quantity is moved along the
/// default edge of its current unit and resolution continues from there,
/// until the target is reached or the hop limit runs out.
#[derive(Debug, Clone, Copy)]
pub struct UnitConverter<'t> {
    table: &'t ConversionTable,
    max_hops: usize,
}

impl<'t> UnitConverter<'t> {
    /// Create a converter over `table` with the default hop limit.
    pub fn new(table: &'t ConversionTable) -> Self {
        Self {
            table,
            max_hops: DEFAULT_MAX_HOPS,
        }
    }

    /// Set the maximum number of edges a single conversion may traverse.
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.max_hops = max_hops;
        self
    }

    /// Maximum number of edges a single conversion may traverse.
    pub fn max_hops(&self) -> usize {
        self.max_hops
    }

    /// The table conversions are resolved against.
    pub fn table(&self) -> &'t ConversionTable {
        self.table
    }

    /// Convert `from` into the `to` unit.
    ///
    /// Converting into the unit a quantity is already expressed in returns it
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`ConversionError::NotFound`]: no edge leaves a unit on the way, or the
    ///   target is not reached within the hop limit.
    /// - [`ConversionError::Overflow`]: a converted amount does not fit in a decimal.
    pub fn convert(&self, from: &UnitOfMeasure, to: Unit) -> Result<UnitOfMeasure, ConversionError> {
        self.resolve(*from, to, self.max_hops)?
            .ok_or(ConversionError::NotFound {
                from: from.unit(),
                to,
            })
    }

    fn resolve(
        &self,
        from: UnitOfMeasure,
        to: Unit,
        hops_left: usize,
    ) -> Result<Option<UnitOfMeasure>, ConversionError> {
        if from.unit() == to {
            return Ok(Some(from));
        }

        let Some(hops_left) = hops_left.checked_sub(1) else {
            return Ok(None);
        };

        let (factor, next) = match self.table.direct(from.unit(), to) {
            Some(factor) => (factor, to),
            None => match self.table.default_edge(from.unit()) {
                Some(via) => {
                    trace!(from = %from.unit(), via = %via.to, %to, "converting through intermediate unit");

                    (via.factor, via.to)
                }
                None => return Ok(None),
            },
        };

        let scaled = from.scaled(factor, next).ok_or(ConversionError::Overflow {
            from: from.unit(),
            to: next,
        })?;

        self.resolve(scaled, to, hops_left)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        conversions::ConversionEdge,
        units::{UomName, UomType},
    };

    use super::*;

    const CUPS: Unit = Unit::new(UomName::Cups, UomType::Volume);
    const TABLESPOONS: Unit = Unit::new(UomName::Tablespoons, UomType::Volume);
    const MILLILITRES: Unit = Unit::new(UomName::Millilitres, UomType::Volume);
    const LITRES: Unit = Unit::new(UomName::Litres, UomType::Volume);
    const GRAMS: Unit = Unit::new(UomName::Grams, UomType::Mass);
    const KILOGRAMS: Unit = Unit::new(UomName::Kilograms, UomType::Mass);
    const POUNDS: Unit = Unit::new(UomName::Pounds, UomType::Mass);

    fn table() -> ConversionTable {
        [
            ConversionEdge::new(CUPS, MILLILITRES, Decimal::new(250, 0)),
            ConversionEdge::new(TABLESPOONS, CUPS, Decimal::new(625, 4)),
            ConversionEdge::new(MILLILITRES, LITRES, Decimal::new(1, 3)),
            ConversionEdge::new(POUNDS, GRAMS, Decimal::new(453_592, 3)),
            ConversionEdge::new(GRAMS, KILOGRAMS, Decimal::new(1, 3)),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn same_unit_is_identity() -> TestResult {
        let table = ConversionTable::new();
        let converter = UnitConverter::new(&table);
        let quantity = UnitOfMeasure::of(Decimal::new(300, 0), MILLILITRES);

        assert_eq!(converter.convert(&quantity, MILLILITRES)?, quantity);

        Ok(())
    }

    #[test]
    fn direct_edge_multiplies_amount() -> TestResult {
        let table = table();
        let converter = UnitConverter::new(&table);

        let converted = converter.convert(&UnitOfMeasure::of(Decimal::TWO, CUPS), MILLILITRES)?;

        assert_eq!(converted, UnitOfMeasure::of(Decimal::new(500, 0), MILLILITRES));

        Ok(())
    }

    #[test]
    fn missing_direct_edge_goes_through_default_edge() -> TestResult {
        let table = table();
        let converter = UnitConverter::new(&table);

        let converted = converter.convert(&UnitOfMeasure::of(Decimal::TWO, CUPS), LITRES)?;

        assert_eq!(converted, UnitOfMeasure::of(Decimal::new(5, 1), LITRES));

        Ok(())
    }

    #[test]
    fn mass_conversions_use_their_own_edges() -> TestResult {
        let table = table();
        let converter = UnitConverter::new(&table);

        let converted = converter.convert(&UnitOfMeasure::of(Decimal::ONE, POUNDS), KILOGRAMS)?;

        assert_eq!(converted.amount(), Decimal::new(453_592, 6));
        assert_eq!(converted.unit(), KILOGRAMS);

        Ok(())
    }

    #[test]
    fn three_edge_path_exceeds_default_hop_limit() {
        let table = table();
        let converter = UnitConverter::new(&table);

        let result = converter.convert(&UnitOfMeasure::of(Decimal::new(16, 0), TABLESPOONS), LITRES);

        assert_eq!(
            result,
            Err(ConversionError::NotFound {
                from: TABLESPOONS,
                to: LITRES,
            })
        );
    }

    #[test]
    fn raised_hop_limit_allows_longer_paths() -> TestResult {
        let table = table();
        let converter = UnitConverter::new(&table).with_max_hops(3);

        let converted =
            converter.convert(&UnitOfMeasure::of(Decimal::new(16, 0), TABLESPOONS), LITRES)?;

        assert_eq!(converted, UnitOfMeasure::of(Decimal::new(25, 2), LITRES));

        Ok(())
    }

    #[test]
    fn no_outbound_edge_is_not_found() {
        let table = table();
        let converter = UnitConverter::new(&table);

        let result = converter.convert(&UnitOfMeasure::of(Decimal::ONE, LITRES), CUPS);

        assert_eq!(
            result,
            Err(ConversionError::NotFound {
                from: LITRES,
                to: CUPS,
            })
        );
    }

    #[test]
    fn cyclic_default_edges_terminate() {
        let table: ConversionTable = [
            ConversionEdge::new(CUPS, MILLILITRES, Decimal::new(250, 0)),
            ConversionEdge::new(MILLILITRES, CUPS, Decimal::new(4, 3)),
        ]
        .into_iter()
        .collect();

        let converter = UnitConverter::new(&table).with_max_hops(16);

        let result = converter.convert(&UnitOfMeasure::of(Decimal::ONE, CUPS), GRAMS);

        assert!(matches!(result, Err(ConversionError::NotFound { .. })));
    }

    #[test]
    fn zero_hops_only_allows_identity() -> TestResult {
        let table = table();
        let converter = UnitConverter::new(&table).with_max_hops(0);
        let cups = UnitOfMeasure::of(Decimal::ONE, CUPS);

        assert_eq!(converter.convert(&cups, CUPS)?, cups);
        assert!(converter.convert(&cups, MILLILITRES).is_err());

        Ok(())
    }

    #[test]
    fn overflowing_amount_is_an_error() {
        let table = table();
        let converter = UnitConverter::new(&table);
        let huge = UnitOfMeasure::of(Decimal::MAX / Decimal::TEN, POUNDS);

        assert_eq!(
            converter.convert(&huge, GRAMS),
            Err(ConversionError::Overflow {
                from: POUNDS,
                to: GRAMS,
            })
        );
    }
}
