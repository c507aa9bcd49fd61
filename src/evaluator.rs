//! Ingredient cost evaluation
//!
//! Finds the cheapest way to buy the amount of an ingredient a recipe needs,
//! across every supplier offer of every product in the catalog.

use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    conversions::{ConversionError, UnitConverter},
    nutrients::NutrientFact,
    pricing::{BulkOffer, BulkPricingError, cheapest_bulk_price},
    products::{Product, SupplierOffer},
    recipes::Ingredient,
    units::{Unit, UnitOfMeasure, UomName, UomType},
};

/// Base unit of goods that can only be bought in whole packages.
pub const WHOLE_PACKAGE_UNIT: Unit = Unit::new(UomName::Millilitres, UomType::Volume);

/// Errors that can occur while costing an ingredient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CostError {
    /// No offer for the ingredient could be evaluated.
    #[error("no offer for {0} could be evaluated")]
    NoCheapestCostFound(Ingredient),

    /// The required amount was negative.
    #[error("required amount must not be negative: {0}")]
    InvalidRequirement(Decimal),

    /// Whole-package pricing failed.
    #[error(transparent)]
    BulkPricing(#[from] BulkPricingError),
}

/// Reasons a single offer is left out of the comparison.
#[derive(Debug, Error)]
enum OfferError {
    #[error("no base unit defined for {0}")]
    MissingBaseUnit(UomType),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error("package converts to zero base units")]
    EmptyPackage,

    #[error("linear cost overflowed")]
    Overflow,
}

/// An offer normalised to base units.
#[derive(Debug)]
struct OfferEvaluation {
    required: UnitOfMeasure,
    linear_cost: Decimal,
    bulk: BulkOffer,
}

/// The cheapest cost found for an ingredient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientCost<'c> {
    /// Cheapest cost, in the catalog currency
    pub cost: Decimal,

    /// Name of the product with the cheapest linear cost
    pub product: &'c str,

    /// Nutrient facts of the product with the cheapest linear cost.
    ///
    /// These are reported even when whole-package pricing chose a different
    /// product's package for `cost`.
    pub nutrient_facts: &'c [NutrientFact],

    /// Whether `cost` came from whole-package pricing
    pub whole_packages: bool,
}

/// Evaluates ingredient costs against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct IngredientCostEvaluator<'c, 'a> {
    catalog: &'c Catalog<'a>,
    converter: UnitConverter<'c>,
}

impl<'c, 'a> IngredientCostEvaluator<'c, 'a> {
    /// Create an evaluator using the catalog's conversion table.
    pub fn new(catalog: &'c Catalog<'a>) -> Self {
        Self {
            catalog,
            converter: UnitConverter::new(catalog.conversions()),
        }
    }

    /// Set the hop limit used for unit conversions.
    #[must_use]
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.converter = self.converter.with_max_hops(max_hops);
        self
    }

    /// The catalog offers are read from.
    pub fn catalog(&self) -> &'c Catalog<'a> {
        self.catalog
    }

    /// The converter used to normalise quantities.
    pub fn converter(&self) -> &UnitConverter<'c> {
        &self.converter
    }

    /// Find the cheapest cost of buying `required` of `ingredient`.
    ///
    /// Every offer is normalised to the base unit of its package type and
    /// priced linearly. If any evaluated offer is measured in
    /// [`WHOLE_PACKAGE_UNIT`], the linear minimum is replaced by the cheapest
    /// whole-package spend across all evaluated offers. Offers that cannot be
    /// normalised are skipped.
    ///
    /// # Errors
    ///
    /// - [`CostError::InvalidRequirement`]: `required` has a negative amount.
    /// - [`CostError::NoCheapestCostFound`]: no offer could be evaluated.
    /// - [`CostError::BulkPricing`]: whole-package pricing rejected the volumes.
    pub fn cheapest_cost(
        &self,
        ingredient: &Ingredient,
        required: &UnitOfMeasure,
    ) -> Result<IngredientCost<'c>, CostError> {
        if required.amount() < Decimal::ZERO {
            return Err(CostError::InvalidRequirement(required.amount()));
        }

        let mut cheapest: Option<(Decimal, &'c Product<'a>)> = None;
        let mut bulk_offers: SmallVec<[BulkOffer; 8]> = SmallVec::new();
        let mut whole_package_volume: Option<Decimal> = None;

        let products = self.catalog.products_for(ingredient);

        for product in products {
            for offer in &product.offers {
                let evaluation = match self.evaluate_offer(offer, required) {
                    Ok(evaluation) => evaluation,
                    Err(err) => {
                        debug!(
                            %ingredient,
                            product = %product.name,
                            supplier = %offer.supplier,
                            error = %err,
                            "skipping offer"
                        );

                        continue;
                    }
                };

                if evaluation.required.unit() == WHOLE_PACKAGE_UNIT {
                    whole_package_volume = Some(evaluation.required.amount());
                }

                if cheapest.is_none_or(|(cost, _)| evaluation.linear_cost < cost) {
                    cheapest = Some((evaluation.linear_cost, product));
                }

                bulk_offers.push(evaluation.bulk);
            }
        }

        let Some((linear_cost, product)) = cheapest else {
            return Err(CostError::NoCheapestCostFound(ingredient.clone()));
        };

        let cost = match whole_package_volume {
            Some(volume) => {
                let cost = cheapest_bulk_price(volume, &bulk_offers)?;

                debug!(
                    %ingredient,
                    %volume,
                    %linear_cost,
                    %cost,
                    "whole packages required"
                );

                cost
            }
            None => linear_cost,
        };

        Ok(IngredientCost {
            cost,
            product: &product.name,
            nutrient_facts: &product.nutrient_facts,
            whole_packages: whole_package_volume.is_some(),
        })
    }

    fn evaluate_offer(
        &self,
        offer: &SupplierOffer<'_>,
        required: &UnitOfMeasure,
    ) -> Result<OfferEvaluation, OfferError> {
        let package_type = offer.package.uom_type();
        let base = self
            .catalog
            .base_unit(package_type)
            .ok_or(OfferError::MissingBaseUnit(package_type))?;

        let required = self.converter.convert(required, base)?;
        let package = self.converter.convert(&offer.package, base)?;

        let price = *offer.price.amount();
        let cost_per_base_unit = price
            .checked_div(package.amount())
            .ok_or(OfferError::EmptyPackage)?;

        let linear_cost = cost_per_base_unit
            .checked_mul(required.amount())
            .ok_or(OfferError::Overflow)?;

        Ok(OfferEvaluation {
            required,
            linear_cost,
            bulk: BulkOffer::new(price, package.amount()),
        })
    }
}
