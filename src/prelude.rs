//! Larder prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{BaseUnits, Catalog, CatalogError},
    conversions::{
        ConversionEdge, ConversionError, ConversionTable, DEFAULT_MAX_HOPS, UnitConverter,
    },
    evaluator::{CostError, IngredientCost, IngredientCostEvaluator},
    fixtures::{Fixture, FixtureError},
    nutrients::{NutrientError, NutrientFact, NutrientTotals},
    pricing::{BulkOffer, BulkPricingError, cheapest_bulk_price},
    products::{Product, ProductKey, SupplierOffer},
    recipes::{Ingredient, LineItem, Recipe},
    summary::{RecipeAggregator, RecipeSummary, SummaryError},
    units::{Unit, UnitError, UnitOfMeasure, UomName, UomType},
};
