//! Recipe summaries
//!
//! Folds the cheapest cost and nutrient facts of every line item of a recipe
//! into a [`RecipeSummary`].

use std::collections::BTreeMap;

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    evaluator::{CostError, IngredientCostEvaluator},
    nutrients::{NutrientError, NutrientFact, NutrientTotals},
    recipes::{Ingredient, LineItem, Recipe},
    units::UnitError,
};

/// Errors that can occur while summarising recipes.
#[derive(Debug, Error)]
pub enum SummaryError {
    /// A line item could not be costed.
    #[error("failed to cost {ingredient} in {recipe}: {source}")]
    Cost {
        /// Recipe name
        recipe: String,

        /// Ingredient that failed
        ingredient: Ingredient,

        /// The underlying cost error
        source: CostError,
    },

    /// A nutrient fact could not be converted into base units.
    #[error("failed to normalise nutrients of {ingredient} in {recipe}: {source}")]
    Nutrient {
        /// Recipe name
        recipe: String,

        /// Ingredient whose nutrient facts failed
        ingredient: Ingredient,

        /// The underlying nutrient error
        source: NutrientError,
    },

    /// Nutrient quantities could not be summed.
    #[error(transparent)]
    Units(#[from] UnitError),

    /// Money arithmetic error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Cheapest cost and accumulated nutrients of a recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSummary<'a> {
    cheapest_cost: Money<'a, Currency>,
    nutrients_at_cheapest_cost: NutrientTotals,
}

impl<'a> RecipeSummary<'a> {
    /// A summary with zero cost and no nutrients.
    pub fn empty(currency: &'a Currency) -> Self {
        Self {
            cheapest_cost: Money::from_minor(0, currency),
            nutrients_at_cheapest_cost: NutrientTotals::new(),
        }
    }

    /// Total of the cheapest cost of every line item.
    pub fn cheapest_cost(&self) -> Money<'a, Currency> {
        self.cheapest_cost
    }

    /// Nutrient totals, keyed by nutrient name in lexicographic order.
    pub fn nutrients_at_cheapest_cost(&self) -> &NutrientTotals {
        &self.nutrients_at_cheapest_cost
    }

    /// Returns the summary with one more line item folded in.
    ///
    /// `facts` must already be expressed in base units.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::Money`]: `cost` is in a different currency.
    /// - [`SummaryError::Units`]: a fact's quantity does not share a unit with the
    ///   accumulated quantity of the same nutrient.
    pub fn absorb(
        self,
        cost: Money<'a, Currency>,
        facts: impl IntoIterator<Item = NutrientFact>,
    ) -> Result<Self, SummaryError> {
        let cheapest_cost = self.cheapest_cost.add(cost)?;
        let nutrients_at_cheapest_cost = facts
            .into_iter()
            .try_fold(self.nutrients_at_cheapest_cost, NutrientTotals::merge)?;

        Ok(Self {
            cheapest_cost,
            nutrients_at_cheapest_cost,
        })
    }
}

/// Summarises recipes against a catalog.
#[derive(Debug, Clone, Copy)]
pub struct RecipeAggregator<'c, 'a> {
    evaluator: IngredientCostEvaluator<'c, 'a>,
}

impl<'c, 'a> RecipeAggregator<'c, 'a> {
    /// Create an aggregator over `catalog` with default settings.
    pub fn new(catalog: &'c Catalog<'a>) -> Self {
        Self::with_evaluator(IngredientCostEvaluator::new(catalog))
    }

    /// Create an aggregator using a configured evaluator.
    pub fn with_evaluator(evaluator: IngredientCostEvaluator<'c, 'a>) -> Self {
        Self { evaluator }
    }

    /// Summarise every recipe, keyed by recipe name.
    ///
    /// A recipe sharing a name with an earlier one replaces it.
    ///
    /// # Errors
    ///
    /// Returns the first [`SummaryError`] raised by any recipe.
    pub fn summarize(
        &self,
        recipes: &[Recipe],
    ) -> Result<BTreeMap<String, RecipeSummary<'a>>, SummaryError> {
        recipes
            .iter()
            .try_fold(BTreeMap::new(), |mut summaries, recipe| {
                summaries.insert(recipe.name.clone(), self.summarize_recipe(recipe)?);

                Ok::<_, SummaryError>(summaries)
            })
    }

    /// Summarise a single recipe.
    ///
    /// # Errors
    ///
    /// - [`SummaryError::Cost`]: a line item has no evaluable offer, or
    ///   whole-package pricing failed.
    /// - [`SummaryError::Nutrient`]: a nutrient fact cannot be converted into
    ///   base units.
    /// - [`SummaryError::Units`]: nutrient quantities do not share a unit.
    /// - [`SummaryError::Money`]: money arithmetic failed.
    pub fn summarize_recipe(&self, recipe: &Recipe) -> Result<RecipeSummary<'a>, SummaryError> {
        let currency = self.evaluator.catalog().currency();

        let summary = recipe
            .line_items
            .iter()
            .try_fold(RecipeSummary::empty(currency), |summary, line_item| {
                self.absorb_line_item(summary, recipe, line_item)
            })?;

        debug!(
            recipe = %recipe.name,
            cost = %summary.cheapest_cost(),
            nutrients = summary.nutrients_at_cheapest_cost().len(),
            "summarised recipe"
        );

        Ok(summary)
    }

    fn absorb_line_item(
        &self,
        summary: RecipeSummary<'a>,
        recipe: &Recipe,
        line_item: &LineItem,
    ) -> Result<RecipeSummary<'a>, SummaryError> {
        let catalog = self.evaluator.catalog();

        let cost = self
            .evaluator
            .cheapest_cost(&line_item.ingredient, &line_item.required)
            .map_err(|source| SummaryError::Cost {
                recipe: recipe.name.clone(),
                ingredient: line_item.ingredient.clone(),
                source,
            })?;

        let facts = cost
            .nutrient_facts
            .iter()
            .map(|fact| fact.in_base_units(self.evaluator.converter(), catalog.base_units()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SummaryError::Nutrient {
                recipe: recipe.name.clone(),
                ingredient: line_item.ingredient.clone(),
                source,
            })?;

        summary.absorb(Money::from_decimal(cost.cost, catalog.currency()), facts)
    }
}
