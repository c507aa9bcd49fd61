//! Recipes

use std::fmt;

use serde::Deserialize;

use crate::units::UnitOfMeasure;

/// Name of an ingredient, shared by recipes and the products that supply it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct Ingredient(String);

impl Ingredient {
    /// Creates a new ingredient.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the ingredient name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ingredient of a recipe and the amount required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LineItem {
    /// Ingredient
    pub ingredient: Ingredient,

    /// Required amount
    #[serde(rename = "amount")]
    pub required: UnitOfMeasure,
}

impl LineItem {
    /// Creates a new line item.
    pub fn new(ingredient: Ingredient, required: UnitOfMeasure) -> Self {
        Self {
            ingredient,
            required,
        }
    }
}

/// Recipe
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    /// Recipe name
    pub name: String,

    /// Ingredients and their required amounts
    pub line_items: Vec<LineItem>,
}

impl Recipe {
    /// Creates a new recipe.
    pub fn new(name: impl Into<String>, line_items: impl Into<Vec<LineItem>>) -> Self {
        Self {
            name: name.into(),
            line_items: line_items.into(),
        }
    }
}
