//! Larder
//!
//! Larder works out the cheapest way to buy the ingredients of a recipe from a
//! catalog of supplier offers, and the nutrient totals of the products chosen.

pub mod catalog;
pub mod config;
pub mod conversions;
pub mod evaluator;
pub mod fixtures;
pub mod nutrients;
pub mod observability;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod recipes;
pub mod summary;
pub mod units;
