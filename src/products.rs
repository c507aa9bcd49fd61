//! Products

use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use smallvec::SmallVec;

use crate::{nutrients::NutrientFact, recipes::Ingredient, units::UnitOfMeasure};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// One supplier's price for one package size of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct SupplierOffer<'a> {
    /// Supplier name
    pub supplier: String,

    /// Price of one package
    pub price: Money<'a, Currency>,

    /// Size of one package
    pub package: UnitOfMeasure,
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    /// Product name
    pub name: String,

    /// Ingredient this product can be used as
    pub ingredient: Ingredient,

    /// Supplier offers for this product
    pub offers: SmallVec<[SupplierOffer<'a>; 4]>,

    /// Nutrient facts, shared by every offer of the product
    pub nutrient_facts: Vec<NutrientFact>,
}
