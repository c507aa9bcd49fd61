//! Catalog
//!
//! Read-only reference data for costing: products by ingredient, the base unit
//! of each measurement type and the conversion table.

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    conversions::ConversionTable,
    products::{Product, ProductKey},
    recipes::Ingredient,
    units::{Unit, UomName, UomType},
};

/// Errors that can occur when adding products to a catalog.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// An offer is priced in a different currency to the catalog.
    #[error("offer from {supplier} for {product} is priced in {actual}, but catalog uses {expected}")]
    CurrencyMismatch {
        /// Product name
        product: String,

        /// Supplier name
        supplier: String,

        /// Catalog currency code
        expected: &'static str,

        /// Offer currency code
        actual: &'static str,
    },

    /// An offer has a negative price.
    #[error("offer from {supplier} for {product} has a negative price")]
    NegativePrice {
        /// Product name
        product: String,

        /// Supplier name
        supplier: String,
    },

    /// An offer's package has no amount.
    #[error("offer from {supplier} for {product} has an empty package")]
    EmptyPackage {
        /// Product name
        product: String,

        /// Supplier name
        supplier: String,
    },
}

/// Canonical unit for each measurement type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUnits {
    units: FxHashMap<UomType, UomName>,
}

impl BaseUnits {
    /// A table with no base units.
    pub fn empty() -> Self {
        Self {
            units: FxHashMap::default(),
        }
    }

    /// Set the base unit name for a measurement type.
    pub fn set(&mut self, uom_type: UomType, name: UomName) -> &mut Self {
        self.units.insert(uom_type, name);
        self
    }

    /// Look up the base unit for a measurement type.
    pub fn get(&self, uom_type: UomType) -> Option<Unit> {
        self.units
            .get(&uom_type)
            .map(|name| Unit::new(*name, uom_type))
    }
}

impl Default for BaseUnits {
    /// Grams for mass, millilitres for volume and whole for counts.
    fn default() -> Self {
        let mut units = Self::empty();

        units
            .set(UomType::Mass, UomName::Grams)
            .set(UomType::Volume, UomName::Millilitres)
            .set(UomType::Whole, UomName::Whole);

        units
    }
}

/// Catalog
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    currency: &'static Currency,
    products: SlotMap<ProductKey, Product<'a>>,
    by_ingredient: FxHashMap<Ingredient, SmallVec<[ProductKey; 4]>>,
    base_units: BaseUnits,
    conversions: ConversionTable,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`, with default base units
    /// and no conversions.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            currency,
            products: SlotMap::with_key(),
            by_ingredient: FxHashMap::default(),
            base_units: BaseUnits::default(),
            conversions: ConversionTable::new(),
        }
    }

    /// Replace the base-unit table.
    #[must_use]
    pub fn with_base_units(mut self, base_units: BaseUnits) -> Self {
        self.base_units = base_units;
        self
    }

    /// Replace the conversion table.
    #[must_use]
    pub fn with_conversions(mut self, conversions: ConversionTable) -> Self {
        self.conversions = conversions;
        self
    }

    /// Add a product.
    ///
    /// Products for the same ingredient are returned by
    /// [`products_for`](Self::products_for) in the order they were added.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CurrencyMismatch`]: an offer is not priced in the catalog currency.
    /// - [`CatalogError::NegativePrice`]: an offer has a negative price.
    /// - [`CatalogError::EmptyPackage`]: an offer's package amount is zero or negative.
    pub fn insert_product(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        for offer in &product.offers {
            let currency = offer.price.currency();

            if currency != self.currency {
                return Err(CatalogError::CurrencyMismatch {
                    product: product.name.clone(),
                    supplier: offer.supplier.clone(),
                    expected: self.currency.iso_alpha_code,
                    actual: currency.iso_alpha_code,
                });
            }

            if offer.price.amount().is_sign_negative() {
                return Err(CatalogError::NegativePrice {
                    product: product.name.clone(),
                    supplier: offer.supplier.clone(),
                });
            }

            if offer.package.amount() <= Decimal::ZERO {
                return Err(CatalogError::EmptyPackage {
                    product: product.name.clone(),
                    supplier: offer.supplier.clone(),
                });
            }
        }

        let ingredient = product.ingredient.clone();
        let key = self.products.insert(product);

        self.by_ingredient.entry(ingredient).or_default().push(key);

        Ok(key)
    }

    /// Get a product by key.
    pub fn product(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Products that can be used as `ingredient`, in insertion order.
    pub fn products_for(&self, ingredient: &Ingredient) -> impl Iterator<Item = &Product<'a>> {
        self.by_ingredient
            .get(ingredient)
            .map(SmallVec::as_slice)
            .unwrap_or_default()
            .iter()
            .filter_map(|key| self.products.get(*key))
    }

    /// Base unit for a measurement type.
    pub fn base_unit(&self, uom_type: UomType) -> Option<Unit> {
        self.base_units.get(uom_type)
    }

    /// The base-unit table.
    pub fn base_units(&self) -> &BaseUnits {
        &self.base_units
    }

    /// The conversion table.
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Currency every offer is priced in.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{AUD, USD},
    };
    use smallvec::smallvec;
    use testresult::TestResult;

    use crate::{products::SupplierOffer, units::UnitOfMeasure};

    use super::*;

    fn product(name: &str, ingredient: &str, price: Money<'static, Currency>) -> Product<'static> {
        Product {
            name: name.to_string(),
            ingredient: Ingredient::new(ingredient),
            offers: smallvec![SupplierOffer {
                supplier: "Corner Store".to_string(),
                price,
                package: UnitOfMeasure::new(Decimal::from(300), UomName::Millilitres, UomType::Volume),
            }],
            nutrient_facts: Vec::new(),
        }
    }

    #[test]
    fn default_base_units() {
        let units = BaseUnits::default();

        assert_eq!(
            units.get(UomType::Mass),
            Some(Unit::new(UomName::Grams, UomType::Mass))
        );
        assert_eq!(
            units.get(UomType::Volume),
            Some(Unit::new(UomName::Millilitres, UomType::Volume))
        );
        assert_eq!(
            units.get(UomType::Whole),
            Some(Unit::new(UomName::Whole, UomType::Whole))
        );
    }

    #[test]
    fn products_for_returns_insertion_order() -> TestResult {
        let mut catalog = Catalog::new(AUD);

        catalog.insert_product(product("Thickened Cream", "Cream", Money::from_minor(285, AUD)))?;
        catalog.insert_product(product("Sugar", "Sugar", Money::from_minor(120, AUD)))?;
        catalog.insert_product(product("Double Cream", "Cream", Money::from_minor(310, AUD)))?;

        let names: Vec<&str> = catalog
            .products_for(&Ingredient::new("Cream"))
            .map(|product| product.name.as_str())
            .collect();

        assert_eq!(names, vec!["Thickened Cream", "Double Cream"]);
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn products_for_unknown_ingredient_is_empty() {
        let catalog = Catalog::new(AUD);

        assert_eq!(catalog.products_for(&Ingredient::new("Saffron")).count(), 0);
        assert!(catalog.is_empty());
    }

    #[test]
    fn insert_rejects_other_currencies() {
        let mut catalog = Catalog::new(AUD);

        let result = catalog.insert_product(product("Cream", "Cream", Money::from_minor(285, USD)));

        assert_eq!(
            result,
            Err(CatalogError::CurrencyMismatch {
                product: "Cream".to_string(),
                supplier: "Corner Store".to_string(),
                expected: AUD.iso_alpha_code,
                actual: USD.iso_alpha_code,
            })
        );
        assert!(catalog.is_empty());
    }

    #[test]
    fn insert_rejects_negative_prices() {
        let mut catalog = Catalog::new(AUD);

        let result = catalog.insert_product(product("Cream", "Cream", Money::from_minor(-1, AUD)));

        assert!(matches!(result, Err(CatalogError::NegativePrice { .. })));
    }

    #[test]
    fn insert_rejects_empty_packages() {
        let mut catalog = Catalog::new(AUD);
        let mut cream = product("Cream", "Cream", Money::from_minor(285, AUD));

        for offer in &mut cream.offers {
            offer.package = UnitOfMeasure::new(Decimal::ZERO, UomName::Millilitres, UomType::Volume);
        }

        assert!(matches!(
            catalog.insert_product(cream),
            Err(CatalogError::EmptyPackage { .. })
        ));
    }
}
