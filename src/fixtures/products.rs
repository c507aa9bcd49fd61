//! Product Fixtures

use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    nutrients::NutrientFact,
    products::{Product, SupplierOffer},
    recipes::Ingredient,
    units::UnitOfMeasure,
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct ProductsFixture {
    /// Products in file order
    pub products: Vec<ProductFixture>,
}

/// Product from YAML fixtures
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product name
    pub name: String,

    /// Ingredient the product can be used as
    pub ingredient: Ingredient,

    /// Nutrient facts
    #[serde(default)]
    pub nutrients: Vec<NutrientFact>,

    /// Supplier offers
    pub offers: Vec<OfferFixture>,
}

/// Supplier offer from YAML fixtures
#[derive(Debug, Deserialize)]
pub struct OfferFixture {
    /// Supplier name
    pub supplier: String,

    /// Price string (e.g., "2.85 AUD")
    pub price: String,

    /// Package size
    pub package: UnitOfMeasure,
}

/// Parse price string like "2.85 AUD" into an amount and currency
///
/// # Errors
///
/// Returns an error if the string is not `<amount> <code>` or the currency is unknown.
pub fn parse_price(s: &str) -> Result<(Decimal, &'static Currency), FixtureError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, code] = parts.as_slice() else {
        return Err(FixtureError::InvalidPrice(s.to_string()));
    };

    let amount: Decimal = amount
        .parse()
        .map_err(|_err| FixtureError::InvalidPrice(s.to_string()))?;

    let currency = match *code {
        "AUD" => iso::AUD,
        "EUR" => iso::EUR,
        "GBP" => iso::GBP,
        "USD" => iso::USD,
        _ => return Err(FixtureError::UnknownCurrency((*code).to_string())),
    };

    Ok((amount, currency))
}

impl TryFrom<OfferFixture> for SupplierOffer<'_> {
    type Error = FixtureError;

    fn try_from(fixture: OfferFixture) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&fixture.price)?;

        Ok(SupplierOffer {
            supplier: fixture.supplier,
            price: Money::from_decimal(amount, currency),
            package: fixture.package,
        })
    }
}

impl TryFrom<ProductFixture> for Product<'_> {
    type Error = FixtureError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let offers = fixture
            .offers
            .into_iter()
            .map(SupplierOffer::try_from)
            .collect::<Result<_, _>>()?;

        Ok(Product {
            name: fixture.name,
            ingredient: fixture.ingredient,
            offers,
            nutrient_facts: fixture.nutrients,
        })
    }
}
