//! Fixtures

use std::{fs, path::PathBuf};

use rusty_money::iso::Currency;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::{BaseUnits, Catalog, CatalogError},
    conversions::ConversionTable,
    fixtures::{products::ProductsFixture, recipes::RecipesFixture, units::UnitsFixture},
    products::Product,
    recipes::Recipe,
};

pub mod products;
pub mod recipes;
pub mod units;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between products
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// Recipe not found
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// No products loaded yet
    #[error("No products loaded yet; currency unknown")]
    NoCurrency,

    /// Catalog rejected a product
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    base_units: BaseUnits,
    conversions: ConversionTable,

    /// Products in file order
    products: Vec<Product<'a>>,

    recipes: Vec<Recipe>,

    /// Currency for the fixture set
    currency: Option<&'static Currency>,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            base_units: BaseUnits::default(),
            conversions: ConversionTable::new(),
            products: Vec::new(),
            recipes: Vec::new(),
            currency: None,
        }
    }

    fn read<T: DeserializeOwned>(&self, category: &str, name: &str) -> Result<T, FixtureError> {
        let file_path = self.base_path.join(category).join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;

        debug!(path = %file_path.display(), "loading fixture");

        Ok(serde_norway::from_str(&contents)?)
    }

    /// Load base units and conversions from a YAML fixture file
    ///
    /// A `base_units` section replaces the current base-unit table. Conversions
    /// are added to the table; a repeated (from, to) pair keeps the first factor.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_units(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: UnitsFixture = self.read("units", name)?;

        if let Some(base_units) = fixture.base_units {
            self.base_units = base_units.into();
        }

        for edge in fixture.conversions {
            if !self.conversions.add_edge(edge) {
                debug!(from = %edge.from, to = %edge.to, "duplicate conversion ignored");
            }
        }

        Ok(self)
    }

    /// Load products from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or if there are currency mismatches.
    pub fn load_products(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: ProductsFixture = self.read("products", name)?;

        for product_fixture in fixture.products {
            // The currency comes from the parsed price so it outlives the product.
            for offer in &product_fixture.offers {
                let (_amount, currency) = products::parse_price(&offer.price)?;

                match self.currency {
                    Some(existing) if existing != currency => {
                        return Err(FixtureError::CurrencyMismatch(
                            existing.iso_alpha_code.to_string(),
                            currency.iso_alpha_code.to_string(),
                        ));
                    }
                    Some(_) => {}
                    None => self.currency = Some(currency),
                }
            }

            let product: Product<'a> = product_fixture.try_into()?;

            self.products.push(product);
        }

        Ok(self)
    }

    /// Load recipes from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_recipes(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: RecipesFixture = self.read("recipes", name)?;

        self.recipes.extend(fixture.recipes);

        Ok(self)
    }

    /// Load units, products and recipes with the same name
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn load_set(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        self.load_units(name)?
            .load_products(name)?
            .load_recipes(name)
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture.load_set(name)?;

        Ok(fixture)
    }

    /// Build a catalog from the loaded units and products
    ///
    /// # Errors
    ///
    /// Returns an error if no products are loaded or the catalog rejects one.
    pub fn catalog(&self) -> Result<Catalog<'a>, FixtureError> {
        let currency = self.currency.ok_or(FixtureError::NoCurrency)?;

        let mut catalog = Catalog::new(currency)
            .with_base_units(self.base_units.clone())
            .with_conversions(self.conversions.clone());

        for product in &self.products {
            catalog.insert_product(product.clone())?;
        }

        Ok(catalog)
    }

    /// Get all products
    pub fn products(&self) -> &[Product<'a>] {
        &self.products
    }

    /// Get all recipes
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Get a recipe by name
    ///
    /// # Errors
    ///
    /// Returns an error if the recipe is not found.
    pub fn recipe(&self, name: &str) -> Result<&Recipe, FixtureError> {
        self.recipes
            .iter()
            .find(|recipe| recipe.name == name)
            .ok_or_else(|| FixtureError::RecipeNotFound(name.to_string()))
    }

    /// Get the conversion table
    pub fn conversions(&self) -> &ConversionTable {
        &self.conversions
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no products have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        self.currency.ok_or(FixtureError::NoCurrency)
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
