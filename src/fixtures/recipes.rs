//! Recipe Fixtures

use serde::Deserialize;

use crate::recipes::Recipe;

/// Wrapper for recipes in YAML
#[derive(Debug, Deserialize)]
pub struct RecipesFixture {
    /// Recipes in file order
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        recipes::{Ingredient, LineItem},
        units::{UnitOfMeasure, UomName, UomType},
    };

    use super::*;

    #[test]
    fn parses_recipes_with_unit_aliases() -> TestResult {
        let fixture: RecipesFixture = serde_norway::from_str(
            "recipes:\n  - name: Sweet Milk\n    line_items:\n      - ingredient: Milk\n        amount: { amount: 1, name: cups, type: volume }\n      - ingredient: Sugar\n        amount: { amount: 25, name: g, type: mass }\n",
        )?;

        assert_eq!(
            fixture.recipes,
            vec![Recipe::new(
                "Sweet Milk",
                [
                    LineItem::new(
                        Ingredient::new("Milk"),
                        UnitOfMeasure::new(Decimal::ONE, UomName::Cups, UomType::Volume),
                    ),
                    LineItem::new(
                        Ingredient::new("Sugar"),
                        UnitOfMeasure::new(Decimal::from(25), UomName::Grams, UomType::Mass),
                    ),
                ],
            )]
        );

        Ok(())
    }
}
