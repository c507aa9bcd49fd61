//! Integration test for whole-package pricing with the bottles fixture set.
//!
//! Cream is sold as 250ml Pouring Cream (2.50 USD) and 500ml Thick Cream
//! (4.00 USD, listed as 0.5 litres).
//!
//! - Whipped Cream needs 300ml: one 500ml bottle (4.00) beats two 250ml
//!   bottles (5.00).
//! - Cream Sauce needs 0.6 litres: three 250ml bottles (7.50) beat two 500ml
//!   bottles (8.00).
//!
//! In both cases Thick Cream has the lower price per millilitre, so its
//! nutrient facts are reported.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use larder::{
    evaluator::IngredientCostEvaluator,
    fixtures::Fixture,
    recipes::Ingredient,
    summary::RecipeAggregator,
    units::{UnitOfMeasure, UomName, UomType},
};

#[test]
fn whipped_cream_buys_one_large_bottle() -> TestResult {
    let fixture = Fixture::from_set("bottles")?;
    let catalog = fixture.catalog()?;

    let summary = RecipeAggregator::new(&catalog).summarize_recipe(fixture.recipe("Whipped Cream")?)?;

    assert_eq!(summary.cheapest_cost(), Money::from_minor(400, USD));

    let fat = summary
        .nutrients_at_cheapest_cost()
        .get("Fat")
        .ok_or("missing fat")?;

    assert_eq!(fat.quantity_amount.amount(), Decimal::from(36));

    Ok(())
}

#[test]
fn cream_sauce_buys_several_small_bottles() -> TestResult {
    let fixture = Fixture::from_set("bottles")?;
    let catalog = fixture.catalog()?;

    let summary = RecipeAggregator::new(&catalog).summarize_recipe(fixture.recipe("Cream Sauce")?)?;

    assert_eq!(summary.cheapest_cost(), Money::from_minor(750, USD));

    Ok(())
}

#[test]
fn whole_package_cost_never_undercuts_linear_minimum() -> TestResult {
    let fixture = Fixture::from_set("bottles")?;
    let catalog = fixture.catalog()?;
    let evaluator = IngredientCostEvaluator::new(&catalog);
    let cream = Ingredient::new("Cream");

    for millilitres in (25..=2000).step_by(25) {
        let required = UnitOfMeasure::new(
            Decimal::from(millilitres),
            UomName::Millilitres,
            UomType::Volume,
        );

        let cost = evaluator.cheapest_cost(&cream, &required)?;

        // Thick Cream: 4.00 per 500ml
        let linear_minimum = Decimal::new(8, 3) * Decimal::from(millilitres);

        assert!(cost.whole_packages);
        assert!(
            cost.cost >= linear_minimum,
            "{millilitres}ml cost {} below {linear_minimum}",
            cost.cost
        );
        assert_eq!(cost.product, "Thick Cream");
    }

    Ok(())
}

#[test]
fn whole_package_cost_matches_a_single_package_size() -> TestResult {
    let fixture = Fixture::from_set("bottles")?;
    let catalog = fixture.catalog()?;
    let evaluator = IngredientCostEvaluator::new(&catalog);
    let cream = Ingredient::new("Cream");

    for millilitres in (50..=1500).step_by(50) {
        let required = Decimal::from(millilitres);

        let cost = evaluator.cheapest_cost(
            &cream,
            &UnitOfMeasure::new(required, UomName::Millilitres, UomType::Volume),
        )?;

        let small = (required / Decimal::from(250)).ceil().max(Decimal::ONE) * Decimal::new(250, 2);
        let large = (required / Decimal::from(500)).ceil().max(Decimal::ONE) * Decimal::new(400, 2);

        assert_eq!(cost.cost, small.min(large), "{millilitres}ml");
    }

    Ok(())
}
