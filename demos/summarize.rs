//! Recipe Summary Example
//!
//! Loads a fixture set and prints the cheapest cost and nutrient totals of
//! every recipe in it.
//!
//! Use `-f` to load a fixture set by name
//! Use `--max-hops` to allow longer conversion chains

use std::{io, io::Write, time::Instant};

use anyhow::Result;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::info;

use larder::{
    config::Config, evaluator::IngredientCostEvaluator, fixtures::Fixture,
    observability::init_subscriber, summary::RecipeAggregator,
};

/// Recipe Summary Example
pub fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    init_subscriber(&config.logging)?;

    let mut fixture = Fixture::with_base_path(&config.fixtures_path);

    fixture.load_set(&config.fixture)?;

    let catalog = fixture.catalog()?;
    let evaluator = IngredientCostEvaluator::new(&catalog).with_max_hops(config.max_hops);
    let aggregator = RecipeAggregator::with_evaluator(evaluator);

    info!(
        fixture = %config.fixture,
        products = catalog.len(),
        recipes = fixture.recipes().len(),
        "loaded fixture set"
    );

    let start = Instant::now();
    let summaries = aggregator.summarize(fixture.recipes())?;
    let elapsed = start.elapsed();

    info!(elapsed = %elapsed.human(Truncate::Nano), "summarised recipes");

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    for (name, summary) in &summaries {
        writeln!(handle, "{name}: {}", summary.cheapest_cost())?;

        for (nutrient, fact) in summary.nutrients_at_cheapest_cost().iter() {
            writeln!(
                handle,
                "  {nutrient:<14} {} per {}",
                fact.quantity_amount, fact.quantity_per
            )?;
        }
    }

    writeln!(
        handle,
        "\n {} ({}s)",
        elapsed.human(Truncate::Nano),
        elapsed.as_secs_f32()
    )?;

    Ok(())
}
