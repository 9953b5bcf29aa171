mod interview;
mod ordinal;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use recipe_cost_core::{
    calculate_recipe_prices, ApportionStats, Apportionment, CostConfig, RecipeReport,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::interview::Interview;

#[derive(Parser)]
#[command(name = "recipe-cost")]
#[command(about = "Work out what a recipe costs to make", long_about = None)]
struct Cli {
    /// JSON density table to use instead of the built-in rules
    /// (env: RECIPE_COST_DENSITY_TABLE)
    #[arg(long, value_name = "PATH")]
    density_table: Option<PathBuf>,

    /// Cups per pound for ingredients no density rule matches
    /// (env: RECIPE_COST_DEFAULT_RATE)
    #[arg(long, value_name = "CUPS_PER_POUND")]
    default_rate: Option<f64>,

    /// Log costing decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = CostConfig::from_env()?.with_overrides(cli.density_table, cli.default_rate);
    let table = config
        .load_density_table()
        .context("Failed to set up density table")?;

    let mut interview = Interview::new(io::stdin().lock(), io::stdout().lock());
    if !interview.confirm_start()? {
        return Ok(());
    }
    let mut recipe = interview.read_recipe()?;
    interview.add_costs(&mut recipe)?;
    let mut out = interview.into_output();

    let mut stats = ApportionStats::default();
    let outcomes = calculate_recipe_prices(&mut recipe, &table, &mut stats);
    tracing::debug!(stats = %serde_json::to_string(&stats)?, "priced recipe");

    for (ingredient, outcome) in recipe.ingredients().iter().zip(&outcomes) {
        if let Apportionment::Unpriced(e) = outcome {
            writeln!(out, "{}: {}", ingredient.thing(), e)?;
        }
    }
    writeln!(out, "{}", RecipeReport::from_recipe(&recipe))?;
    out.flush()?;

    Ok(())
}
