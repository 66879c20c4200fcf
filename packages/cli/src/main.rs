#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the REAL-UP map.
//!
//! ```text
//! realup_map serve [--config realup.toml] [--interactive]
//! realup_map plot --city chicago --period 3 [--config realup.toml]
//! ```
//!
//! Running `realup_map` with no subcommand asks which tool to run.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dialoguer::Select;
use realup_map_plot_models::{City, Period, PlotOutcome};
use realup_map_server::{ServerConfig, init_logger};

#[derive(Parser)]
#[command(
    name = "realup_map",
    about = "Neighborhood sentiment and rental listings map"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Prompt for bind address and port before starting
        #[arg(long)]
        interactive: bool,
    },
    /// Render one map and print the result summary as JSON
    Plot {
        /// City value as submitted by the form (e.g. `chicago`)
        #[arg(long, default_value = "")]
        city: String,
        /// Period value as submitted by the form (`1`, `2` or `3`)
        #[arg(long, default_value = "")]
        period: String,
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive().await;
    };

    match command {
        Commands::Serve {
            config,
            interactive,
        } => {
            let config = ServerConfig::load(config.as_deref())?;
            if interactive {
                realup_map_server::interactive::run(config).await?;
            } else {
                realup_map_server::run_server(config).await?;
            }
        }
        Commands::Plot {
            city,
            period,
            config,
        } => {
            let config = ServerConfig::load(config.as_deref())?;
            plot(&config, &city, &period)?;
        }
    }

    Ok(())
}

/// Runs the pipeline once and prints the outcome.
///
/// Exits with status 1 when the outcome is a failure.
fn plot(config: &ServerConfig, city: &str, period: &str) -> Result<(), serde_json::Error> {
    log::info!("Plotting city={city:?} period={period:?}");
    let outcome = realup_map_plot::plot(&config.plot, city, period);
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    if let PlotOutcome::Failure(_) = outcome {
        std::process::exit(1);
    }
    Ok(())
}

#[allow(clippy::future_not_send)]
async fn interactive() -> Result<(), Box<dyn std::error::Error>> {
    println!("REAL-UP Map");
    println!();

    let config = ServerConfig::load(None)?;

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&["Start server", "Render a map"])
        .default(0)
        .interact()?;

    if idx == 0 {
        realup_map_server::interactive::run(config).await?;
        return Ok(());
    }

    let cities: Vec<&str> = City::all().iter().map(|c| c.display_name()).collect();
    let city = Select::new()
        .with_prompt("City")
        .items(&cities)
        .default(0)
        .interact()?;

    let periods: Vec<&str> = Period::all().iter().map(|p| p.label()).collect();
    let period = Select::new()
        .with_prompt("Period")
        .items(&periods)
        .default(periods.len() - 1)
        .interact()?;

    plot(
        &config,
        City::all()[city].as_ref(),
        Period::all()[period].selection(),
    )?;
    Ok(())
}
