use anyhow::Context;
use clap::{Parser, Subcommand};

use aggregator_core::{Aggregator, Config, Continent, provider};

use crate::table;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-aggregator", version, about = "Aggregate per-country weather by continent")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather-service API key in the local configuration file.
    Configure,

    /// Fetch current weather for every country of a continent.
    Run {
        /// Continent region name, e.g. "europe" or "north america".
        /// Prompts interactively when absent.
        #[arg(long)]
        continent: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Run { continent } => run(continent).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    let api_key = inquire::Password::new("Weather-service API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.api_key = Some(api_key);
    config.save().context("Failed to save configuration")?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn run(continent: Option<String>) -> anyhow::Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    let continent = match continent {
        Some(name) => Continent::try_from(name.as_str())?,
        None => prompt_continent()?,
    };

    let aggregator = Aggregator::new(
        provider::country_provider_from_config(&config),
        provider::weather_provider_from_config(&config),
    );

    let api_key = config.resolve_api_key();
    let resolved = aggregator
        .run(continent, api_key.as_deref())
        .await
        .with_context(|| format!("Failed to aggregate weather for {continent}"))?;

    println!("{}", table::render(&resolved));
    println!("Exported {} rows to {}", resolved.len(), config.export_file().display());
    Ok(())
}

fn prompt_continent() -> anyhow::Result<Continent> {
    let picked = inquire::Select::new("Pick a continent:", Continent::all().to_vec())
        .prompt()
        .context("Failed to read continent selection")?;

    Ok(picked)
}
