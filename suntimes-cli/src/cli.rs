use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, Text};
use suntimes_core::{
    Config, LocationQuery, LocationResolver, TimeReporter, TzfLookup, geocoder_from_config,
    sun_times_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "suntimes", version, about = "Sunrise and sunset times for any place")]
pub struct Cli {
    /// Log requests and intermediate results to stderr.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show sunrise and sunset for a place name or a pair of coordinates.
    ///
    /// When a name is given, --lat/--lon are ignored and the coordinates are
    /// looked up instead.
    Show {
        /// Place name in free form, e.g. "Moscow" or "Eiffel Tower".
        name: Option<String>,

        /// Latitude in degrees (-90 to 90).
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,

        /// Longitude in degrees (-180 to 180).
        #[arg(long, allow_hyphen_values = true)]
        lon: Option<f64>,

        /// Date as DD.MM.YYYY; if absent, means today.
        #[arg(long, short)]
        date: Option<String>,

        /// Print without terminal colors.
        #[arg(long)]
        no_color: bool,
    },

    /// Interactively set the geocoder user agent and output preferences.
    Configure,

    /// Print where the configuration file lives.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Show { name, lat, lon, date, no_color } => {
                let mut cfg = Config::load()?;
                if no_color {
                    cfg.output.color = false;
                }

                let query = LocationQuery { name, latitude: lat, longitude: lon };
                show(&cfg, &query, date.as_deref()).await?;
            }
            Command::Configure => configure()?,
            Command::ConfigPath => println!("{}", Config::config_file_path()?.display()),
        }

        Ok(())
    }
}

async fn show(cfg: &Config, query: &LocationQuery, date: Option<&str>) -> anyhow::Result<()> {
    let resolver = LocationResolver::new(geocoder_from_config(cfg)?);
    let location = resolver.resolve(query).await.context("Failed to resolve location")?;

    let reporter = TimeReporter::for_date(
        date,
        sun_times_from_config(cfg)?,
        Box::new(TzfLookup::new()),
        cfg.output.clone(),
    )?;

    let report = reporter
        .render(&location)
        .await
        .with_context(|| format!("Failed to build report for {}", location.label()))?;

    print!("{report}");
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    cfg.geocoder.user_agent = Text::new("Geocoder user agent:")
        .with_default(&cfg.geocoder.user_agent)
        .with_help_message("Nominatim asks for an identifying agent, e.g. \"suntimes (you@example.com)\"")
        .prompt()
        .context("Failed to read user agent")?;

    cfg.output.color = Confirm::new("Highlight output with colors?")
        .with_default(cfg.output.color)
        .prompt()
        .context("Failed to read color preference")?;

    cfg.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}
