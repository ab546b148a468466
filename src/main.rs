//! saarthi-dash: terminal dashboard for the complaint intelligence service

use anyhow::{Context, Result};
use clap::Parser;
use saarthi_dash::{
    cli,
    config::{self, ConfigOverrides, DashboardConfig},
    DashboardError,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "saarthi-dash")]
#[command(version)]
#[command(about = "Terminal dashboard for the complaint intelligence service", long_about = None)]
#[command(after_help = "KEYS:
    r  refresh all panels      i  type a complaint
    c  clear the result        ←→ inspect cluster points
    t  switch theme            ?  help
    q  quit

EXAMPLES:
    # Service on the default address
    saarthi-dash

    # Remote service with a request timeout
    saarthi-dash --base-url http://10.0.0.5:8000 --timeout 10

    # Check what a config file resolves to
    saarthi-dash --config ./dash.yaml --print-config")]
struct Cli {
    /// Service base URL (overrides config file)
    #[arg(long, env = "SAARTHI_API_URL")]
    base_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Color theme: dark, light, high-contrast
    #[arg(long)]
    theme: Option<String>,

    /// Redraw interval in milliseconds
    #[arg(long, value_name = "MS")]
    tick_rate: Option<u64>,

    /// Config file path (default: discovered .saarthi-dash.yaml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs here instead of the default location
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Print the config file JSON Schema and exit
    #[arg(long)]
    print_schema: bool,

    /// Print a commented example config file and exit
    #[arg(long)]
    print_example_config: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout,
            theme: self.theme.clone(),
            tick_rate_ms: self.tick_rate,
            log_level: self.verbose.then(|| "debug".to_string()),
            log_file: self.log_file.clone(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_schema {
        let schema = config::generate_json_schema().context("failed to generate schema")?;
        println!("{schema}");
        return Ok(());
    }
    if cli.print_example_config {
        print!("{}", config::generate_example_config());
        return Ok(());
    }

    let (config, loaded_from) =
        DashboardConfig::from_file_with_overrides(cli.config.as_deref(), &cli.overrides())
            .map_err(DashboardError::from)?;
    cli::validate_config(&config)?;

    if cli.print_config {
        match &loaded_from {
            Some(path) => eprintln!("# Loaded from: {}", path.display()),
            None => eprintln!("# No config file found; showing defaults"),
        }
        print!("{}", cli::render_config(&config)?);
        return Ok(());
    }

    let log_path = cli::init_logging(&config.logging)?;
    if let Some(path) = &loaded_from {
        tracing::info!(path = %path.display(), "loaded config file");
    }

    let outcome = cli::run_dashboard(&config);
    if let Some(path) = log_path {
        eprintln!("Logs written to {}", path.display());
    }
    Ok(outcome?)
}
