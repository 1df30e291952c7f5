//! Laptop price estimator CLI.
//!
//! ```bash
//! laptop-price options
//! laptop-price predict --brand Dell --type Notebook --cpu "Intel Core i5" \
//!     --gpu Intel --os Windows --ram 8 --ssd 256
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use laptop_price::catalog::{
    ReferenceColumn, DEFAULT_SCREEN_SIZE, DEFAULT_WEIGHT, HDD_CHOICES, RAM_CHOICES,
    RESOLUTION_CHOICES, SCREEN_SIZE_RANGE, SSD_CHOICES, WEIGHT_RANGE,
};
use laptop_price::{Artifacts, Catalog, Config, PriceSummary, RawSpec, Resolution, YesNo};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "laptop-price")]
#[command(about = "Estimate laptop prices from a pre-trained model")]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// ONNX model path (overrides config)
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Feature schema path (overrides config)
    #[arg(long, global = true)]
    schema: Option<PathBuf>,

    /// Reference table path (overrides config)
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the choices and bounds the form accepts
    Options,

    /// Predict the price of a configuration
    Predict(SpecArgs),
}

#[derive(Args)]
struct SpecArgs {
    /// Manufacturer
    #[arg(long)]
    brand: String,

    /// Laptop category
    #[arg(long = "type")]
    form_factor: String,

    /// Weight in kg
    #[arg(long, default_value_t = DEFAULT_WEIGHT)]
    weight: f64,

    /// RAM in GB
    #[arg(long, default_value_t = 2)]
    ram: u32,

    /// HDD in GB (0 if none)
    #[arg(long, default_value_t = 0)]
    hdd: u32,

    /// SSD in GB (0 if none)
    #[arg(long, default_value_t = 0)]
    ssd: u32,

    /// Touchscreen: Yes or No
    #[arg(long, default_value = "No")]
    touchscreen: YesNo,

    /// IPS display: Yes or No
    #[arg(long, default_value = "No")]
    ips: YesNo,

    /// Screen size in inches
    #[arg(long, default_value_t = DEFAULT_SCREEN_SIZE)]
    screen_size: f64,

    /// Screen resolution, WIDTHxHEIGHT
    #[arg(long, default_value = "1920x1080")]
    resolution: Resolution,

    /// Processor brand
    #[arg(long)]
    cpu: String,

    /// Graphics brand
    #[arg(long)]
    gpu: String,

    /// Operating system
    #[arg(long)]
    os: String,
}

impl From<SpecArgs> for RawSpec {
    fn from(args: SpecArgs) -> Self {
        RawSpec {
            brand: args.brand,
            form_factor: args.form_factor,
            weight: args.weight,
            ram: args.ram,
            hdd: args.hdd,
            ssd: args.ssd,
            touchscreen: args.touchscreen,
            ips: args.ips,
            screen_size: args.screen_size,
            resolution: args.resolution,
            cpu_brand: args.cpu,
            gpu_brand: args.gpu,
            os: args.os,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::from(exit_status(&e))
        }
    }
}

/// Rejected form input exits with 2; artifact and inference failures with 1.
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<laptop_price::Error>() {
        Some(e) if e.is_input_error() => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Options => {
            let catalog = Catalog::from_path(&config.reference_path)
                .context("Failed to load reference table")?;
            print_options(&catalog);
        }
        Commands::Predict(args) => {
            let artifacts = Artifacts::load(&config).context("Failed to load artifacts")?;

            let spec = RawSpec::from(args);
            artifacts.catalog.check(&spec)?;

            let prediction = artifacts.predictor.estimate(&spec)?;
            info!(price = prediction.price, "Prediction completed");

            print!(
                "{}",
                PriceSummary::new(&spec, &prediction, &config.currency_symbol)
            );
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(path) = &cli.model {
        config.model_path = path.clone();
    }
    if let Some(path) = &cli.schema {
        config.schema_path = path.clone();
    }
    if let Some(path) = &cli.reference {
        config.reference_path = path.clone();
    }

    Ok(config)
}

fn print_options(catalog: &Catalog) {
    fn join<T: ToString>(values: &[T]) -> String {
        values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }

    for column in ReferenceColumn::all() {
        println!("{:<12}{}", column.field(), join(catalog.values(column)));
    }
    println!("{:<12}{}", "ram", join(&RAM_CHOICES));
    println!("{:<12}{}", "hdd", join(&HDD_CHOICES));
    println!("{:<12}{}", "ssd", join(&SSD_CHOICES));
    println!("{:<12}{}", "resolution", join(&RESOLUTION_CHOICES));
    println!("{:<12}{}", "touchscreen", join(&YesNo::all()));
    println!("{:<12}{}", "ips", join(&YesNo::all()));
    println!(
        "{:<12}{} to {} kg",
        "weight",
        WEIGHT_RANGE.start(),
        WEIGHT_RANGE.end()
    );
    println!(
        "{:<12}{} to {} in",
        "screen size",
        SCREEN_SIZE_RANGE.start(),
        SCREEN_SIZE_RANGE.end()
    );
}
