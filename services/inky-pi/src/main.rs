//! inky-pi command line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use inky_pi::logging::init_logging;
use inky_pi::{run, DisplayOption, OutputKind, Settings};
use inky_sources::{Huxley2, OpenWeatherMap};

/// Draw train times, the weather forecast or a night screen.
#[derive(Parser, Debug)]
#[command(name = "inky-pi")]
#[command(version, about = "Train times and weather on an Inky e-ink display")]
struct Args {
    /// Screen to draw
    #[arg(short = 'o', long = "option", value_enum, default_value_t = DisplayOption::Train)]
    option: DisplayOption,

    /// Output device
    #[arg(short = 'm', long = "output", value_enum, default_value_t = OutputKind::Inky)]
    output: OutputKind,

    /// Print the resolved option and output, then exit
    #[arg(long)]
    dry_run: bool,

    /// Environment file to load instead of ./.env
    #[arg(long, env = "INKY_ENV_FILE")]
    env_file: Option<PathBuf>,

    /// Log level, used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)
                .with_context(|| format!("Failed to load env file {}", path.display()))?;
        }
        None => {
            dotenvy::dotenv().ok();
        }
    }

    init_logging(&args.log_level, args.log_json)?;

    if args.dry_run {
        info!(option = %args.option, output = %args.output, "Dry run");
        println!("option={} output={}", args.option, args.output);
        return Ok(());
    }

    let settings = Settings::from_env().context("Invalid configuration")?;
    let weather = OpenWeatherMap::new(settings.weather_query())
        .context("Failed to create weather client")?;
    let trains = Huxley2::with_base_url(
        settings.train_model_url.clone(),
        settings.huxley_query(),
    )
    .context("Failed to create train client")?;

    let now = chrono::Local::now().naive_local();
    run(args.option, args.output, &settings, &weather, &trains, now)
}
