//! Volterria - Entry Point
//!
//! Runs the built-in predator/prey field and mirrors it into either the
//! terminal or a headless scene.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use volterria::core::config::AppConfig;
use volterria::core::error::Result;
use volterria::render::{SceneCanvas, SyncView};
use volterria::simulation::Field;
use volterria::ui::{self, HEADLESS_HZ};

/// Live predator/prey population viewer
#[derive(Parser, Debug)]
#[command(name = "volterria")]
#[command(about = "Watch a predator/prey/grass simulation in the terminal")]
struct Args {
    /// TOML config file ([view] and [simulation] tables)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for deterministic runs (overrides the config)
    #[arg(long)]
    seed: Option<u64>,

    /// Run this many ticks without a terminal and print a JSON summary
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Headless surface width in pixels
    #[arg(long, default_value_t = 800.0)]
    width: f32,

    /// Headless surface height in pixels
    #[arg(long, default_value_t = 600.0)]
    height: f32,

    /// Also write the headless summary to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// Send logs to this file (interactive mode only logs warnings otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args)?;

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if args.seed.is_some() {
        config.simulation.seed = args.seed;
    }
    config.validate()?;

    let field = Field::new(config.simulation);
    let mut view = SyncView::new(field, config.view);

    match args.headless {
        Some(ticks) => {
            let mut canvas = SceneCanvas::new(args.width, args.height);
            let report = ui::run_headless(&mut view, &mut canvas, ticks, HEADLESS_HZ);
            view.teardown(&mut canvas);

            if let Some(path) = &args.report {
                report.write_json(path)?;
            }
            println!("{}", report.to_json()?);
        }
        None => ui::run(&mut view)?,
    }

    Ok(())
}

fn init_tracing(args: &Args) -> Result<()> {
    // The terminal owns stdout/stderr while interactive
    let default_level = if args.headless.is_some() || args.log_file.is_some() {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    let filter = EnvFilter::from_default_env().add_directive(default_level.into());

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}
