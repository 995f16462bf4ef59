//! Kage - Ninja mission coordination
//!
//! Usage:
//!   kage seed [--config kage.yaml]   - Seed the store and print it as JSON
//!   kage demo [--config kage.yaml]   - Seed, then walk through the mission rules
//!
//! Log filter precedence: `--log`, then `RUST_LOG`, then `logging.filter`.

mod demo;
mod seed;
mod wiring;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use shared::KageConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "kage")]
#[command(about = "Kage - Ninja mission coordination")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (YAML, or JSON by extension)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `kage_usecase=debug`
    #[arg(long, global = true)]
    log: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed an empty store and print villages and ninjas
    Seed,
    /// Seed, then exercise missions and villages
    Demo,
}

fn init_tracing(flag: Option<&str>, configured: &str) -> anyhow::Result<()> {
    let filter = match flag {
        Some(directive) => EnvFilter::try_new(directive)?,
        None => EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(configured))?,
    };

    // stdout carries the JSON report
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<KageConfig> {
    match path {
        Some(path) => KageConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display())),
        None => Ok(KageConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;
    init_tracing(cli.log.as_deref(), &config.logging.filter)?;

    let elevated = config.policy.elevated_role()?;
    let mut api = wiring::build(&config)?;

    let roster = if config.seed.ninjas.is_empty() {
        info!("No seed configured, using the built-in roster");
        seed::default_seed()
    } else {
        config.seed.clone()
    };
    let seeded = seed::run(&mut api, &roster, elevated)?;

    match cli.command {
        Commands::Seed => {
            println!("{}", serde_json::to_string_pretty(&seeded)?);
        }
        Commands::Demo => {
            let report = demo::run(&mut api, &seeded.principal)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.all_passed() {
                anyhow::bail!("the demo diverged from the expected outcomes");
            }
        }
    }
    Ok(())
}
