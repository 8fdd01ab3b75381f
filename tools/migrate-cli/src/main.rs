//! cart-migrate - move a product catalog from a source platform to a target.
//!
//! Commands:
//! - `cart-migrate run` - Fetch, normalize and submit every product
//! - `cart-migrate normalize` - Normalize a local records file offline
//! - `cart-migrate config` - Manage configuration

mod commands;
mod config;
mod context;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{ConfigArgs, NormalizeArgs, RunArgs};
use logging::LogFormat;

/// Migrate product catalogs between e-commerce platforms
#[derive(Parser)]
#[command(name = "cart-migrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migrate all products from the source to the target
    Run(RunArgs),

    /// Normalize a local file of source records
    Normalize(NormalizeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose, cli.log_format);

    let output = output::Output::new(cli.json);

    let ctx = match context::Context::load(cli.config.as_deref(), output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &ctx).await,
        Commands::Normalize(args) => commands::normalize::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
