use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use influx_output::config::CheckArgs;
use influx_output::config::Cli;
use influx_output::config::Commands;
use influx_output::config::WriteArgs;
use influx_output::load_config;
use influx_output::InfluxDbOutputConfig;
use influx_output::InfluxDbWriterFactory;
use influx_output::QueryResult;
use influx_output::Settings;
use utils::logging;
use utils::version;

/// Sets up global panic hooks.
fn setup_global_hooks() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        default_hook(panic_info);
        tracing::error!("Thread panicked: {}", panic_info);
    }));
}

fn main() -> Result<()> {
    setup_global_hooks();
    logging::init();

    let cli = Cli::parse();
    tracing::debug!("influx-output {}", &**version::VERSION);

    match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Write(args) => run_write(args),
    }
}

fn read_config(path: &Path) -> Result<InfluxDbOutputConfig> {
    load_config(path).map_err(|e| anyhow::anyhow!("Failed to load configuration: {e:?}"))
}

fn run_check(args: CheckArgs) -> Result<()> {
    let config = read_config(&args.config)?;
    let settings =
        Settings::resolve(&config).map_err(|e| anyhow::anyhow!("Invalid configuration: {e:?}"))?;

    println!("{settings}");
    Ok(())
}

fn run_write(args: WriteArgs) -> Result<()> {
    let config = read_config(&args.config)?;
    let factory = InfluxDbWriterFactory::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create InfluxDB writer: {e:?}"))?;

    let content = std::fs::read_to_string(&args.results)
        .with_context(|| format!("read results file {:?} failed", args.results))?;
    let results: Vec<QueryResult> =
        serde_json::from_str(&content).context("parse query results failed")?;

    tracing::info!(
        results = results.len(),
        database = %factory.settings().database,
        "Writing query results"
    );

    let writer = factory.create();
    writer
        .write(&results)
        .map_err(|e| anyhow::anyhow!("Write failed: {e:?}"))?;

    tracing::info!("Query results written");
    Ok(())
}
