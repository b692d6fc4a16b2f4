use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use utils::version;

#[derive(Parser)]
#[command(about, long_about, version = &**version::VERSION)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve the writer configuration and print the effective settings
    Check(CheckArgs),
    /// Write a batch of query results to InfluxDB
    Write(WriteArgs),
}

#[derive(Args, Clone)]
pub struct CheckArgs {
    #[arg(
        long,
        env = "INFLUX_OUTPUT_CONFIG",
        value_hint = clap::ValueHint::FilePath,
        help = "Path to the InfluxDB writer configuration (JSON or YAML)"
    )]
    pub config: PathBuf,
}

#[derive(Args, Clone)]
pub struct WriteArgs {
    #[arg(
        long,
        env = "INFLUX_OUTPUT_CONFIG",
        value_hint = clap::ValueHint::FilePath,
        help = "Path to the InfluxDB writer configuration (JSON or YAML)"
    )]
    pub config: PathBuf,

    #[arg(
        long,
        value_hint = clap::ValueHint::FilePath,
        help = "Path to a JSON array of query results"
    )]
    pub results: PathBuf,
}
