mod cmd;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

/// envbind - bind environment variables to a typed configuration record
#[derive(Parser)]
#[command(name = "envbind")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Output format
  #[arg(short = 'o', long, value_enum, default_value = "text", global = true)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bind the service configuration once and print it
  Show,

  /// List the environment variables the service configuration reads
  Vars,

  /// Keep re-binding the service configuration and print it when it changes
  Watch {
    /// Refresh interval in seconds (default: 60)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_default_env())
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  let cli = Cli::parse();

  match cli.command {
    Commands::Show => cmd::cmd_show(cli.output),
    Commands::Vars => cmd::cmd_vars(cli.output),
    Commands::Watch { interval } => cmd::cmd_watch(interval, cli.output),
  }
}
