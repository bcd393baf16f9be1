mod cmd;

use std::path::PathBuf;
use std::process;

use crate::cmd::CliCommand;

use clap::Parser;
use error_stack::Result;
use log::error;
use spiral_core::config::SpiralConfig;
use spiral_core::error::SpiralError;

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Cli {
  /// INI file overriding layout, animation and demo settings
  #[clap(long, global = true, value_parser)]
  config: Option<PathBuf>,

  #[clap(subcommand)]
  command: CliCommand,
}

fn load_config(path: &Option<PathBuf>) -> Result<SpiralConfig, SpiralError> {
  match path {
    Some(p) => SpiralConfig::from_ini_file(p),
    None => Ok(SpiralConfig::default()),
  }
}

#[tokio::main]
async fn main() {
  let default_log_level = "info";
  let env = env_logger::Env::default().filter_or("RUST_LOG", default_log_level);
  env_logger::init_from_env(env);

  let cli = Cli::parse();
  let result = match load_config(&cli.config) {
    Ok(config) => cli.command.run(&config).await,
    Err(report) => Err(report),
  };

  if let Err(report) = result {
    error!("{report:?}");
    process::exit(1);
  }
}
