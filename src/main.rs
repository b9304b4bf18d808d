mod compare;
mod download;
mod error;
pub(crate) mod init;
mod input;
mod output;
mod run;
mod solver;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub(crate) const DEFAULT_CONFIG_FILE_NAME: &str = "stalls.toml";

fn main() {
    if let Err(e) = run_command(Cli::parse()) {
        eprintln!("{}", format!("Error: {:#}", e).yellow().bold());
        std::process::exit(1);
    }
}

fn run_command(cli: Cli) -> Result<()> {
    let config_file_name = cli
        .config_file_name
        .as_deref()
        .unwrap_or(DEFAULT_CONFIG_FILE_NAME);

    // Only the batch commands need the config file
    let config = match cli.command {
        Commands::Run(_) | Commands::Download(_) => Some(load_config(config_file_name)?),
        _ => None,
    };
    let base_dir = config_base_dir(config_file_name);

    match cli.command {
        Commands::Init(args) => {
            init::init(args, config_file_name)?;
        }
        Commands::Solve(args) => {
            solve(args)?;
        }
        Commands::Run(args) => {
            run::run(args, config.unwrap(), &base_dir)?;
        }
        Commands::Check(args) => {
            run::check(args)?;
        }
        Commands::Download(args) => {
            download::download(args, config.unwrap(), &base_dir)?;
        }
    }

    Ok(())
}

fn load_config(file_name: &str) -> Result<Config> {
    let content = std::fs::read_to_string(file_name)
        .map_err(|e| anyhow!("Failed to read config file {}: {}", file_name, e))?;
    let config: Config =
        toml::from_str(&content).map_err(|e| anyhow!("Failed to parse config file: {}", e))?;
    Ok(config)
}

/// Dataset paths in the config file are relative to the file itself.
fn config_base_dir(file_name: &str) -> PathBuf {
    match Path::new(file_name).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn solve(args: SolveArgs) -> Result<()> {
    let query = solver::Query::new(args.stalls, args.customers)?;
    let answer = solver::solve(query);
    println!("{} {}", answer.max_adjacent, answer.min_adjacent);
    Ok(())
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long)]
    config_file_name: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init(init::InitArgs),
    /// Answer a single query
    Solve(SolveArgs),
    /// Solve the configured datasets and compare with the expected outputs
    Run(run::RunArgs),
    /// Compare an output file with an expected one
    Check(run::CheckArgs),
    /// Fetch and unpack a dataset archive
    Download(download::DownloadArgs),
}

#[derive(Args)]
struct SolveArgs {
    stalls: u64,
    customers: u64,
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct Config {
    pub(crate) general: General,
    #[serde(default, rename = "dataset")]
    pub(crate) datasets: Vec<Dataset>,
}

#[derive(Serialize, Deserialize, Debug)]
pub(crate) struct General {
    pub(crate) name: String,
    #[serde(default = "default_data_dir")]
    pub(crate) data_dir: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) archive_url: Option<String>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub(crate) struct Dataset {
    pub(crate) name: String,
    pub(crate) input: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) expected: Option<PathBuf>,
    pub(crate) output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config() {
        let config: Config = toml::from_str(
            r#"
                [general]
                name = "stalls"

                [[dataset]]
                name = "small-1"
                input = "data/C-small-practice-1.in"
                expected = "data/C-small-practice-1.out"
                output = "out/C-small-practice-1.out"

                [[dataset]]
                name = "scratch"
                input = "scratch.in"
                output = "scratch.out"
            "#,
        )
        .unwrap();

        assert_eq!(config.general.data_dir, PathBuf::from("data"));
        assert!(config.general.archive_url.is_none());
        assert_eq!(config.datasets.len(), 2);
        assert_eq!(config.datasets[0].name, "small-1");
        assert!(config.datasets[1].expected.is_none());
    }

    #[test]
    fn base_dir_of_config_file() {
        assert_eq!(config_base_dir("stalls.toml"), PathBuf::from("."));
        assert_eq!(
            config_base_dir("conf/stalls.toml"),
            PathBuf::from("conf")
        );
    }
}
