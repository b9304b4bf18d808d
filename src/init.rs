use crate::{Config, Dataset, General};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use url::Url;

/// Datasets of the practice round, as `(name, file stem)`.
const PRACTICE_DATASETS: [(&str, &str); 3] = [
    ("small-1", "C-small-practice-1"),
    ("small-2", "C-small-practice-2"),
    ("large", "C-large-practice"),
];

#[derive(Args)]
pub(crate) struct InitArgs {
    #[arg(default_value = "bathroom-stalls")]
    name: String,
    #[arg(short, long)]
    force: bool,
    /// URL of a zip archive holding the dataset files
    #[arg(short, long)]
    archive_url: Option<String>,
}

pub(crate) fn init(args: InitArgs, file_name: &str) -> Result<()> {
    let path = Path::new(file_name);
    if !args.force && path.exists() {
        return Err(anyhow!(
            "{} already exists. Use --force to overwrite",
            file_name
        ));
    }

    let archive_url = args
        .archive_url
        .as_deref()
        .map(validate_archive_url)
        .transpose()?;
    let config = build_default_config(&args.name, archive_url);
    let config_str = toml::to_string(&config)
        .context(format!("Failed to serialize config to TOML: {:?}", config))?;

    std::fs::write(path, config_str)
        .context(format!("Failed to write config to file: {}", file_name))?;
    eprintln!(
        "{}",
        format!("Initialized project with name: {}", args.name).green()
    );
    Ok(())
}

fn build_default_config(name: &str, archive_url: Option<String>) -> Config {
    let data_dir = PathBuf::from("data");
    let out_dir = Path::new("out");
    let datasets = PRACTICE_DATASETS
        .iter()
        .map(|(dataset, stem)| Dataset {
            name: dataset.to_string(),
            input: data_dir.join(format!("{}.in", stem)),
            expected: Some(data_dir.join(format!("{}.out", stem))),
            output: out_dir.join(format!("{}.out", stem)),
        })
        .collect();

    Config {
        general: General {
            name: name.to_string(),
            data_dir,
            archive_url,
        },
        datasets,
    }
}

pub(crate) fn validate_archive_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).context(anyhow!("Failed to parse URL: {}", url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed.into()),
        scheme => Err(anyhow!("Unsupported URL scheme {:?}: {}", scheme, url)),
    }
}
