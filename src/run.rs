use crate::compare::{compare_files, Comparison, Mismatch};
use crate::solver::{solve, Answer};
use crate::{input, output, Config, Dataset};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Args)]
pub(crate) struct RunArgs {
    /// Only run the named dataset (repeatable)
    #[arg(short, long = "dataset")]
    datasets: Vec<String>,
    /// Print the reports as JSON on stdout
    #[arg(long)]
    json: bool,
    /// Also list every query with its answer
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Args)]
pub(crate) struct CheckArgs {
    output: PathBuf,
    expected: PathBuf,
}

#[derive(Debug, Serialize)]
pub(crate) struct DatasetReport {
    name: String,
    cases: usize,
    output: PathBuf,
    #[serde(flatten)]
    status: Status,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub(crate) enum Status {
    Identical,
    Mismatch(Mismatch),
    Unchecked,
    Failed { error: String },
}

impl Status {
    fn is_ok(&self) -> bool {
        matches!(self, Status::Identical | Status::Unchecked)
    }
}

pub(crate) fn run(args: RunArgs, config: Config, base_dir: &Path) -> Result<()> {
    let datasets = select_datasets(&config.datasets, &args.datasets)?;
    if datasets.is_empty() {
        return Err(anyhow!("No datasets configured"));
    }

    let mut reports = Vec::with_capacity(datasets.len());
    for dataset in datasets {
        let report = run_dataset(dataset, base_dir, args.verbose);
        if !args.json {
            print_report(&report);
        }
        reports.push(report);
    }

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?
        );
    }

    let failed = reports.iter().filter(|r| !r.status.is_ok()).count();
    if failed > 0 {
        return Err(anyhow!(
            "{} of {} datasets failed or did not match",
            failed,
            reports.len()
        ));
    }
    Ok(())
}

pub(crate) fn check(args: CheckArgs) -> Result<()> {
    match compare_files(&args.output, &args.expected)? {
        Comparison::Identical => {
            eprintln!("{}", "Files are identical".green());
            Ok(())
        }
        Comparison::Mismatch(mismatch) => Err(anyhow!("Files are not identical: {}", mismatch)),
    }
}

fn select_datasets<'a>(datasets: &'a [Dataset], names: &[String]) -> Result<Vec<&'a Dataset>> {
    if names.is_empty() {
        return Ok(datasets.iter().collect());
    }
    names
        .iter()
        .map(|name| {
            datasets
                .iter()
                .find(|d| &d.name == name)
                .ok_or_else(|| anyhow!("Unknown dataset: {}", name))
        })
        .collect()
}

/// Solves one dataset end to end. Failures are recorded in the report so the
/// remaining datasets still run.
fn run_dataset(dataset: &Dataset, base_dir: &Path, verbose: bool) -> DatasetReport {
    let output = base_dir.join(&dataset.output);
    let (cases, status) = match solve_dataset(dataset, base_dir, &output, verbose) {
        Ok(cases) => (cases, check_dataset(dataset, base_dir, &output)),
        Err(e) => (
            0,
            Status::Failed {
                error: format!("{:#}", e),
            },
        ),
    };
    DatasetReport {
        name: dataset.name.clone(),
        cases,
        output,
        status,
    }
}

/// Reads, solves and writes one dataset, returning the number of cases written.
fn solve_dataset(
    dataset: &Dataset,
    base_dir: &Path,
    output_path: &Path,
    verbose: bool,
) -> Result<usize> {
    let input_path = base_dir.join(&dataset.input);
    let queries = input::read_queries_from_file(&input_path)
        .context(format!("Failed to read dataset {}", dataset.name))?;
    let answers = queries.iter().map(|&q| solve(q)).collect::<Vec<Answer>>();

    if verbose {
        eprint!("{}", output::format_table(&queries, &answers));
    }

    output::write_answers_to_file(output_path, &answers)
        .context(format!("Failed to write output of dataset {}", dataset.name))?;
    Ok(queries.len())
}

fn check_dataset(dataset: &Dataset, base_dir: &Path, output_path: &Path) -> Status {
    let Some(expected) = &dataset.expected else {
        return Status::Unchecked;
    };
    match compare_files(output_path, &base_dir.join(expected)) {
        Ok(Comparison::Identical) => Status::Identical,
        Ok(Comparison::Mismatch(mismatch)) => Status::Mismatch(mismatch),
        Err(e) => Status::Failed {
            error: format!("Failed to compare dataset {}: {}", dataset.name, e),
        },
    }
}

fn print_report(report: &DatasetReport) {
    let header = format!(
        "{}: {} cases -> {}",
        report.name,
        report.cases,
        report.output.display()
    );
    match &report.status {
        Status::Identical => eprintln!("{} {}", header, "Files are identical".green()),
        Status::Unchecked => eprintln!("{} {}", header, "No expected output".cyan()),
        Status::Mismatch(mismatch) => eprintln!(
            "{} {}",
            header,
            format!("Files are not identical: {}", mismatch).red()
        ),
        Status::Failed { error } => eprintln!(
            "{} {}",
            header,
            format!("failed: {}", error).red().bold()
        ),
    }
}
