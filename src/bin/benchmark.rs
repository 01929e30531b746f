use clap::Parser;
use csv::Writer;
use std::error::Error;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use tsp_aco::benchmark::{average_error, read_cases, run_benchmark};
use tsp_aco::params::{Algorithm, Overwrite, SolvingParams};

#[derive(Parser)]
#[command(name = "benchmark")]
#[command(about = "Solves problems with known optimal tour lengths and reports the error")]
struct Cli {
    /// csv file with `name,path,optimum` rows, paths relative to this file
    cases: PathBuf,

    /// YAML file whose values override the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AS or ACS, overrides the configuration
    #[arg(short, long)]
    algorithm: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the results to this csv file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let mut params = SolvingParams::default_config()?;
    if let Some(path) = &cli.config {
        params.overwrite(&SolvingParams::from_file(path)?);
    }
    if let Some(algorithm) = &cli.algorithm {
        params.algorithm = Some(algorithm.parse::<Algorithm>()?);
    }

    let base = cli.cases.parent().unwrap_or_else(|| Path::new("."));
    let cases = read_cases(File::open(&cli.cases)?, base)?;
    let results = run_benchmark(&cases, &params, cli.seed.map(u128::from))?;

    for result in results.iter() {
        println!(
            "{} | iter: {} | length: {} | error: {:.2}%",
            result.name, result.iterations, result.length, result.error
        );
    }
    if let Some(error) = average_error(&results) {
        println!("average error: {:.2}%", error);
    }

    if let Some(path) = &cli.output {
        let mut writer = Writer::from_path(path)?;
        for result in results.iter() {
            writer.serialize(result)?;
        }
        writer.flush()?;
    }
    Ok(())
}
