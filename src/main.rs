use clap::Parser;
use csv::Writer;
use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use tsp_aco::benchmark::relative_error;
use tsp_aco::graph::import::{import_problem, ProblemFormat};
use tsp_aco::graph::CsvSnapshotVisualizer;
use tsp_aco::metaheuristic::{Solution, Solver};
use tsp_aco::params::{Algorithm, Overwrite, SolvingParams};

#[derive(Parser)]
#[command(name = "tsp_aco")]
#[command(about = "Traveling salesman tours by ant colony optimization")]
#[command(version)]
struct Cli {
    /// Problem file, TSPLIB (EUC_nD) or a csv edge list
    problem: PathBuf,

    /// tsp or csv, guessed from the file extension if missing
    #[arg(short, long)]
    format: Option<String>,

    /// YAML file whose values override the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AS or ACS, overrides the configuration
    #[arg(short, long)]
    algorithm: Option<String>,

    /// Random seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Write per iteration statistics to this csv file
    #[arg(long)]
    stats: Option<PathBuf>,

    /// Write every pheromone matrix to this csv file
    #[arg(long)]
    snapshots: Option<PathBuf>,

    /// Length of the optimal tour, prints how far above it the found tour is
    #[arg(long)]
    optimum: Option<f64>,

    /// Print the merged configuration before solving
    #[arg(long)]
    print_config: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_params(cli: &Cli) -> Result<SolvingParams, Box<dyn Error>> {
    let mut params = SolvingParams::default_config()?;
    if let Some(path) = &cli.config {
        params.overwrite(&SolvingParams::from_file(path)?);
    }
    if let Some(algorithm) = &cli.algorithm {
        params.algorithm = Some(algorithm.parse::<Algorithm>()?);
    }
    Ok(params)
}

fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    let format = match &cli.format {
        Some(format) => format.parse::<ProblemFormat>()?,
        None => ProblemFormat::from_path(&cli.problem)
            .ok_or("could not guess the problem format, pass --format")?,
    };
    let graph = Arc::new(import_problem(&cli.problem, format)?);

    let params = load_params(cli)?;
    if cli.print_config {
        print!("{}", params.to_yaml_string()?);
    }

    let mut solver = Solver::new(params, cli.seed.map(u128::from))?;
    if let Some(path) = &cli.snapshots {
        let writer = Writer::from_writer(BufWriter::new(File::create(path)?));
        solver = solver.with_visualizer(Box::new(CsvSnapshotVisualizer::new(writer)));
    }

    let solution = solver.solve(graph)?;
    match &solution {
        Solution::Infinite => println!(
            "No valid tour found in {} iterations.",
            solver.current_iteration_count()
        ),
        Solution::Found { tour, length } => {
            println!("Best length: {}", length);
            println!("Iterations:  {}", solver.current_iteration_count());
            println!("Tour:        {}", tour);
            if let Some(optimum) = cli.optimum {
                println!("Error:       {:.2}%", relative_error(optimum, *length));
            }
        }
    }

    if let Some(path) = &cli.stats {
        let mut writer = Writer::from_path(path)?;
        solver.write_history(&mut writer)?;
    }
    Ok(())
}
