//! Solves problems with known optimal tour lengths and reports how far off the
//! found tours are.

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use thiserror::Error;
use tracing::info;

use crate::error::AcoError;
use crate::graph::import::{import_problem, ImportError, ProblemFormat};
use crate::graph::WeightedGraph;
use crate::metaheuristic::Solver;
use crate::params::SolvingParams;

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("invalid benchmark list: {0}")]
    Csv(#[from] csv::Error),
    #[error("{name}: {source}")]
    Import { name: String, source: ImportError },
    #[error("{name}: {source}")]
    Solve { name: String, source: AcoError },
}

/// A problem file and the length of its optimal tour.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkCase {
    pub name: String,
    pub path: PathBuf,
    pub optimum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub name: String,
    pub iterations: usize,
    pub length: f64,
    /// Percent above the optimum.
    pub error: f64,
}

/// How many percent `length` lies above `optimum`.
pub fn relative_error(optimum: f64, length: f64) -> f64 {
    length / (optimum / 100.0) - 100.0
}

pub fn average_error(results: &[BenchmarkResult]) -> Option<f64> {
    if results.is_empty() {
        return None;
    }
    Some(results.iter().map(|result| result.error).sum::<f64>() / results.len() as f64)
}

/// Reads `name,path,optimum` rows with a header line. Relative paths are resolved
/// against `base`.
pub fn read_cases<R: Read>(reader: R, base: &Path) -> Result<Vec<BenchmarkCase>, BenchmarkError> {
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut cases = Vec::new();
    for row in reader.deserialize() {
        let mut case: BenchmarkCase = row?;
        if case.path.is_relative() {
            case.path = base.join(&case.path);
        }
        cases.push(case);
    }
    Ok(cases)
}

pub fn solve_case(
    name: &str,
    graph: Arc<WeightedGraph>,
    optimum: f64,
    params: &SolvingParams,
    seed: Option<u128>,
) -> Result<BenchmarkResult, AcoError> {
    let mut solver = Solver::new(params.clone(), seed)?;
    let length = solver.solve(graph)?.length();
    let result = BenchmarkResult {
        name: name.to_string(),
        iterations: solver.current_iteration_count(),
        length,
        error: relative_error(optimum, length),
    };
    info!(
        name,
        iterations = result.iterations,
        length,
        error = result.error,
        "benchmark case done"
    );
    Ok(result)
}

/// Solves every case on its own thread. Results are in case order.
pub fn run_benchmark(
    cases: &[BenchmarkCase],
    params: &SolvingParams,
    seed: Option<u128>,
) -> Result<Vec<BenchmarkResult>, BenchmarkError> {
    thread::scope(|scope| {
        let handles: Vec<_> = cases
            .iter()
            .map(|case| scope.spawn(move || run_case(case, params, seed)))
            .collect();

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            match handle.join() {
                Ok(result) => results.push(result?),
                Err(payload) => panic::resume_unwind(payload),
            }
        }
        Ok(results)
    })
}

fn run_case(
    case: &BenchmarkCase,
    params: &SolvingParams,
    seed: Option<u128>,
) -> Result<BenchmarkResult, BenchmarkError> {
    let import_error = |source| BenchmarkError::Import {
        name: case.name.clone(),
        source,
    };
    let format = ProblemFormat::from_path(&case.path).ok_or_else(|| {
        import_error(ImportError::UnsupportedFormat(case.path.display().to_string()))
    })?;
    let graph = import_problem(&case.path, format).map_err(import_error)?;

    solve_case(&case.name, Arc::new(graph), case.optimum, params, seed).map_err(|source| {
        BenchmarkError::Solve {
            name: case.name.clone(),
            source,
        }
    })
}
