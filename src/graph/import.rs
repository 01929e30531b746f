mod edge_list;
mod error;
mod tsplib;

pub use edge_list::{import_edge_list, parse_edge_list};
pub use error::ImportError;
pub use tsplib::{import_tsplib, parse_tsplib};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::graph::WeightedGraph;

/// Supported problem files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemFormat {
    /// TSPLIB file with EUC_nD node coordinates.
    Tsp,
    /// `from,to,distance` rows.
    Csv,
}

impl ProblemFormat {
    /// Guesses the format from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for ProblemFormat {
    type Err = ImportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tsp" => Ok(ProblemFormat::Tsp),
            "csv" => Ok(ProblemFormat::Csv),
            _ => Err(ImportError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl fmt::Display for ProblemFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemFormat::Tsp => write!(f, "tsp"),
            ProblemFormat::Csv => write!(f, "csv"),
        }
    }
}

pub fn import_problem<P: AsRef<Path>>(
    path: P,
    format: ProblemFormat,
) -> Result<WeightedGraph, ImportError> {
    match format {
        ProblemFormat::Tsp => import_tsplib(path),
        ProblemFormat::Csv => import_edge_list(path),
    }
}
