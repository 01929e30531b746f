pub mod export;
pub mod import;
mod matrix_graph;
mod pheromone_graph;

pub use export::{CsvSnapshotVisualizer, NullVisualizer, PheromoneVisualizer};
pub use matrix_graph::WeightedGraph;
pub use pheromone_graph::PheromoneGraph;

pub type Edge = (usize, usize);
