pub mod benchmark;
pub mod error;
pub mod graph;
pub mod metaheuristic;
pub mod params;
pub mod rng;
pub mod util;

pub use error::AcoError;
