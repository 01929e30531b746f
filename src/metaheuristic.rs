mod ant;
mod colony;
mod reinitialization;
mod solution;
mod solver;
mod statistics;
mod termination;
mod tour;

pub use ant::{nearest_neighbor_tour, Ant, Policy};
pub use colony::{AcsColony, AsColony, Colony};
pub use reinitialization::Reinitializer;
pub use solution::Solution;
pub use solver::Solver;
pub use statistics::{write_history, IterationRecord};
pub use termination::{Progress, TerminationChecker};
pub use tour::Tour;
