use csv::Writer;
use oorandom::Rand64;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{require, AcoError};
use crate::graph::{NullVisualizer, PheromoneGraph, PheromoneVisualizer, WeightedGraph};
use crate::metaheuristic::statistics::write_history;
use crate::metaheuristic::{
    AcsColony, AsColony, Colony, IterationRecord, Progress, Reinitializer, Solution,
    TerminationChecker, Tour,
};
use crate::params::{Algorithm, ColonyParams, SolvingParams};
use crate::rng::{preseeded_rng64, rng64};
use crate::util::Counter;

impl Algorithm {
    fn colony(self, params: &ColonyParams, master: &mut Rand64) -> Result<Box<dyn Colony>, AcoError> {
        Ok(match self {
            Algorithm::As => Box::new(AsColony::new(params, master)?),
            Algorithm::Acs => Box::new(AcsColony::new(params, master)?),
        })
    }

    /// Tours that take part in the global pheromone update.
    /// AS uses all of them, ACS only the iteration best.
    pub fn filter_solutions(self, solutions: Vec<Tour>, iteration_min: &Solution) -> Vec<Tour> {
        match self {
            Algorithm::As => solutions,
            Algorithm::Acs => iteration_min.tour().cloned().into_iter().collect(),
        }
    }

    pub fn update_pheromones(self, graph: &mut PheromoneGraph, tours: &[Tour]) -> Result<(), AcoError> {
        match self {
            Algorithm::As => graph.update_on_whole_graph(tours),
            Algorithm::Acs => graph.update_globally(tours),
        }
    }
}

/// Drives the colony until the termination rules fire and keeps the best tour found.
pub struct Solver {
    algorithm: Algorithm,
    params: SolvingParams,
    colony: Box<dyn Colony>,
    termination_checker: TerminationChecker,
    reinitializer: Reinitializer,
    iteration_counter: Counter,
    stagnation_counter: Counter,
    current_best: Solution,
    iteration_min: Solution,
    visualizer: Option<Box<dyn PheromoneVisualizer>>,
    history: Vec<IterationRecord>,
    record_history: bool,
    cancelled: Arc<AtomicBool>,
}

impl Solver {
    /// Builds the colony for the configured algorithm. Without a seed the ants are
    /// seeded from the operating system.
    pub fn new(params: SolvingParams, seed: Option<u128>) -> Result<Self, AcoError> {
        let algorithm = require(params.algorithm, "algorithm")?;
        let mut master = seed.map_or_else(preseeded_rng64, rng64);
        let colony = algorithm.colony(&params.colony_params, &mut master)?;
        Solver::with_colony(params, colony)
    }

    pub fn with_colony(params: SolvingParams, colony: Box<dyn Colony>) -> Result<Self, AcoError> {
        let algorithm = require(params.algorithm, "algorithm")?;
        let termination_checker = TerminationChecker::new(&params.termination_params)?;
        let reinitializer = Reinitializer::new(&params.reinitialization_params)?;

        Ok(Solver {
            algorithm,
            params,
            colony,
            termination_checker,
            reinitializer,
            iteration_counter: Counter::new(),
            stagnation_counter: Counter::new(),
            current_best: Solution::Infinite,
            iteration_min: Solution::Infinite,
            visualizer: None,
            history: Vec::new(),
            record_history: true,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Every pheromone update of following solves is passed to this visualizer.
    pub fn with_visualizer(mut self, visualizer: Box<dyn PheromoneVisualizer>) -> Self {
        self.visualizer = Some(visualizer);
        self
    }

    /// Skips the per iteration records, e.g. for long runs that only need the result.
    pub fn without_history(mut self) -> Self {
        self.record_history = false;
        self
    }

    /// Setting the flag stops a running solve at the next iteration boundary.
    /// The flag is cleared once a solve stopped because of it.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn current_iteration_count(&self) -> usize {
        self.iteration_counter.value()
    }

    pub fn best(&self) -> &Solution {
        &self.current_best
    }

    /// One record per iteration of the last solve, empty if recording is turned off.
    pub fn history(&self) -> &[IterationRecord] {
        &self.history
    }

    pub fn write_history<W: Write>(&self, writer: &mut Writer<W>) -> csv::Result<()> {
        write_history(&self.history, writer)
    }

    /// Searches for a short tour on the given graph. Returns [`Solution::Infinite`]
    /// if no valid tour was found at all.
    pub fn solve(&mut self, graph: Arc<WeightedGraph>) -> Result<Solution, AcoError> {
        self.reset()?;
        info!(
            algorithm = %self.algorithm,
            vertices = graph.vertex_count(),
            edges = graph.size(),
            "solving"
        );

        let visualizer = self
            .visualizer
            .take()
            .unwrap_or_else(|| Box::new(NullVisualizer));
        let mut pheromone_graph =
            PheromoneGraph::with_visualizer(graph, &self.params.pheromone_params, visualizer)?;
        let result = self.run(&mut pheromone_graph);
        self.visualizer = Some(pheromone_graph.into_visualizer());
        result?;

        info!(
            iterations = self.iteration_counter.value(),
            length = self.current_best.length(),
            "finished"
        );
        Ok(self.current_best.clone())
    }

    fn reset(&mut self) -> Result<(), AcoError> {
        self.termination_checker = TerminationChecker::new(&self.params.termination_params)?;
        self.iteration_counter.reset();
        self.stagnation_counter.reset();
        self.current_best = Solution::Infinite;
        self.iteration_min = Solution::Infinite;
        self.history.clear();
        Ok(())
    }

    fn progress(&self) -> Progress {
        Progress {
            iterations: self.iteration_counter.value(),
            best_length: self.current_best.length(),
            iteration_min_length: self.iteration_min.length(),
        }
    }

    fn run(&mut self, graph: &mut PheromoneGraph) -> Result<(), AcoError> {
        loop {
            let progress = self.progress();
            if self.termination_checker.terminated(&progress)? {
                break;
            }
            if self.cancelled.swap(false, Ordering::SeqCst) {
                info!(iteration = self.iteration_counter.value(), "cancelled");
                break;
            }
            let start = Instant::now();

            let solutions = self.colony.generate_solutions(graph)?;
            let valid_tours = solutions.len();
            self.postprocess(&solutions)?;
            let filtered = self.algorithm.filter_solutions(solutions, &self.iteration_min);
            self.algorithm.update_pheromones(graph, &filtered)?;

            self.iteration_counter.inc();
            let reinitialized = self.reinitializer.try_reinitialize(
                graph,
                &self.iteration_counter,
                &mut self.stagnation_counter,
            );

            let record = IterationRecord {
                iteration: self.iteration_counter.value(),
                valid_tours,
                iteration_min_length: self.iteration_min.length(),
                best_length: self.current_best.length(),
                stagnation: self.stagnation_counter.value(),
                reinitialized,
                elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
            };
            debug!(
                iteration = record.iteration,
                valid_tours,
                iteration_min = record.iteration_min_length,
                best = record.best_length,
                "iteration done"
            );
            if self.record_history {
                self.history.push(record);
            }
        }
        Ok(())
    }

    /// Finds the shortest tour of the iteration and promotes it if it beats the best one.
    fn postprocess(&mut self, solutions: &[Tour]) -> Result<(), AcoError> {
        let mut iteration_min = Solution::Infinite;
        for tour in solutions {
            let length = tour.length()?;
            if length < iteration_min.length() {
                iteration_min = Solution::Found {
                    tour: tour.clone(),
                    length,
                };
            }
        }
        self.iteration_min = iteration_min;

        if self.iteration_min.length() < self.current_best.length() {
            info!(
                iteration = self.iteration_counter.value() + 1,
                length = self.iteration_min.length(),
                "new best tour {}",
                self.iteration_min
            );
            self.current_best = self.iteration_min.clone();
            self.termination_checker.reset_in_row_count();
            self.stagnation_counter.reset();
        } else {
            self.stagnation_counter.inc();
        }
        Ok(())
    }
}
