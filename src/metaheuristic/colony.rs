use oorandom::Rand64;
use std::panic;
use std::thread;
use tracing::trace;

use crate::error::{require, AcoError};
use crate::graph::PheromoneGraph;
use crate::metaheuristic::{Ant, Policy, Tour};
use crate::params::ColonyParams;
use crate::rng::{child_seed, rng64};

/// Generates one iteration's worth of tours.
pub trait Colony {
    /// Returns the valid tours the ants found, in ant order.
    fn generate_solutions(&mut self, graph: &mut PheromoneGraph) -> Result<Vec<Tour>, AcoError>;
}

/// Creates `ant_count` ants with the given policy, each with its own generator
/// seeded from `master`.
fn spawn_ants(
    policy: Policy,
    params: &ColonyParams,
    master: &mut Rand64,
) -> Result<Vec<Ant>, AcoError> {
    let ant_count = require(params.ant_count, "colony_params.ant_count")?;
    (0..ant_count)
        .map(|_| Ant::from_params(policy, params, Box::new(rng64(child_seed(master)))))
        .collect()
}

fn check_thread_count(thread_count: usize) -> Result<usize, AcoError> {
    if thread_count == 0 {
        return Err(AcoError::InvalidParameter(
            "colony_params.thread_count has to be at least 1".to_string(),
        ));
    }
    Ok(thread_count)
}

/// Sizes of `thread_count` contiguous chunks of `ant_count` ants.
/// The last chunk takes the remainder of the division.
fn chunk_sizes(ant_count: usize, thread_count: usize) -> Vec<usize> {
    let base = ant_count / thread_count;
    let mut sizes = vec![base; thread_count];
    if let Some(last) = sizes.last_mut() {
        *last += ant_count % thread_count;
    }
    sizes
}

fn valid_tours(ants: &mut [Ant], graph: &PheromoneGraph) -> Result<Vec<Tour>, AcoError> {
    let mut tours = Vec::with_capacity(ants.len());
    for ant in ants.iter_mut() {
        let tour = ant.find_tour(graph)?;
        trace!(valid = tour.is_valid(), "ant finished tour {}", tour);
        if tour.is_valid() {
            tours.push(tour);
        }
    }
    Ok(tours)
}

/// Ant System colony. Ants only read the pheromones, so they are split into contiguous
/// chunks that run on their own threads.
#[derive(Debug)]
pub struct AsColony {
    ants: Vec<Ant>,
    thread_count: usize,
}

impl AsColony {
    pub fn new(params: &ColonyParams, master: &mut Rand64) -> Result<Self, AcoError> {
        let thread_count = require(params.thread_count, "colony_params.thread_count")?;
        let ants = spawn_ants(Policy::RandomBiased, params, master)?;
        AsColony::from_ants(ants, thread_count)
    }

    pub fn from_ants(ants: Vec<Ant>, thread_count: usize) -> Result<Self, AcoError> {
        Ok(AsColony {
            ants,
            thread_count: check_thread_count(thread_count)?,
        })
    }

    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }
}

impl Colony for AsColony {
    fn generate_solutions(&mut self, graph: &mut PheromoneGraph) -> Result<Vec<Tour>, AcoError> {
        let graph: &PheromoneGraph = graph;
        if self.thread_count == 1 {
            return valid_tours(&mut self.ants, graph);
        }

        let sizes = chunk_sizes(self.ants.len(), self.thread_count);
        thread::scope(|scope| {
            let mut rest = self.ants.as_mut_slice();
            let mut handles = Vec::with_capacity(sizes.len());
            for size in sizes {
                let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(size);
                rest = tail;
                handles.push(scope.spawn(move || valid_tours(chunk, graph)));
            }

            let mut tours = Vec::new();
            for handle in handles {
                match handle.join() {
                    Ok(chunk_tours) => tours.extend(chunk_tours?),
                    Err(payload) => panic::resume_unwind(payload),
                }
            }
            Ok(tours)
        })
    }
}

/// Ant Colony System colony. Every ant applies the local update before the next one
/// starts, so ants run one after another in index order.
#[derive(Debug)]
pub struct AcsColony {
    ants: Vec<Ant>,
}

impl AcsColony {
    pub fn new(params: &ColonyParams, master: &mut Rand64) -> Result<Self, AcoError> {
        let ants = spawn_ants(Policy::ExploitOrExplore, params, master)?;
        Ok(AcsColony::from_ants(ants))
    }

    pub fn from_ants(ants: Vec<Ant>) -> Self {
        AcsColony { ants }
    }

    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }
}

impl Colony for AcsColony {
    fn generate_solutions(&mut self, graph: &mut PheromoneGraph) -> Result<Vec<Tour>, AcoError> {
        let mut tours = Vec::with_capacity(self.ants.len());
        for ant in self.ants.iter_mut() {
            let tour = ant.find_tour(graph)?;
            graph.update_locally(&tour);
            trace!(valid = tour.is_valid(), "ant finished tour {}", tour);
            if tour.is_valid() {
                tours.push(tour);
            }
        }
        Ok(tours)
    }
}
