use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{require, AcoError};
use crate::graph::{Edge, NullVisualizer, PheromoneVisualizer, WeightedGraph};
use crate::metaheuristic::{nearest_neighbor_tour, Tour};
use crate::params::PheromoneParams;

/// Pheromone never drops below the initial amount divided by this.
const MINIMUM_PHEROMONE_DIVISOR: f64 = 1000.0;

/// A weighted graph together with the pheromone matrix the ants communicate through.
///
/// All pheromone values stay at or above [`PheromoneGraph::minimum_pheromone_amount`]
/// after every update. The attached [`PheromoneVisualizer`] sees the matrix after
/// each mutation.
pub struct PheromoneGraph {
    graph: Arc<WeightedGraph>,
    pheromones: Vec<Vec<f64>>,
    evaporation_coef: f64,
    decay_coef: f64,
    initial_pheromone_amount: f64,
    pheromone_amount: f64,
    minimum_pheromone_amount: f64,
    visualizer: Box<dyn PheromoneVisualizer>,
}

impl PheromoneGraph {
    pub fn new(graph: Arc<WeightedGraph>, params: &PheromoneParams) -> Result<Self, AcoError> {
        PheromoneGraph::with_visualizer(graph, params, Box::new(NullVisualizer))
    }

    pub fn with_visualizer(
        graph: Arc<WeightedGraph>,
        params: &PheromoneParams,
        visualizer: Box<dyn PheromoneVisualizer>,
    ) -> Result<Self, AcoError> {
        let evaporation_coef = require(params.evaporation_coef, "pheromone_params.evaporation_coef")?;
        let decay_coef = require(params.decay_coef, "pheromone_params.decay_coef")?;
        let pheromone_amount = require(params.pheromone_amount, "pheromone_params.pheromone_amount")?;

        let initial_pheromone_amount = if params.calculate_initial_pheromone_amount.unwrap_or(false) {
            initial_amount_from_nearest_neighbor(&graph)?
        } else {
            require(
                params.initial_pheromone_amount,
                "pheromone_params.initial_pheromone_amount",
            )?
        };
        if !initial_pheromone_amount.is_finite() || initial_pheromone_amount <= 0.0 {
            return Err(AcoError::InvalidParameter(format!(
                "initial pheromone amount has to be positive and finite, got {}",
                initial_pheromone_amount
            )));
        }

        let vertex_count = graph.vertex_count();
        Ok(PheromoneGraph {
            graph,
            pheromones: vec![vec![initial_pheromone_amount; vertex_count]; vertex_count],
            evaporation_coef,
            decay_coef,
            initial_pheromone_amount,
            pheromone_amount,
            minimum_pheromone_amount: initial_pheromone_amount / MINIMUM_PHEROMONE_DIVISOR,
            visualizer,
        })
    }

    /// Gives back the visualizer, e.g. to read what it collected.
    pub fn into_visualizer(self) -> Box<dyn PheromoneVisualizer> {
        self.visualizer
    }

    pub fn graph(&self) -> &Arc<WeightedGraph> {
        &self.graph
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.graph.weight(from, to)
    }

    pub fn pheromone(&self, from: usize, to: usize) -> f64 {
        self.pheromones[from][to]
    }

    pub fn pheromones(&self) -> &[Vec<f64>] {
        &self.pheromones
    }

    pub fn initial_pheromone_amount(&self) -> f64 {
        self.initial_pheromone_amount
    }

    pub fn minimum_pheromone_amount(&self) -> f64 {
        self.minimum_pheromone_amount
    }

    /// Local update of the ACS, applied to the edges of a single freshly built tour.
    pub fn update_locally(&mut self, tour: &Tour) {
        for (from, to) in tour.iter_closed_edges() {
            let pheromone = &mut self.pheromones[from][to];
            *pheromone = ((1.0 - self.decay_coef) * *pheromone
                + self.decay_coef * self.initial_pheromone_amount)
                .max(self.minimum_pheromone_amount);
        }
        self.refresh();
    }

    /// Global update of the ACS. Every tour deposits on all its edges, closing edge
    /// included, and the deposit is scaled by the evaporation coefficient.
    pub fn update_globally(&mut self, tours: &[Tour]) -> Result<(), AcoError> {
        trace!(tours = tours.len(), "global pheromone update");
        let change = self.pheromone_change(tours, Tour::iter_closed_edges)?;
        let keep = 1.0 - self.evaporation_coef;
        for (row, change_row) in self.pheromones.iter_mut().zip(change.iter()) {
            for (pheromone, change) in row.iter_mut().zip(change_row.iter()) {
                *pheromone = (keep * *pheromone + self.evaporation_coef * change)
                    .max(self.minimum_pheromone_amount);
            }
        }
        self.refresh();
        Ok(())
    }

    /// Update of the AS. Tours deposit on consecutive edges only and the deposit is added
    /// to the evaporated matrix as is.
    pub fn update_on_whole_graph(&mut self, tours: &[Tour]) -> Result<(), AcoError> {
        trace!(tours = tours.len(), "pheromone update on whole graph");
        let change = self.pheromone_change(tours, Tour::iter_edges)?;
        let keep = 1.0 - self.evaporation_coef;
        for (row, change_row) in self.pheromones.iter_mut().zip(change.iter()) {
            for (pheromone, change) in row.iter_mut().zip(change_row.iter()) {
                *pheromone = (keep * *pheromone + change).max(self.minimum_pheromone_amount);
            }
        }
        self.refresh();
        Ok(())
    }

    /// Sets every pheromone back to the initial amount.
    pub fn reinitialize(&mut self) {
        debug!("reinitializing pheromones to {}", self.initial_pheromone_amount);
        for row in self.pheromones.iter_mut() {
            for pheromone in row.iter_mut() {
                *pheromone = self.initial_pheromone_amount;
            }
        }
        self.refresh();
    }

    fn pheromone_change<'t, I, F>(&self, tours: &'t [Tour], edges: F) -> Result<Vec<Vec<f64>>, AcoError>
    where
        I: Iterator<Item = Edge> + 't,
        F: Fn(&'t Tour) -> I,
    {
        let vertex_count = self.vertex_count();
        let mut change = vec![vec![0.0; vertex_count]; vertex_count];
        for tour in tours {
            let deposit = self.pheromone_amount / tour.length()?;
            for (from, to) in edges(tour) {
                change[from][to] += deposit;
            }
        }
        Ok(change)
    }

    fn refresh(&mut self) {
        self.visualizer.refresh(&self.pheromones);
    }
}

/// 1 / (n * L) where L is the length of the nearest neighbor tour starting at vertex 0.
fn initial_amount_from_nearest_neighbor(graph: &Arc<WeightedGraph>) -> Result<f64, AcoError> {
    let tour = nearest_neighbor_tour(graph, 0)?;
    let length = tour.length()?;
    let initial = 1.0 / (graph.vertex_count() as f64 * length);
    debug!(
        "nearest neighbor tour has length {}, initial pheromone is {}",
        length, initial
    );
    Ok(initial)
}

impl fmt::Debug for PheromoneGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PheromoneGraph")
            .field("graph", &self.graph)
            .field("pheromones", &self.pheromones)
            .field("evaporation_coef", &self.evaporation_coef)
            .field("decay_coef", &self.decay_coef)
            .field("initial_pheromone_amount", &self.initial_pheromone_amount)
            .field("pheromone_amount", &self.pheromone_amount)
            .field("minimum_pheromone_amount", &self.minimum_pheromone_amount)
            .finish()
    }
}
