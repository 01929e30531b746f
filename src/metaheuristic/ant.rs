use std::fmt;
use std::sync::Arc;

use crate::error::{require, AcoError};
use crate::graph::{PheromoneGraph, WeightedGraph};
use crate::metaheuristic::Tour;
use crate::params::ColonyParams;
use crate::rng::RandomSource;
use crate::util::{choose_weight_biased, index_of_max};

/// How an ant picks the next vertex out of the reachable, unvisited ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Cheapest edge, first one on ties.
    NearestNeighbor,
    /// Draw proportional to the edge score (AS).
    RandomBiased,
    /// Take the best scored edge with probability q0, draw like `RandomBiased` otherwise (ACS).
    ExploitOrExplore,
}

/// Agent that builds one tour per call to [`Ant::find_tour`].
pub struct Ant {
    policy: Policy,
    trail_level_factor: f64,
    attractiveness_factor: f64,
    explo_proportion_const: f64,
    rng: Box<dyn RandomSource + Send>,
    current_vertex: usize,
    last_tour: Option<Tour>,
}

impl Ant {
    pub fn new(
        policy: Policy,
        trail_level_factor: f64,
        attractiveness_factor: f64,
        explo_proportion_const: f64,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        Ant {
            policy,
            trail_level_factor,
            attractiveness_factor,
            explo_proportion_const,
            rng,
            current_vertex: 0,
            last_tour: None,
        }
    }

    /// Reads the factors this policy needs. q0 is only required by `ExploitOrExplore`.
    pub fn from_params(
        policy: Policy,
        params: &ColonyParams,
        rng: Box<dyn RandomSource + Send>,
    ) -> Result<Self, AcoError> {
        if policy == Policy::NearestNeighbor {
            return Ok(Ant::nearest_neighbor(rng));
        }

        let trail_level_factor = require(params.trail_level_factor, "colony_params.trail_level_factor")?;
        let attractiveness_factor = require(
            params.attractiveness_factor,
            "colony_params.attractiveness_factor",
        )?;
        let explo_proportion_const = match policy {
            Policy::ExploitOrExplore => require(
                params.explo_proportion_const,
                "colony_params.explo_proportion_const",
            )?,
            _ => 0.0,
        };

        Ok(Ant::new(
            policy,
            trail_level_factor,
            attractiveness_factor,
            explo_proportion_const,
            rng,
        ))
    }

    pub fn nearest_neighbor(rng: Box<dyn RandomSource + Send>) -> Self {
        Ant::new(Policy::NearestNeighbor, 0.0, 0.0, 0.0, rng)
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn current_vertex(&self) -> usize {
        self.current_vertex
    }

    pub fn last_tour(&self) -> Option<&Tour> {
        self.last_tour.as_ref()
    }

    /// Builds a tour from a uniformly drawn start vertex until every vertex is visited
    /// or no unvisited neighbor is left. The result may be incomplete.
    pub fn find_tour(&mut self, graph: &PheromoneGraph) -> Result<Tour, AcoError> {
        let tour = if graph.vertex_count() == 0 {
            Tour::new(graph.graph().clone())
        } else {
            let start = self.rng.next_int(0, graph.vertex_count());
            build_tour(graph.graph().clone(), start, |current, candidates| {
                self.choose_next(graph, current, candidates)
            })?
        };

        if let Some(last) = tour.vertices().last() {
            self.current_vertex = *last;
        }
        self.last_tour = Some(tour.clone());
        Ok(tour)
    }

    fn choose_next(&mut self, graph: &PheromoneGraph, current: usize, candidates: &[usize]) -> usize {
        match self.policy {
            Policy::NearestNeighbor => nearest(graph.graph(), current, candidates),
            Policy::RandomBiased => {
                let scores = self.scores(graph, current, candidates);
                candidates[choose_weight_biased(&scores, &mut *self.rng)]
            }
            Policy::ExploitOrExplore => {
                let scores = self.scores(graph, current, candidates);
                if self.rng.next_double() <= self.explo_proportion_const {
                    candidates[index_of_max(&scores)]
                } else {
                    candidates[choose_weight_biased(&scores, &mut *self.rng)]
                }
            }
        }
    }

    fn scores(&self, graph: &PheromoneGraph, current: usize, candidates: &[usize]) -> Vec<f64> {
        candidates
            .iter()
            .map(|next| self.score_edge(graph, current, *next))
            .collect()
    }

    /// pheromone^α * (1 / weight)^β
    fn score_edge(&self, graph: &PheromoneGraph, from: usize, to: usize) -> f64 {
        let attractiveness = 1.0 / graph.weight(from, to);
        let trail_level = graph.pheromone(from, to);
        trail_level.powf(self.trail_level_factor) * attractiveness.powf(self.attractiveness_factor)
    }
}

impl fmt::Debug for Ant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ant")
            .field("policy", &self.policy)
            .field("trail_level_factor", &self.trail_level_factor)
            .field("attractiveness_factor", &self.attractiveness_factor)
            .field("explo_proportion_const", &self.explo_proportion_const)
            .field("current_vertex", &self.current_vertex)
            .field("last_tour", &self.last_tour)
            .finish()
    }
}

/// Greedy tour that always follows the cheapest edge to an unvisited vertex.
pub fn nearest_neighbor_tour(graph: &Arc<WeightedGraph>, start: usize) -> Result<Tour, AcoError> {
    build_tour(graph.clone(), start, |current, candidates| {
        nearest(graph, current, candidates)
    })
}

fn build_tour<F>(graph: Arc<WeightedGraph>, start: usize, mut choose: F) -> Result<Tour, AcoError>
where
    F: FnMut(usize, &[usize]) -> usize,
{
    let mut tour = Tour::new(graph);
    tour.add(start)?;
    let mut current = start;

    while !tour.has_all_vertices() {
        let candidates = tour.next_possible_vertices();
        if candidates.is_empty() {
            break;
        }
        current = choose(current, &candidates);
        tour.add(current)?;
    }

    Ok(tour)
}

fn nearest(graph: &WeightedGraph, current: usize, candidates: &[usize]) -> usize {
    let mut best = candidates[0];
    for candidate in candidates.iter().skip(1) {
        if graph.weight(current, *candidate) < graph.weight(current, best) {
            best = *candidate;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::PheromoneParams;
    use crate::rng::{rng64, ScriptedRandom};

    fn colony_params() -> ColonyParams {
        ColonyParams {
            trail_level_factor: Some(2.0),
            attractiveness_factor: Some(4.0),
            explo_proportion_const: Some(0.9),
            ..Default::default()
        }
    }

    fn pheromone_graph(weights: Vec<Vec<f64>>) -> PheromoneGraph {
        let params = PheromoneParams {
            evaporation_coef: Some(0.1),
            decay_coef: Some(0.1),
            calculate_initial_pheromone_amount: Some(true),
            initial_pheromone_amount: None,
            pheromone_amount: Some(1.0),
        };
        PheromoneGraph::new(Arc::new(WeightedGraph::from_matrix(weights).unwrap()), &params)
            .unwrap()
    }

    fn three_vertex_graph() -> PheromoneGraph {
        pheromone_graph(vec![
            vec![1.0, 2.0, 5.0],
            vec![6.0, 2.0, 3.0],
            vec![2.0, 7.0, 1.0],
        ])
    }

    fn ant(policy: Policy, rng: ScriptedRandom) -> Ant {
        Ant::from_params(policy, &colony_params(), Box::new(rng)).unwrap()
    }

    #[test]
    fn exploring_acs_ant_works() {
        let graph = three_vertex_graph();
        let mut ant = ant(
            Policy::ExploitOrExplore,
            ScriptedRandom::new(vec![0], vec![0.99, 0.98, 0.97, 0.1]),
        );
        let tour = ant.find_tour(&graph).unwrap();

        assert_eq!(tour.vertices(), &[0, 2, 1]);
        assert_eq!(ant.current_vertex(), 1);
    }

    #[test]
    fn exploiting_acs_ant_works() {
        let graph = three_vertex_graph();
        let mut ant = ant(
            Policy::ExploitOrExplore,
            ScriptedRandom::new(vec![2], vec![0.6, 0.7]),
        );
        ant.find_tour(&graph).unwrap();

        assert_eq!(ant.last_tour().unwrap().vertices(), &[2, 0, 1]);
    }

    #[test]
    fn as_ant_works() {
        let graph = pheromone_graph(vec![vec![1.0, 2.0], vec![3.0, 2.0]]);
        let mut ant = ant(Policy::RandomBiased, ScriptedRandom::new(vec![1], vec![0.3]));
        let tour = ant.find_tour(&graph).unwrap();

        assert_eq!(tour.vertices(), &[1, 0]);
        assert!(tour.is_valid());
    }

    #[test]
    fn as_ant_prefers_short_edges() {
        let graph = three_vertex_graph();
        // from 0 the scores of 1 and 2 are 1/16 and 1/625
        let mut ant = ant(Policy::RandomBiased, ScriptedRandom::new(vec![0], vec![0.5, 0.5]));

        assert_eq!(ant.find_tour(&graph).unwrap().vertices(), &[0, 1, 2]);
    }

    #[test]
    fn as_ant_takes_zero_length_edge() {
        let weights = WeightedGraph::from_matrix(vec![
            vec![f64::NAN, 0.0, 100.0],
            vec![1.0, f64::NAN, 1.0],
            vec![1.0, 1.0, f64::NAN],
        ])
        .unwrap();
        let params = PheromoneParams {
            evaporation_coef: Some(0.1),
            decay_coef: Some(0.1),
            calculate_initial_pheromone_amount: Some(false),
            initial_pheromone_amount: Some(1.0),
            pheromone_amount: Some(1.0),
        };
        let graph = PheromoneGraph::new(Arc::new(weights), &params).unwrap();
        let mut ant = ant(Policy::RandomBiased, ScriptedRandom::new(vec![0], vec![0.6, 0.5]));

        assert_eq!(ant.find_tour(&graph).unwrap().vertices(), &[0, 1, 2]);
    }

    #[test]
    fn nearest_neighbor_ant_works() {
        let graph = three_vertex_graph();
        let mut ant = Ant::nearest_neighbor(Box::new(ScriptedRandom::new(vec![1], Vec::new())));
        let tour = ant.find_tour(&graph).unwrap();

        assert_eq!(tour.vertices(), &[1, 2, 0]);
    }

    #[test]
    fn nearest_neighbor_tour_works() {
        let graph = three_vertex_graph();
        let tour = nearest_neighbor_tour(graph.graph(), 0).unwrap();

        assert_eq!(tour.vertices(), &[0, 1, 2]);
        assert_eq!(tour.length(), Ok(7.0));
    }

    #[test]
    fn ant_stops_at_dead_end() {
        let weights = WeightedGraph::from_matrix(vec![
            vec![f64::NAN, 1.0, f64::NAN],
            vec![1.0, f64::NAN, f64::NAN],
            vec![1.0, 1.0, f64::NAN],
        ])
        .unwrap();
        let params = PheromoneParams {
            evaporation_coef: Some(0.1),
            decay_coef: Some(0.1),
            calculate_initial_pheromone_amount: Some(false),
            initial_pheromone_amount: Some(1.0),
            pheromone_amount: Some(1.0),
        };
        let graph = PheromoneGraph::new(Arc::new(weights), &params).unwrap();
        let mut ant = ant(Policy::ExploitOrExplore, ScriptedRandom::new(vec![0], vec![0.1]));
        let tour = ant.find_tour(&graph).unwrap();

        assert_eq!(tour.vertices(), &[0, 1]);
        assert!(tour.has_dead_end());
        assert!(!tour.is_valid());
    }

    #[test]
    fn seeded_ant_finds_complete_tour() {
        let graph = three_vertex_graph();
        let mut ant = Ant::from_params(Policy::RandomBiased, &colony_params(), Box::new(rng64(5)))
            .unwrap();

        for _ in 0..20 {
            assert!(ant.find_tour(&graph).unwrap().is_valid());
        }
    }

    #[test]
    fn missing_factor_errors() {
        let params = ColonyParams {
            trail_level_factor: Some(1.0),
            ..Default::default()
        };
        let err = Ant::from_params(Policy::RandomBiased, &params, Box::new(rng64(1))).err();

        assert_eq!(
            err,
            Some(AcoError::MissingParameter("colony_params.attractiveness_factor"))
        );
    }
}
