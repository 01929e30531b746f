use tracing::debug;

use crate::error::{require, AcoError};
use crate::graph::PheromoneGraph;
use crate::params::{ReinitializationParams, ReinitializationRule};
use crate::util::Counter;

type RuleCheck = fn(&Reinitializer, &Counter, &Counter) -> bool;

const RULES: [(ReinitializationRule, RuleCheck); 2] = [
    (ReinitializationRule::FIXED, Reinitializer::reached_iter_increment),
    (
        ReinitializationRule::STAGNATION,
        Reinitializer::reached_stagnation_ceiling,
    ),
];

/// Resets the pheromones when the search runs for a fixed number of iterations
/// or stops improving.
#[derive(Debug, Clone)]
pub struct Reinitializer {
    rule: ReinitializationRule,
    iter_increment: usize,
    stagnation_ceiling: usize,
}

impl Reinitializer {
    pub fn new(params: &ReinitializationParams) -> Result<Self, AcoError> {
        let rule = params.reinitialization_rule.unwrap_or_default();

        let iter_increment = if rule.contains(ReinitializationRule::FIXED) {
            let increment = require(params.iter_increment, "reinitialization_params.iter_increment")?;
            if increment == 0 {
                return Err(AcoError::InvalidParameter(
                    "reinitialization_params.iter_increment has to be at least 1".to_string(),
                ));
            }
            increment
        } else {
            0
        };
        let stagnation_ceiling = if rule.contains(ReinitializationRule::STAGNATION) {
            require(
                params.stagnation_ceiling,
                "reinitialization_params.stagnation_ceiling",
            )?
        } else {
            0
        };

        Ok(Reinitializer {
            rule,
            iter_increment,
            stagnation_ceiling,
        })
    }

    /// Reinitializes the graph and resets the stagnation counter if a rule fires.
    pub fn try_reinitialize(
        &self,
        graph: &mut PheromoneGraph,
        iterations: &Counter,
        stagnation: &mut Counter,
    ) -> bool {
        let fired = RULES.iter().any(|(flag, check)| {
            self.rule.contains(*flag) && check(self, iterations, &*stagnation)
        });
        if fired {
            debug!(
                iteration = iterations.value(),
                stagnation = stagnation.value(),
                "reinitializing pheromones"
            );
            graph.reinitialize();
            stagnation.reset();
        }
        fired
    }

    fn reached_iter_increment(&self, iterations: &Counter, _stagnation: &Counter) -> bool {
        iterations.value() % self.iter_increment == 0
    }

    fn reached_stagnation_ceiling(&self, _iterations: &Counter, stagnation: &Counter) -> bool {
        stagnation.value() >= self.stagnation_ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;
    use crate::params::PheromoneParams;
    use std::sync::Arc;

    fn pheromone_graph() -> PheromoneGraph {
        let params = PheromoneParams {
            evaporation_coef: Some(0.5),
            decay_coef: Some(0.1),
            calculate_initial_pheromone_amount: Some(false),
            initial_pheromone_amount: Some(2.0),
            pheromone_amount: Some(1.0),
        };
        let graph = WeightedGraph::from_matrix(vec![vec![1.0, 1.0], vec![1.0, 1.0]]).unwrap();
        let mut graph = PheromoneGraph::new(Arc::new(graph), &params).unwrap();
        graph.update_globally(&[]).unwrap();
        graph
    }

    fn counter(value: usize) -> Counter {
        let mut counter = Counter::new();
        for _ in 0..value {
            counter.inc();
        }
        counter
    }

    fn reinitializer(rule: ReinitializationRule) -> Reinitializer {
        Reinitializer::new(&ReinitializationParams {
            reinitialization_rule: Some(rule),
            iter_increment: Some(5),
            stagnation_ceiling: Some(3),
        })
        .unwrap()
    }

    #[test]
    fn fixed_rule_works() {
        let reinitializer = reinitializer(ReinitializationRule::FIXED);
        let mut graph = pheromone_graph();
        let mut stagnation = counter(2);

        assert!(!reinitializer.try_reinitialize(&mut graph, &counter(4), &mut stagnation));
        assert_eq!(graph.pheromone(0, 1), 1.0);

        assert!(reinitializer.try_reinitialize(&mut graph, &counter(10), &mut stagnation));
        assert_eq!(graph.pheromone(0, 1), 2.0);
        assert_eq!(stagnation.value(), 0);
    }

    #[test]
    fn stagnation_rule_works() {
        let reinitializer = reinitializer(ReinitializationRule::STAGNATION);
        let mut graph = pheromone_graph();

        assert!(!reinitializer.try_reinitialize(&mut graph, &counter(5), &mut counter(2)));

        let mut stagnation = counter(3);
        assert!(reinitializer.try_reinitialize(&mut graph, &counter(1), &mut stagnation));
        assert_eq!(stagnation.value(), 0);
        assert_eq!(graph.pheromone(1, 1), 2.0);
    }

    #[test]
    fn none_rule_never_fires() {
        let reinitializer = reinitializer(ReinitializationRule::NONE);
        let mut graph = pheromone_graph();
        let mut stagnation = counter(100);

        assert!(!reinitializer.try_reinitialize(&mut graph, &counter(5), &mut stagnation));
        assert!(!Reinitializer::new(&ReinitializationParams::default())
            .unwrap()
            .try_reinitialize(&mut graph, &counter(0), &mut stagnation));
        assert_eq!(stagnation.value(), 100);
        assert_eq!(graph.pheromone(0, 0), 1.0);
    }

    #[test]
    fn zero_increment_errors() {
        let err = Reinitializer::new(&ReinitializationParams {
            reinitialization_rule: Some(ReinitializationRule::FIXED),
            iter_increment: Some(0),
            stagnation_ceiling: None,
        })
        .err();

        assert!(matches!(err, Some(AcoError::InvalidParameter(_))));
    }
}
