use serde::{Deserialize, Serialize};

use crate::overwrite;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ColonyParams {
    pub ant_count: Option<usize>,
    pub thread_count: Option<usize>,
    /// Exponent of the pheromone in an ants score, α.
    pub trail_level_factor: Option<f64>,
    /// Exponent of the inverse edge weight in an ants score, β.
    pub attractiveness_factor: Option<f64>,
    /// Probability of an ACS ant to exploit the best edge instead of exploring, q0.
    pub explo_proportion_const: Option<f64>,
}

overwrite! {ColonyParams {
    ant_count,
    thread_count,
    trail_level_factor,
    attractiveness_factor,
    explo_proportion_const,
}}
