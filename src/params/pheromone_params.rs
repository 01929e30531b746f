use serde::{Deserialize, Serialize};

use crate::overwrite;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct PheromoneParams {
    /// Evaporation used by the global update, ρ.
    pub evaporation_coef: Option<f64>,
    /// Decay used by the local update of the ACS.
    pub decay_coef: Option<f64>,
    /// Derive the initial amount from a nearest neighbor tour instead of reading it.
    pub calculate_initial_pheromone_amount: Option<bool>,
    pub initial_pheromone_amount: Option<f64>,
    /// Pheromone that is spread over each solution per update, divided by its length.
    pub pheromone_amount: Option<f64>,
}

overwrite! {PheromoneParams {
    evaporation_coef,
    decay_coef,
    calculate_initial_pheromone_amount,
    initial_pheromone_amount,
    pheromone_amount,
}}
