use serde::{Deserialize, Serialize};

use crate::{overwrite, rule_flags};

rule_flags! {
    /// Conditions that reset every pheromone to the initial amount.
    ReinitializationRule {
        FIXED = 1, "fixed";
        STAGNATION = 2, "stagnation";
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReinitializationParams {
    pub reinitialization_rule: Option<ReinitializationRule>,
    pub iter_increment: Option<usize>,
    pub stagnation_ceiling: Option<usize>,
}

overwrite! {ReinitializationParams {
    reinitialization_rule,
    iter_increment,
    stagnation_ceiling,
}}
