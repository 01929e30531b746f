use serde::{Deserialize, Serialize};

use crate::{overwrite, rule_flags};

rule_flags! {
    /// Conditions that end a solve. Any one of them is enough.
    TerminationRule {
        FIXED = 1, "fixed";
        WITHIN_PERCENTAGE = 2, "within_percentage";
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct TerminationParams {
    pub termination_rule: Option<TerminationRule>,
    pub iteration_count: Option<usize>,
    pub ceiling_percentage: Option<f64>,
    pub in_row_termination_count: Option<usize>,
}

overwrite! {TerminationParams {
    termination_rule,
    iteration_count,
    ceiling_percentage,
    in_row_termination_count,
}}
