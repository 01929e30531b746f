use crate::error::{require, AcoError};
use crate::params::{TerminationParams, TerminationRule};
use crate::util::Counter;

/// Snapshot of the solver state the termination rules look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub iterations: usize,
    pub best_length: f64,
    pub iteration_min_length: f64,
}

type RuleCheck = fn(&mut TerminationChecker, &Progress) -> bool;

/// Evaluated in this order. The first rule that fires ends the check.
const RULES: [(TerminationRule, RuleCheck); 2] = [
    (TerminationRule::FIXED, TerminationChecker::reached_iteration_count),
    (
        TerminationRule::WITHIN_PERCENTAGE,
        TerminationChecker::reached_in_row_count_within_percentage,
    ),
];

#[derive(Debug, Clone)]
pub struct TerminationChecker {
    rule: TerminationRule,
    iteration_count: usize,
    ceiling_percentage: f64,
    in_row_termination_count: usize,
    in_row_counter: Counter,
}

impl TerminationChecker {
    pub fn new(params: &TerminationParams) -> Result<Self, AcoError> {
        let rule = params.termination_rule.unwrap_or_default();

        let iteration_count = if rule.contains(TerminationRule::FIXED) {
            require(params.iteration_count, "termination_params.iteration_count")?
        } else {
            0
        };
        let (ceiling_percentage, in_row_termination_count) =
            if rule.contains(TerminationRule::WITHIN_PERCENTAGE) {
                (
                    require(params.ceiling_percentage, "termination_params.ceiling_percentage")?,
                    require(
                        params.in_row_termination_count,
                        "termination_params.in_row_termination_count",
                    )?,
                )
            } else {
                (0.0, 0)
            };

        Ok(TerminationChecker {
            rule,
            iteration_count,
            ceiling_percentage,
            in_row_termination_count,
            in_row_counter: Counter::new(),
        })
    }

    /// True once any of the enabled rules fires.
    pub fn terminated(&mut self, progress: &Progress) -> Result<bool, AcoError> {
        if self.rule.is_empty() {
            return Err(AcoError::NoTerminationRule);
        }

        for (flag, check) in RULES.iter() {
            if self.rule.contains(*flag) && check(self, progress) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Called by the solver whenever it records a new best tour.
    pub fn reset_in_row_count(&mut self) {
        self.in_row_counter.reset();
    }

    pub fn in_row_count(&self) -> usize {
        self.in_row_counter.value()
    }

    fn reached_iteration_count(&mut self, progress: &Progress) -> bool {
        progress.iterations >= self.iteration_count
    }

    fn reached_in_row_count_within_percentage(&mut self, progress: &Progress) -> bool {
        // an infinite best has an infinite ceiling, so runs without a valid tour still count
        let ceiling = progress.best_length * (1.0 + self.ceiling_percentage / 100.0);
        if progress.iteration_min_length <= ceiling {
            self.in_row_counter.inc();
        }
        self.in_row_counter.value() >= self.in_row_termination_count
    }
}
