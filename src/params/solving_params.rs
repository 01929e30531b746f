use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::params::{
    ColonyParams, ConfigError, Overwrite, PheromoneParams, ReinitializationParams,
    TerminationParams,
};

/// Configuration used when nothing else is given.
pub const DEFAULT_CONFIG: &str = include_str!("../../data/default_config.yaml");

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Ant System
    #[serde(rename = "AS", alias = "as")]
    As,
    /// Ant Colony System
    #[serde(rename = "ACS", alias = "acs")]
    Acs,
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AS" => Ok(Algorithm::As),
            "ACS" => Ok(Algorithm::Acs),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::As => write!(f, "AS"),
            Algorithm::Acs => write!(f, "ACS"),
        }
    }
}

/// All parameters of a solve, grouped the way they appear in config files.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SolvingParams {
    pub algorithm: Option<Algorithm>,
    pub pheromone_params: PheromoneParams,
    pub colony_params: ColonyParams,
    pub termination_params: TerminationParams,
    pub reinitialization_params: ReinitializationParams,
}

impl SolvingParams {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        SolvingParams::from_yaml_str(&yaml)
    }

    pub fn default_config() -> Result<Self, ConfigError> {
        SolvingParams::from_yaml_str(DEFAULT_CONFIG)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

impl Overwrite for SolvingParams {
    fn overwrite(&mut self, other: &Self) {
        if other.algorithm.is_some() {
            self.algorithm = other.algorithm;
        }
        self.pheromone_params.overwrite(&other.pheromone_params);
        self.colony_params.overwrite(&other.colony_params);
        self.termination_params.overwrite(&other.termination_params);
        self.reinitialization_params
            .overwrite(&other.reinitialization_params);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ReinitializationRule, TerminationRule};

    fn with_algorithm(algorithm: Option<Algorithm>) -> SolvingParams {
        SolvingParams {
            algorithm,
            ..Default::default()
        }
    }

    #[test]
    fn overwrite_with_unset_keeps_value() {
        let mut original = with_algorithm(Some(Algorithm::As));
        original.overwrite(&with_algorithm(None));

        assert_eq!(original.algorithm, Some(Algorithm::As));
    }

    #[test]
    fn overwrite_unset_with_unset_works() {
        let mut original = with_algorithm(None);
        original.overwrite(&with_algorithm(None));

        assert_eq!(original.algorithm, None);
    }

    #[test]
    fn overwrite_with_set_replaces_value() {
        let mut original = with_algorithm(Some(Algorithm::As));
        original.overwrite(&with_algorithm(Some(Algorithm::Acs)));

        assert_eq!(original.algorithm, Some(Algorithm::Acs));

        let mut original = with_algorithm(None);
        original.overwrite(&with_algorithm(Some(Algorithm::Acs)));

        assert_eq!(original.algorithm, Some(Algorithm::Acs));
    }

    #[test]
    fn overwrite_recurses_into_groups() {
        let mut original = SolvingParams::default();
        original.termination_params.termination_rule = Some(TerminationRule::FIXED);
        original.termination_params.iteration_count = Some(10);
        let mut replacement = SolvingParams::default();
        replacement.termination_params.termination_rule = Some(TerminationRule::WITHIN_PERCENTAGE);

        original.overwrite(&replacement);

        assert_eq!(
            original.termination_params.termination_rule,
            Some(TerminationRule::WITHIN_PERCENTAGE)
        );
        assert_eq!(original.termination_params.iteration_count, Some(10));
        assert_eq!(replacement.termination_params.iteration_count, None);
    }

    #[test]
    fn default_config_works() {
        let params = SolvingParams::default_config().unwrap();

        assert_eq!(params.algorithm, Some(Algorithm::Acs));
        assert_eq!(params.colony_params.ant_count, Some(10));
        assert_eq!(
            params.termination_params.termination_rule,
            Some(TerminationRule::FIXED | TerminationRule::WITHIN_PERCENTAGE)
        );
        assert_eq!(
            params.reinitialization_params.reinitialization_rule,
            Some(ReinitializationRule::STAGNATION)
        );
    }

    #[test]
    fn partial_yaml_works() {
        let params = SolvingParams::from_yaml_str(
            "algorithm: AS\ncolony_params:\n  ant_count: 3\n",
        )
        .unwrap();

        assert_eq!(params.algorithm, Some(Algorithm::As));
        assert_eq!(params.colony_params.ant_count, Some(3));
        assert_eq!(params.colony_params.thread_count, None);
        assert_eq!(params.pheromone_params, PheromoneParams::default());
    }

    #[test]
    fn unknown_field_errors() {
        let err = SolvingParams::from_yaml_str("colony_params:\n  ants: 3\n").err();

        assert!(matches!(err, Some(ConfigError::Yaml(_))));
    }

    #[test]
    fn unknown_rule_errors() {
        let err =
            SolvingParams::from_yaml_str("termination_params:\n  termination_rule: sometimes\n")
                .err();

        assert!(err.is_some(), "Unknown rule was accepted.");
    }

    #[test]
    fn yaml_round_trip_keeps_rules() {
        let params = SolvingParams::default_config().unwrap();
        let yaml = params.to_yaml_string().unwrap();

        assert_eq!(SolvingParams::from_yaml_str(&yaml).unwrap(), params);
    }

    #[test]
    fn algorithm_from_str_works() {
        assert_eq!("acs".parse::<Algorithm>().unwrap(), Algorithm::Acs);
        assert_eq!("AS".parse::<Algorithm>().unwrap(), Algorithm::As);
        assert!("MMAS".parse::<Algorithm>().is_err());
    }
}
