mod colony_params;
mod pheromone_params;
mod reinitialization_params;
mod rule;
mod solving_params;
mod termination_params;

pub use colony_params::ColonyParams;
pub use pheromone_params::PheromoneParams;
pub use reinitialization_params::{ReinitializationParams, ReinitializationRule};
pub use solving_params::{Algorithm, SolvingParams, DEFAULT_CONFIG};
pub use termination_params::{TerminationParams, TerminationRule};

use thiserror::Error;

/// Merges another layer of configuration into this one.
/// Every value that is set in `other` replaces the current one, unset values are kept.
pub trait Overwrite {
    fn overwrite(&mut self, other: &Self);
}

#[macro_export]
macro_rules! overwrite {
    ($type:ty { $($field:ident),* $(,)? }) => {
        impl $crate::params::Overwrite for $type {
            fn overwrite(&mut self, other: &Self) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field;
                    }
                )*
            }
        }
    };
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unknown rule {0:?}")]
    UnknownRule(String),
    #[error("unknown algorithm {0:?}, expected AS or ACS")]
    UnknownAlgorithm(String),
}
