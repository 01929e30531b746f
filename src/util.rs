mod counter;
mod distance;
mod weighted_choice;

pub use counter::Counter;
pub use distance::euclidean_distance;
pub use weighted_choice::{choose_weight_biased, index_of_max};
