use std::fmt;
use std::fmt::{Display, Formatter};

use crate::error::AcoError;
use crate::metaheuristic::Tour;

/// Best result of a solve. `Infinite` stands for "no valid tour found yet"
/// and compares longer than every real tour.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    Infinite,
    Found { tour: Tour, length: f64 },
}

impl Default for Solution {
    fn default() -> Self {
        Solution::Infinite
    }
}

impl Solution {
    pub fn from_tour(tour: Tour) -> Result<Self, AcoError> {
        let length = tour.length()?;
        Ok(Solution::Found { tour, length })
    }

    pub fn length(&self) -> f64 {
        match self {
            Solution::Infinite => f64::INFINITY,
            Solution::Found { length, .. } => *length,
        }
    }

    pub fn tour(&self) -> Option<&Tour> {
        match self {
            Solution::Infinite => None,
            Solution::Found { tour, .. } => Some(tour),
        }
    }

    pub fn vertices(&self) -> &[usize] {
        match self {
            Solution::Infinite => &[],
            Solution::Found { tour, .. } => tour.vertices(),
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Solution::Infinite)
    }
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Solution::Infinite => write!(f, "no tour (length inf)"),
            Solution::Found { tour, length } => write!(f, "{} (length {})", tour, length),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::WeightedGraph;
    use std::sync::Arc;

    fn triangle() -> Arc<WeightedGraph> {
        Arc::new(
            WeightedGraph::from_matrix(vec![
                vec![f64::NAN, 1.0, 2.0],
                vec![1.0, f64::NAN, 3.0],
                vec![2.0, 3.0, f64::NAN],
            ])
            .unwrap(),
        )
    }

    #[test]
    fn infinite_solution_works() {
        let solution = Solution::default();

        assert!(solution.is_infinite());
        assert_eq!(solution.length(), f64::INFINITY);
        assert!(solution.vertices().is_empty());
        assert!(solution.tour().is_none());
    }

    #[test]
    fn from_tour_works() {
        let tour = Tour::from_vertices(triangle(), &[0, 1, 2]).unwrap();
        let solution = Solution::from_tour(tour).unwrap();

        assert_eq!(solution.length(), 6.0);
        assert_eq!(solution.vertices(), &[0, 1, 2]);
        assert_eq!(solution.to_string(), "0 -> 1 -> 2 (length 6)");
    }

    #[test]
    fn from_incomplete_tour_errors() {
        let tour = Tour::from_vertices(triangle(), &[0, 1]).unwrap();

        assert_eq!(
            Solution::from_tour(tour).err(),
            Some(AcoError::IncompleteTourAccess)
        );
    }
}
