use crate::error::AcoError;
use crate::graph::Edge;

/// Weighted, directed graph on the vertices `0..vertex_count` backed by an adjacency matrix.
/// A missing edge is stored as `None` and reported as NaN by [`WeightedGraph::weight`].
#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency_matrix: Vec<Vec<Option<f64>>>,
    neighbors: Vec<Vec<usize>>,
    order: usize,
    size: usize,
}

impl WeightedGraph {
    /// Creates a graph from a square weight matrix. NaN marks a missing edge,
    /// every other value (zero and negative ones included) is an edge with that weight.
    pub fn from_matrix(weights: Vec<Vec<f64>>) -> Result<Self, AcoError> {
        let order = weights.len();
        for (i, row) in weights.iter().enumerate() {
            if row.len() != order {
                return Err(AcoError::InvalidGraph(format!(
                    "row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    order
                )));
            }
        }

        let adjacency_matrix = weights
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|weight| if weight.is_nan() { None } else { Some(weight) })
                    .collect()
            })
            .collect();

        Ok(WeightedGraph::from_adjacency(adjacency_matrix))
    }

    /// Creates a graph with `vertex_count` vertices and the given weighted edges.
    /// The indices of vertices are their position, so any edge that points outside of
    /// `0..vertex_count` is an error. Later duplicates overwrite earlier ones.
    pub fn from_edges(vertex_count: usize, edges: Vec<(usize, usize, f64)>) -> Result<Self, AcoError> {
        let mut adjacency_matrix = vec![vec![None; vertex_count]; vertex_count];

        for (from, to, weight) in edges.into_iter() {
            if from >= vertex_count || to >= vertex_count {
                return Err(AcoError::InvalidGraph(format!(
                    "edge ({}, {}) points outside of {} vertices",
                    from, to, vertex_count
                )));
            }
            if !weight.is_nan() {
                adjacency_matrix[from][to] = Some(weight);
            }
        }

        Ok(WeightedGraph::from_adjacency(adjacency_matrix))
    }

    fn from_adjacency(adjacency_matrix: Vec<Vec<Option<f64>>>) -> Self {
        let neighbors: Vec<Vec<usize>> = adjacency_matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter(|(_, weight)| weight.is_some())
                    .map(|(i, _)| i)
                    .collect()
            })
            .collect();
        let size = neighbors.iter().map(Vec::len).sum();

        WeightedGraph {
            order: adjacency_matrix.len(),
            adjacency_matrix,
            neighbors,
            size,
        }
    }

    /// Returns true if there are no vertices, or false otherwise.
    pub fn is_empty(&self) -> bool {
        self.order == 0
    }

    /// Returns the number of vertices in this graph.
    pub fn vertex_count(&self) -> usize {
        self.order
    }

    /// Returns the number of edges in this graph.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the weight of the edge between from and to, or NaN if there is none.
    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.edge_weight((from, to)).unwrap_or(f64::NAN)
    }

    pub fn edge_weight(&self, edge: Edge) -> Option<f64> {
        let (from, to) = edge;
        self.adjacency_matrix
            .get(from)
            .and_then(|row| row.get(to))
            .copied()
            .flatten()
    }

    /// Returns true if the edge exists, or false otherwise.
    pub fn has_edge(&self, edge: Edge) -> bool {
        self.edge_weight(edge).is_some()
    }

    /// Returns the vertices reachable from vertex over a single edge, in ascending order.
    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.neighbors.get(vertex).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter_edges(&self) -> impl Iterator<Item = (Edge, f64)> + '_ {
        self.adjacency_matrix
            .iter()
            .enumerate()
            .flat_map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .filter_map(move |(j, weight)| weight.map(|w| ((i, j), w)))
            })
    }
}
