use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::error::AcoError;
use crate::graph::{Edge, WeightedGraph};

/// Ordered sequence of distinct vertices of a graph, closed by an edge back to its start.
#[derive(Debug, Clone)]
pub struct Tour {
    graph: Arc<WeightedGraph>,
    vertices: Vec<usize>,
    visited: Vec<bool>,
    partial_length: f64,
}

impl Tour {
    pub fn new(graph: Arc<WeightedGraph>) -> Self {
        Tour {
            visited: vec![false; graph.vertex_count()],
            graph,
            vertices: Vec::new(),
            partial_length: 0.0,
        }
    }

    pub fn from_vertices(graph: Arc<WeightedGraph>, vertices: &[usize]) -> Result<Self, AcoError> {
        let mut tour = Tour::new(graph);
        for vertex in vertices {
            tour.add(*vertex)?;
        }
        Ok(tour)
    }

    /// Appends a vertex. It has to be one of [`Tour::next_possible_vertices`].
    pub fn add(&mut self, vertex: usize) -> Result<(), AcoError> {
        match self.vertices.last() {
            None if vertex < self.visited.len() => {}
            Some(&last) if self.next_possible_vertices().contains(&vertex) => {
                self.partial_length += self.graph.weight(last, vertex);
            }
            _ => return Err(AcoError::DuplicateVertex(vertex)),
        }

        self.visited[vertex] = true;
        self.vertices.push(vertex);
        Ok(())
    }

    /// Every vertex while the tour is empty, otherwise the unvisited neighbors of the last vertex.
    pub fn next_possible_vertices(&self) -> Vec<usize> {
        match self.vertices.last() {
            None => (0..self.graph.vertex_count()).collect(),
            Some(&last) => self
                .graph
                .neighbors(last)
                .iter()
                .copied()
                .filter(|vertex| !self.visited[*vertex])
                .collect(),
        }
    }

    pub fn has_dead_end(&self) -> bool {
        self.next_possible_vertices().is_empty()
    }

    pub fn has_all_vertices(&self) -> bool {
        self.vertices.len() == self.graph.vertex_count()
    }

    fn closing_edge(&self) -> Option<Edge> {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) => Some((*last, *first)),
            _ => None,
        }
    }

    pub fn can_connect_start_and_finish(&self) -> bool {
        self.closing_edge()
            .map_or(false, |edge| self.graph.has_edge(edge))
    }

    /// A tour is valid once it visits every vertex and its last vertex connects back to the first.
    pub fn is_valid(&self) -> bool {
        self.has_all_vertices() && self.can_connect_start_and_finish()
    }

    /// Sum of all edge weights including the closing edge.
    pub fn length(&self) -> Result<f64, AcoError> {
        match self.closing_edge() {
            Some((last, first)) if self.is_valid() => {
                Ok(self.partial_length + self.graph.weight(last, first))
            }
            _ => Err(AcoError::IncompleteTourAccess),
        }
    }

    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }

    pub fn graph(&self) -> &Arc<WeightedGraph> {
        &self.graph
    }

    /// Edges between consecutive vertices, without the closing edge.
    pub fn iter_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.vertices
            .iter()
            .copied()
            .zip(self.vertices.iter().copied().skip(1))
    }

    /// Edges between consecutive vertices followed by the closing edge, if the tour is valid.
    pub fn iter_closed_edges(&self) -> impl Iterator<Item = Edge> + '_ {
        let closing = if self.is_valid() { self.closing_edge() } else { None };
        self.iter_edges().chain(closing)
    }
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.graph, &other.graph) && self.vertices == other.vertices
    }
}

impl Display for Tour {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.vertices
                .iter()
                .map(|x| format!("{}", x))
                .collect::<Vec<String>>()
                .join(" -> ")
        )
    }
}
