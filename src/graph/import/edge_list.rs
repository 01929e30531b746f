use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::graph::import::ImportError;
use crate::graph::WeightedGraph;

pub fn import_edge_list<P: AsRef<Path>>(path: P) -> Result<WeightedGraph, ImportError> {
    let file = File::open(path)?;
    parse_edge_list(file)
}

/// Reads `from,to,distance` rows into a directed graph. Lines starting with `#` are
/// skipped and the vertex count is one more than the highest index that appears.
pub fn parse_edge_list<R: Read>(reader: R) -> Result<WeightedGraph, ImportError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(reader);

    let mut edges = Vec::new();
    let mut vertex_count = 0;
    for row in reader.deserialize() {
        let (from, to, distance): (usize, usize, f64) = row?;
        vertex_count = vertex_count.max(from + 1).max(to + 1);
        edges.push((from, to, distance));
    }

    Ok(WeightedGraph::from_edges(vertex_count, edges)?)
}
