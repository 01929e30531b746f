use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::graph::import::ImportError;
use crate::graph::WeightedGraph;
use crate::util::euclidean_distance;

pub fn import_tsplib<P: AsRef<Path>>(path: P) -> Result<WeightedGraph, ImportError> {
    let file = File::open(path)?;
    parse_tsplib(BufReader::new(file))
}

/// Reads a TSPLIB problem with `EDGE_WEIGHT_TYPE: EUC_nD` into a complete graph
/// weighted by the euclidean distance of the node coordinates.
pub fn parse_tsplib<R: BufRead>(reader: R) -> Result<WeightedGraph, ImportError> {
    let mut edge_weight_type = None;
    // coordinates together with the line they were read from
    let mut coords: Vec<(usize, Vec<f64>)> = Vec::new();
    let mut reading_coords = false;

    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }
        if line == "EOF" {
            break;
        }
        if let Some((key, value)) = line.split_once(':') {
            reading_coords = false;
            if key.trim() == "EDGE_WEIGHT_TYPE" {
                edge_weight_type = Some(value.trim().to_string());
            }
            continue;
        }
        if line == "NODE_COORD_SECTION" {
            reading_coords = true;
            continue;
        }
        if !reading_coords {
            continue;
        }

        // first column is the node id
        let coord = line
            .split_whitespace()
            .skip(1)
            .map(|value| {
                value.parse::<f64>().map_err(|_| ImportError::InvalidFormat {
                    line: i + 1,
                    msg: format!("{:?} is not a number", value),
                })
            })
            .collect::<Result<Vec<f64>, ImportError>>()?;
        coords.push((i + 1, coord));
    }

    let edge_weight_type = edge_weight_type.unwrap_or_default();
    let dimension = euclidean_dimension(&edge_weight_type).ok_or_else(|| {
        ImportError::UnsupportedFormat(format!("EDGE_WEIGHT_TYPE {:?}", edge_weight_type))
    })?;
    if let Some(position) = coords.iter().position(|(_, coord)| coord.len() < dimension) {
        return Err(ImportError::InvalidFormat {
            line: coords[position].0,
            msg: format!("node {} has less than {} coordinates", position + 1, dimension),
        });
    }

    let weights = coords
        .iter()
        .map(|(_, from)| {
            coords
                .iter()
                .map(|(_, to)| euclidean_distance(&from[..dimension], &to[..dimension]))
                .collect()
        })
        .collect();
    Ok(WeightedGraph::from_matrix(weights)?)
}

/// Dimension n of `EUC_nD`.
fn euclidean_dimension(edge_weight_type: &str) -> Option<usize> {
    edge_weight_type
        .strip_prefix("EUC_")?
        .strip_suffix('D')?
        .parse()
        .ok()
        .filter(|dimension| *dimension > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = "NAME : square
COMMENT : four corners
TYPE : TSP
DIMENSION : 4
EDGE_WEIGHT_TYPE : EUC_2D
NODE_COORD_SECTION
1 0.0 0.0
2 3.0 0.0
3 3.0 4.0
4 0 4
EOF
";

    #[test]
    fn parse_tsplib_works() {
        let graph = parse_tsplib(SQUARE.as_bytes()).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.weight(0, 1), 3.0);
        assert_eq!(graph.weight(0, 2), 5.0);
        assert_eq!(graph.weight(3, 0), 4.0);
        assert_eq!(graph.weight(2, 2), 0.0);
    }

    #[test]
    fn parse_three_dimensions_works() {
        let problem = "EDGE_WEIGHT_TYPE: EUC_3D\nNODE_COORD_SECTION\n1 0 0 0\n2 1 2 2\n";
        let graph = parse_tsplib(problem.as_bytes()).unwrap();

        assert_eq!(graph.weight(0, 1), 3.0);
    }

    #[test]
    fn unsupported_weight_type_errors() {
        let problem = "EDGE_WEIGHT_TYPE : GEO\nNODE_COORD_SECTION\n1 0 0\nEOF\n";
        let err = parse_tsplib(problem.as_bytes()).err();

        assert!(matches!(err, Some(ImportError::UnsupportedFormat(_))));
    }

    #[test]
    fn broken_coordinate_errors() {
        let problem = "EDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n1 0 zero\nEOF\n";
        let err = parse_tsplib(problem.as_bytes()).err();

        assert!(matches!(err, Some(ImportError::InvalidFormat { line: 3, .. })));
    }

    #[test]
    fn missing_coordinate_errors() {
        let problem = "EDGE_WEIGHT_TYPE : EUC_2D\nNODE_COORD_SECTION\n1 0 1\n\n2 5\n";
        let err = parse_tsplib(problem.as_bytes()).err();

        assert!(matches!(err, Some(ImportError::InvalidFormat { line: 5, .. })));
    }

    #[test]
    fn euclidean_dimension_works() {
        assert_eq!(euclidean_dimension("EUC_2D"), Some(2));
        assert_eq!(euclidean_dimension("EUC_0D"), None);
        assert_eq!(euclidean_dimension("ATT"), None);
    }
}
