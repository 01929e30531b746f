use csv::Writer;
use serde::Serialize;
use std::io::Write;

/// One row of the solve history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub valid_tours: usize,
    pub iteration_min_length: f64,
    pub best_length: f64,
    pub stagnation: usize,
    pub reinitialized: bool,
    pub elapsed_ms: f64,
}

/// Writes all records as CSV with a header row.
pub fn write_history<W: Write>(records: &[IterationRecord], writer: &mut Writer<W>) -> csv::Result<()> {
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}
