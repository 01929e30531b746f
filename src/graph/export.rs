use csv::Writer;
use std::io::Write;
use tracing::warn;

/// Receives the pheromone matrix every time a [`PheromoneGraph`](crate::graph::PheromoneGraph)
/// mutated it.
pub trait PheromoneVisualizer: Send + Sync {
    fn refresh(&mut self, pheromones: &[Vec<f64>]);
}

/// Ignores every refresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullVisualizer;

impl PheromoneVisualizer for NullVisualizer {
    fn refresh(&mut self, _pheromones: &[Vec<f64>]) {}
}

/// Appends every refreshed matrix as CSV rows of the form `snapshot,row,p_0,...,p_n`.
pub struct CsvSnapshotVisualizer<W: Write> {
    writer: Writer<W>,
    snapshot: usize,
}

impl<W: Write> CsvSnapshotVisualizer<W> {
    pub fn new(writer: Writer<W>) -> Self {
        CsvSnapshotVisualizer {
            writer,
            snapshot: 0,
        }
    }

    /// Number of matrices written so far.
    pub fn snapshots(&self) -> usize {
        self.snapshot
    }

    pub fn into_inner(self) -> Option<W> {
        self.writer.into_inner().ok()
    }

    fn write_snapshot(&mut self, pheromones: &[Vec<f64>]) -> csv::Result<()> {
        for (i, row) in pheromones.iter().enumerate() {
            let record = [self.snapshot.to_string(), i.to_string()]
                .into_iter()
                .chain(row.iter().map(|p| p.to_string()));
            self.writer.write_record(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write + Send + Sync> PheromoneVisualizer for CsvSnapshotVisualizer<W> {
    fn refresh(&mut self, pheromones: &[Vec<f64>]) {
        if let Err(err) = self.write_snapshot(pheromones) {
            warn!(snapshot = self.snapshot, error = %err, "failed to write pheromone snapshot");
        }
        self.snapshot += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::WriterBuilder;

    #[test]
    fn csv_snapshot_works() {
        let writer = WriterBuilder::new().from_writer(Vec::new());
        let mut visualizer = CsvSnapshotVisualizer::new(writer);
        visualizer.refresh(&[vec![1.0, 2.5], vec![3.0, 4.0]]);
        visualizer.refresh(&[vec![0.5, 0.5], vec![0.5, 0.5]]);

        assert_eq!(visualizer.snapshots(), 2);
        let out = String::from_utf8(visualizer.into_inner().unwrap()).unwrap();
        assert_eq!(
            out,
            "0,0,1,2.5\n0,1,3,4\n1,0,0.5,0.5\n1,1,0.5,0.5\n",
            "Snapshot rows are malformed."
        );
    }
}
