use super::individual::Individual;
use crate::error::Result;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Receives each generation's finalised population, annotated with rank,
/// crowding distance and order. Storage format is the sink's business.
pub trait ResultSink: Send {
    fn on_generation(&mut self, generation: usize, population: &[Individual]) -> Result<()>;
}

/// Collects every emitted population in memory. Clones share storage, so
/// a caller can keep one handle while the engine owns the other.
#[derive(Clone, Default)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(usize, Vec<Individual>)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(usize, Vec<Individual>)> {
        self.records.lock().unwrap().clone()
    }
}

impl ResultSink for MemorySink {
    fn on_generation(&mut self, generation: usize, population: &[Individual]) -> Result<()> {
        self.records
            .lock()
            .unwrap()
            .push((generation, population.to_vec()));
        Ok(())
    }
}

#[derive(Serialize)]
struct GenerationRecord<'a> {
    generation: usize,
    #[serde(flatten)]
    individual: &'a Individual,
}

/// Appends one JSON object per individual per generation.
pub struct JsonlSink {
    writer: BufWriter<File>,
}

impl JsonlSink {
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }
}

impl ResultSink for JsonlSink {
    fn on_generation(&mut self, generation: usize, population: &[Individual]) -> Result<()> {
        for individual in population {
            let record = GenerationRecord {
                generation,
                individual,
            };
            serde_json::to_writer(&mut self.writer, &record)?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
