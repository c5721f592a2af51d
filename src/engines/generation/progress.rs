use super::engine::ProgressCallback;
use super::individual::Individual;
use log::info;
use std::sync::mpsc;

/// Logs generation progress through the `log` facade.
pub struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_generation_start(&mut self, generation: usize) {
        info!("generation {} starting", generation + 1);
    }

    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize) {
        if evaluated % 10 == 0 || evaluated == total {
            info!("  evaluated {}/{}", evaluated, total);
        }
    }

    fn on_generation_complete(&mut self, generation: usize, population: &[Individual]) {
        let front0 = population.iter().filter(|i| i.rank == 0).count();
        let best_sharpe = population
            .iter()
            .map(|i| i.sharpe_ratio)
            .fold(f64::NEG_INFINITY, f64::max);
        info!(
            "generation {} complete: front 0 holds {}, best sharpe {:.2}",
            generation + 1,
            front0,
            best_sharpe
        );
    }
}

/// Discards all progress. For embedding and tests.
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_individual_evaluated(&mut self, _evaluated: usize, _total: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _population: &[Individual]) {}
}

// For driving a UI or another thread
pub enum ProgressMessage {
    GenerationStart(usize),
    IndividualEvaluated { evaluated: usize, total: usize },
    GenerationComplete { generation: usize, front0_size: usize },
}

pub struct ChannelProgress {
    sender: mpsc::Sender<ProgressMessage>,
}

impl ChannelProgress {
    pub fn new(sender: mpsc::Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgress {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::IndividualEvaluated { evaluated, total });
    }

    fn on_generation_complete(&mut self, generation: usize, population: &[Individual]) {
        let front0_size = population.iter().filter(|i| i.rank == 0).count();
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            front0_size,
        });
    }
}
