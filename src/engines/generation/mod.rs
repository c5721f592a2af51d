pub mod engine;
pub mod individual;
pub mod operators;
pub mod pareto;
pub mod population;
pub mod progress;
pub mod sink;

pub use engine::{Nsga2Engine, ProgressCallback};
pub use individual::Individual;
pub use population::{PopulationFactory, SeenParams};
pub use progress::{ChannelProgress, ConsoleProgress, ProgressMessage, SilentProgress};
pub use sink::{JsonlSink, MemorySink, ResultSink};
