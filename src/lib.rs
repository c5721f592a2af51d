//! Multi-objective search over trading-strategy parameter spaces.
//!
//! The engine runs NSGA-II: uniform seeding, Pareto non-dominated sorting
//! on (CAGR, Sharpe), crowding-distance diversity, and tournament-driven
//! variation, against any [`engines::evaluation::Evaluator`] bound to a
//! dataset and time range.

pub mod config;
pub mod engines;
pub mod error;
pub mod schema;
pub mod types;

pub use error::{ParetuneError, Result};
