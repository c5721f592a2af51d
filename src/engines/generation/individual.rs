use crate::engines::evaluation::Evaluation;
use crate::types::{params_signature, Parameters, RunContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate parameter assignment, its backtest scores, and the
/// dominance bookkeeping for the current generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
    pub symbol: String,
    pub strategy: String,
    pub tf: String,
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,

    pub parameters: Parameters,

    pub pnl: f64,
    pub max_drawdown: f64,
    pub num_trades: u32,
    pub sharpe_ratio: f64,
    pub cagr: f64,

    // Reset on every generation merge. `dominates` holds arena indices
    // valid only within that merge.
    pub dominated_by: usize,
    pub dominates: Vec<usize>,
    pub rank: usize,
    pub crowding_distance: f64,

    /// Position in the finalised population after trimming.
    pub order: Option<usize>,
    pub written_at: DateTime<Utc>,
}

impl Individual {
    pub fn new(parameters: Parameters) -> Self {
        Self {
            symbol: String::new(),
            strategy: String::new(),
            tf: String::new(),
            from_time: DateTime::<Utc>::UNIX_EPOCH,
            to_time: DateTime::<Utc>::UNIX_EPOCH,
            parameters,
            pnl: 0.0,
            max_drawdown: 0.0,
            num_trades: 0,
            sharpe_ratio: 0.0,
            cagr: 0.0,
            dominated_by: 0,
            dominates: Vec::new(),
            rank: 0,
            crowding_distance: 0.0,
            order: None,
            written_at: Utc::now(),
        }
    }

    /// Clear dominance bookkeeping ahead of a fresh sort.
    pub fn reset_results(&mut self) {
        self.dominated_by = 0;
        self.dominates.clear();
        self.rank = 0;
        self.crowding_distance = 0.0;
    }

    /// Parameter-level identity. Equality of the assignments, not of the
    /// objects, drives duplicate rejection.
    pub fn parameter_eq(&self, other: &Individual) -> bool {
        self.parameters == other.parameters
    }

    pub fn signature(&self) -> String {
        params_signature(&self.parameters)
    }

    /// Copy backtest scores onto this candidate.
    pub fn record(&mut self, evaluation: Evaluation) {
        self.pnl = evaluation.pnl;
        self.max_drawdown = evaluation.max_drawdown;
        self.num_trades = evaluation.num_trades;
        self.sharpe_ratio = evaluation.sharpe_ratio;
        self.cagr = evaluation.cagr;
    }

    pub fn set_context(&mut self, ctx: &RunContext) {
        self.symbol = ctx.symbol.clone();
        self.strategy = ctx.strategy.clone();
        self.tf = ctx.tf.clone();
        self.from_time = ctx.from_time;
        self.to_time = ctx.to_time;
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", "-".repeat(80))?;
        writeln!(f, "Symbol = {}", self.symbol)?;
        writeln!(f, "Strategy = {}", self.strategy)?;
        writeln!(f, "Timeframe = {}", self.tf)?;
        writeln!(f, "Time = {} -> {}", self.from_time, self.to_time)?;
        writeln!(f, "Parameters = {}", self.signature())?;
        writeln!(f, "PNL = {:.2}", self.pnl)?;
        writeln!(f, "Num Trades = {}", self.num_trades)?;
        writeln!(f, "Sharpe Ratio = {:.2}", self.sharpe_ratio)?;
        writeln!(f, "CAGR = {:.2}", self.cagr)?;
        writeln!(f, "Max. Drawdown = {:.5}", self.max_drawdown)?;
        writeln!(f, "Rank = {}", self.rank)?;
        writeln!(f, "Crowding Distance = {:.5}", self.crowding_distance)?;
        match self.order {
            Some(order) => writeln!(f, "Order = {order}"),
            None => writeln!(f, "Order = -"),
        }
    }
}
