use super::evaluator::{Evaluation, Evaluator};
use crate::types::Parameters;

/// Deterministic stand-in evaluator for demos and wiring tests. Scores are
/// smooth functions of the parameter values themselves; no market data is
/// involved, so runs are reproducible on any machine.
pub struct SyntheticEvaluator;

impl Evaluator for SyntheticEvaluator {
    fn evaluate(&self, parameters: &Parameters) -> Evaluation {
        let mut pnl = 0.0;
        let mut sharpe_ratio = 0.0;
        let mut cagr = 0.0;

        for (i, value) in parameters.values().enumerate() {
            let x = value.as_f64();
            pnl += (x * 0.7).sin() * 100.0;
            sharpe_ratio += (x * 0.11).cos() * 1.5;
            cagr += (x / (i as f64 + 2.0)).sin() * 0.4;
        }

        Evaluation {
            pnl,
            max_drawdown: pnl.abs() * 0.1 + 1.0,
            num_trades: parameters.len() as u32 * 10,
            sharpe_ratio,
            cagr,
        }
    }
}
