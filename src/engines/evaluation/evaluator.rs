use crate::types::Parameters;
use serde::{Deserialize, Serialize};

/// Raw scores produced by one backtest of one parameter assignment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub pnl: f64,
    pub max_drawdown: f64,
    pub num_trades: u32,
    pub sharpe_ratio: f64,
    pub cagr: f64,
}

impl Evaluation {
    /// Worst-case scores, dominated by every non-degenerate result.
    pub fn worst() -> Self {
        Self {
            pnl: f64::NEG_INFINITY,
            max_drawdown: f64::INFINITY,
            num_trades: 0,
            sharpe_ratio: f64::NEG_INFINITY,
            cagr: f64::NEG_INFINITY,
        }
    }

    /// A run that never traded (realised pnl of exactly zero) carries no
    /// signal; its scores are replaced with worst-case sentinels so it can
    /// never win a tie downstream.
    pub fn or_worst(self) -> Self {
        if self.pnl == 0.0 {
            Self::worst()
        } else {
            self
        }
    }
}

/// Scores a parameter assignment against the dataset and time range bound
/// at construction. Implementations must be total: malformed data is
/// normalised into a (possibly degenerate) evaluation, never a panic, and
/// concurrent calls over distinct assignments must be safe.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, parameters: &Parameters) -> Evaluation;
}

impl<F> Evaluator for F
where
    F: Fn(&Parameters) -> Evaluation + Send + Sync,
{
    fn evaluate(&self, parameters: &Parameters) -> Evaluation {
        self(parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_evaluation_maps_to_sentinels() {
        let degenerate = Evaluation {
            pnl: 0.0,
            max_drawdown: 0.15,
            num_trades: 12,
            sharpe_ratio: 1.4,
            cagr: 0.3,
        };

        let scored = degenerate.or_worst();
        assert_eq!(scored.pnl, f64::NEG_INFINITY);
        assert_eq!(scored.max_drawdown, f64::INFINITY);
        assert_eq!(scored.num_trades, 0);
        assert_eq!(scored.sharpe_ratio, f64::NEG_INFINITY);
        assert_eq!(scored.cagr, f64::NEG_INFINITY);
    }

    #[test]
    fn test_non_degenerate_evaluation_passes_through() {
        let scored = Evaluation {
            pnl: -120.5,
            max_drawdown: 0.4,
            num_trades: 9,
            sharpe_ratio: -0.2,
            cagr: -0.05,
        };
        // Losing money is still a signal, only pnl == 0 is degenerate
        assert_eq!(scored.or_worst(), scored);
    }
}
