use crate::error::{ParetuneError, Result};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single tunable value, integer or real depending on the schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Int(i64),
    Real(f64),
}

impl ParamValue {
    pub fn as_f64(&self) -> f64 {
        match *self {
            ParamValue::Int(v) => v as f64,
            ParamValue::Real(v) => v,
        }
    }

    pub fn as_i64(&self) -> i64 {
        match *self {
            ParamValue::Int(v) => v,
            ParamValue::Real(v) => v as i64,
        }
    }
}

/// Parameter assignment for one candidate, keyed by parameter code.
/// The key order is stable, so two assignments are equal (and serialise
/// identically) iff they are equal field-by-field.
pub type Parameters = BTreeMap<String, ParamValue>;

/// Canonical signature of a parameter assignment, used for duplicate
/// rejection across a whole run.
pub fn params_signature(params: &Parameters) -> String {
    serde_json::to_string(params).unwrap_or_default()
}

/// The (exchange, symbol, strategy, timeframe, time range) tuple an
/// optimiser run is bound to for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunContext {
    pub exchange: String,
    pub symbol: String,
    pub strategy: String,
    pub tf: String,
    pub from_time: DateTime<Utc>,
    pub to_time: DateTime<Utc>,
}

impl RunContext {
    /// Build a context from epoch-millisecond window bounds.
    pub fn from_millis(
        exchange: impl Into<String>,
        symbol: impl Into<String>,
        strategy: impl Into<String>,
        tf: impl Into<String>,
        from_ms: i64,
        to_ms: i64,
    ) -> Result<Self> {
        let from_time = Utc
            .timestamp_millis_opt(from_ms)
            .single()
            .ok_or_else(|| ParetuneError::Configuration(format!("invalid from_time: {from_ms}")))?;
        let to_time = Utc
            .timestamp_millis_opt(to_ms)
            .single()
            .ok_or_else(|| ParetuneError::Configuration(format!("invalid to_time: {to_ms}")))?;

        Ok(Self {
            exchange: exchange.into(),
            symbol: symbol.into(),
            strategy: strategy.into(),
            tf: tf.into(),
            from_time,
            to_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_signature_tracks_parameter_equality() {
        let mut a = Parameters::new();
        a.insert("fast_ma".to_string(), ParamValue::Int(10));
        a.insert("slow_ma".to_string(), ParamValue::Int(50));

        let mut b = Parameters::new();
        b.insert("slow_ma".to_string(), ParamValue::Int(50));
        b.insert("fast_ma".to_string(), ParamValue::Int(10));

        // Insertion order is irrelevant, only the values matter
        assert_eq!(a, b);
        assert_eq!(params_signature(&a), params_signature(&b));

        b.insert("fast_ma".to_string(), ParamValue::Int(11));
        assert_ne!(a, b);
        assert_ne!(params_signature(&a), params_signature(&b));
    }

    #[test]
    fn test_run_context_from_millis() {
        let ctx = RunContext::from_millis("binance", "BTCUSDT", "sma", "1h", 0, 86_400_000)
            .expect("valid window");
        assert_eq!(ctx.from_time.timestamp_millis(), 0);
        assert_eq!(ctx.to_time.timestamp_millis(), 86_400_000);
    }
}
