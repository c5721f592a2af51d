use super::params::{ParamSpec, ParameterSchema};
use crate::error::{ParetuneError, Result};
use crate::types::{ParamValue, Parameters};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup table from strategy identifier to its parameter schema.
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<ParameterSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Registry preloaded with the production strategy spaces.
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(ParameterSchema::new(
            "obv",
            vec![ParamSpec::integer("ma_period", "MA Period", 2, 200)],
        ));

        registry.register(
            ParameterSchema::new(
                "ichimoku",
                vec![
                    ParamSpec::integer("kijun_period", "Kijun Period", 2, 200),
                    ParamSpec::integer("tenkan_period", "Tenkan Period", 2, 200),
                ],
            )
            .with_repair(repair_ichimoku),
        );

        registry.register(ParameterSchema::new(
            "sup_res",
            vec![
                ParamSpec::integer("min_points", "Min. Points", 2, 20),
                ParamSpec::integer("min_diff_points", "Min. Difference between Points", 2, 100),
                ParamSpec::real("rounding_nb", "Rounding Number", 10.0, 500.0, 2),
                ParamSpec::real("take_profit", "Take Profit %", 1.0, 100.0, 2),
                ParamSpec::real("stop_loss", "Stop Loss %", 1.0, 100.0, 2),
            ],
        ));

        registry.register(
            ParameterSchema::new(
                "sma",
                vec![
                    ParamSpec::integer("slow_ma", "Slow MA Period", 2, 200),
                    ParamSpec::integer("fast_ma", "Fast MA Period", 2, 200),
                ],
            )
            .with_repair(repair_sma),
        );

        registry.register(
            ParameterSchema::new(
                "psar",
                vec![
                    ParamSpec::real("initial_acc", "Initial Acceleration", 0.01, 0.2, 2),
                    ParamSpec::real("acc_increment", "Acceleration Increment", 0.01, 0.3, 2),
                    ParamSpec::real("max_acc", "Max. Acceleration", 0.05, 1.0, 2),
                ],
            )
            .with_repair(repair_psar),
        );

        registry.register(ParameterSchema::new(
            "atr",
            vec![
                ParamSpec::integer("period", "Period", 1, 30),
                ParamSpec::real("atr_multiplier", "ATR Multiplier", 0.1, 5.0, 2),
            ],
        ));

        registry.register(
            ParameterSchema::new(
                "gpsar",
                vec![
                    ParamSpec::real("initial_acc", "Initial Acceleration", 0.01, 0.2, 2),
                    ParamSpec::real("acc_increment", "Acceleration Increment", 0.01, 0.3, 2),
                    ParamSpec::real("max_acc", "Max. Acceleration", 0.05, 1.0, 2),
                    ParamSpec::real("gradient_threshold", "Gradient Threshold", 15.0, 800.0, 2),
                    ParamSpec::integer("gradient_period", "Gradient Period", 1, 10),
                ],
            )
            .with_repair(repair_psar),
        );

        registry
    }

    pub fn register(&mut self, schema: ParameterSchema) {
        self.schemas
            .insert(schema.strategy().to_string(), Arc::new(schema));
    }

    pub fn schema(&self, strategy: &str) -> Result<Arc<ParameterSchema>> {
        self.schemas
            .get(strategy)
            .cloned()
            .ok_or_else(|| ParetuneError::UnknownStrategy(strategy.to_string()))
    }

    pub fn strategies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn get_i64(params: &Parameters, code: &str) -> i64 {
    params.get(code).map(ParamValue::as_i64).unwrap_or(0)
}

fn get_f64(params: &Parameters, code: &str) -> f64 {
    params.get(code).map(ParamValue::as_f64).unwrap_or(0.0)
}

/// The baseline (kijun) window may never be shorter than the conversion
/// (tenkan) window.
fn repair_ichimoku(params: &mut Parameters) {
    let tenkan = get_i64(params, "tenkan_period");
    let kijun = get_i64(params, "kijun_period");
    params.insert("kijun_period".to_string(), ParamValue::Int(kijun.max(tenkan)));
}

/// The slow average may never be shorter than the fast one.
fn repair_sma(params: &mut Parameters) {
    let fast = get_i64(params, "fast_ma");
    let slow = get_i64(params, "slow_ma");
    params.insert("slow_ma".to_string(), ParamValue::Int(slow.max(fast)));
}

/// Acceleration starts at or below its cap, and the increment may not
/// exceed the remaining headroom to the cap. Shared by psar and gpsar.
fn repair_psar(params: &mut Parameters) {
    let max_acc = get_f64(params, "max_acc");
    let initial = get_f64(params, "initial_acc").min(max_acc);
    let increment = get_f64(params, "acc_increment").min(max_acc - initial);
    params.insert("initial_acc".to_string(), ParamValue::Real(initial));
    params.insert("acc_increment".to_string(), ParamValue::Real(increment));
}
