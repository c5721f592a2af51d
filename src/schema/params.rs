use crate::types::{ParamValue, Parameters};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Bounds and precision for one tunable parameter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ParamDomain {
    /// Inclusive integer range.
    Integer { min: i64, max: i64 },
    /// Real range, values kept rounded to `decimals` places.
    Real { min: f64, max: f64, decimals: u32 },
}

impl ParamDomain {
    /// Draw one value uniformly from the domain.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> ParamValue {
        match *self {
            ParamDomain::Integer { min, max } => ParamValue::Int(rng.gen_range(min..=max)),
            ParamDomain::Real { min, max, decimals } => {
                ParamValue::Real(round_to(rng.gen_range(min..=max), decimals))
            }
        }
    }

    /// Bring a raw perturbed value back onto the domain grid: integers are
    /// truncated, reals re-rounded, both clamped to [min, max].
    pub fn constrain(&self, raw: f64) -> ParamValue {
        match *self {
            ParamDomain::Integer { min, max } => {
                ParamValue::Int((raw.trunc() as i64).clamp(min, max))
            }
            ParamDomain::Real { min, max, decimals } => {
                ParamValue::Real(round_to(raw.clamp(min, max), decimals))
            }
        }
    }

    /// Number of representable values, used to validate population sizes.
    pub fn cardinality(&self) -> f64 {
        match *self {
            ParamDomain::Integer { min, max } => (max - min + 1) as f64,
            ParamDomain::Real { min, max, decimals } => {
                (max - min) * 10f64.powi(decimals as i32) + 1.0
            }
        }
    }
}

pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// One strategy parameter: stable code, display label, domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParamSpec {
    pub code: String,
    pub label: String,
    pub domain: ParamDomain,
}

impl ParamSpec {
    pub fn integer(code: &str, label: &str, min: i64, max: i64) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            domain: ParamDomain::Integer { min, max },
        }
    }

    pub fn real(code: &str, label: &str, min: f64, max: f64, decimals: u32) -> Self {
        Self {
            code: code.to_string(),
            label: label.to_string(),
            domain: ParamDomain::Real { min, max, decimals },
        }
    }
}

/// Strategy-specific constraint repair, re-applied after crossover and
/// mutation. Must be idempotent.
pub type RepairFn = fn(&mut Parameters);

/// Ordered parameter layout for one strategy. Immutable once registered.
#[derive(Debug, Clone)]
pub struct ParameterSchema {
    strategy: String,
    specs: Vec<ParamSpec>,
    repair: Option<RepairFn>,
}

impl ParameterSchema {
    pub fn new(strategy: impl Into<String>, specs: Vec<ParamSpec>) -> Self {
        Self {
            strategy: strategy.into(),
            specs,
            repair: None,
        }
    }

    pub fn with_repair(mut self, repair: RepairFn) -> Self {
        self.repair = Some(repair);
        self
    }

    pub fn strategy(&self) -> &str {
        &self.strategy
    }

    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn spec(&self, code: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.code == code)
    }

    /// Product of per-parameter cardinalities.
    pub fn domain_cardinality(&self) -> f64 {
        self.specs.iter().map(|s| s.domain.cardinality()).product()
    }

    /// Sample a full assignment, one value per parameter.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Parameters {
        self.specs
            .iter()
            .map(|spec| (spec.code.clone(), spec.domain.sample(rng)))
            .collect()
    }

    /// Apply the strategy's constraint repair, then re-round real values
    /// so derived quantities keep the schema's precision. Repairs take
    /// precedence over domain bounds, so no clamping happens here.
    pub fn repair(&self, params: &mut Parameters) {
        if let Some(repair) = self.repair {
            repair(params);
            for spec in &self.specs {
                if let ParamDomain::Real { decimals, .. } = spec.domain {
                    if let Some(ParamValue::Real(v)) = params.get(&spec.code).copied() {
                        params.insert(spec.code.clone(), ParamValue::Real(round_to(v, decimals)));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_integer_sampling_stays_in_bounds() {
        let domain = ParamDomain::Integer { min: 2, max: 200 };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            match domain.sample(&mut rng) {
                ParamValue::Int(v) => assert!((2..=200).contains(&v)),
                ParamValue::Real(_) => panic!("integer domain produced a real"),
            }
        }
    }

    #[test]
    fn test_real_sampling_respects_precision() {
        let domain = ParamDomain::Real { min: 0.01, max: 0.2, decimals: 2 };
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            match domain.sample(&mut rng) {
                ParamValue::Real(v) => {
                    assert!((0.01..=0.2).contains(&v));
                    let scaled = v * 100.0;
                    assert!((scaled - scaled.round()).abs() < 1e-9);
                }
                ParamValue::Int(_) => panic!("real domain produced an integer"),
            }
        }
    }

    #[test]
    fn test_constrain_truncates_and_clamps() {
        let domain = ParamDomain::Integer { min: 2, max: 10 };
        assert_eq!(domain.constrain(7.9), ParamValue::Int(7));
        assert_eq!(domain.constrain(-3.0), ParamValue::Int(2));
        assert_eq!(domain.constrain(1e9), ParamValue::Int(10));

        let domain = ParamDomain::Real { min: 0.1, max: 5.0, decimals: 2 };
        assert_eq!(domain.constrain(3.14159), ParamValue::Real(3.14));
        assert_eq!(domain.constrain(-40.0), ParamValue::Real(0.1));
    }

    #[test]
    fn test_domain_cardinality() {
        assert_eq!(ParamDomain::Integer { min: 1, max: 10 }.cardinality(), 10.0);
        let real = ParamDomain::Real { min: 0.0, max: 1.0, decimals: 2 };
        assert_eq!(real.cardinality(), 101.0);
    }

    #[test]
    fn test_schema_sample_covers_every_code() {
        let schema = ParameterSchema::new(
            "sma",
            vec![
                ParamSpec::integer("slow_ma", "Slow MA Period", 2, 200),
                ParamSpec::integer("fast_ma", "Fast MA Period", 2, 200),
            ],
        );
        let mut rng = StdRng::seed_from_u64(1);
        let params = schema.sample(&mut rng);

        assert_eq!(params.len(), 2);
        assert!(params.contains_key("slow_ma"));
        assert!(params.contains_key("fast_ma"));
    }
}
