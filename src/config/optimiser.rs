use super::traits::ConfigSection;
use crate::error::ParetuneError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimiserConfig {
    /// Individuals per generation; conserved by every trim.
    pub population_size: usize,
    /// Generations to run. The caller-specified count is the only
    /// stopping criterion.
    pub generations: usize,
    /// Fan evaluation out over rayon. The evaluator must tolerate
    /// concurrent calls either way.
    pub parallel_evaluation: bool,
    /// Fixed RNG seed for reproducible runs.
    pub seed: Option<u64>,
}

impl Default for OptimiserConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 20,
            parallel_evaluation: false,
            seed: None,
        }
    }
}

impl ConfigSection for OptimiserConfig {
    fn section_name() -> &'static str {
        "optimiser"
    }

    fn validate(&self) -> Result<(), ParetuneError> {
        if self.population_size < 4 {
            return Err(ParetuneError::Configuration(
                "Population size must be at least 4".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(OptimiserConfig::default().validate().is_ok());
    }

    #[test]
    fn test_tiny_population_is_rejected() {
        let config = OptimiserConfig {
            population_size: 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate().unwrap_err(),
            ParetuneError::Configuration(_)
        ));
    }
}
