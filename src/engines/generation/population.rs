use super::individual::Individual;
use crate::error::{ParetuneError, Result};
use crate::schema::ParameterSchema;
use crate::types::{params_signature, Parameters};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Every parameter assignment produced during a run, by canonical
/// signature. Seeds and offspring that collide with it are rejected.
#[derive(Debug, Default)]
pub struct SeenParams(HashSet<String>);

impl SeenParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an assignment. Returns false if it was already present.
    pub fn insert(&mut self, params: &Parameters) -> bool {
        self.0.insert(params_signature(params))
    }

    pub fn contains(&self, params: &Parameters) -> bool {
        self.0.contains(&params_signature(params))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Creates and trims populations against a schema.
pub struct PopulationFactory;

impl PopulationFactory {
    /// Sample `size` parameter-distinct individuals uniformly from the
    /// schema's domain. Success for size well below the domain cardinality
    /// is a documented precondition; the hard impossibility (domain smaller
    /// than the requested population) is rejected up front.
    pub fn create_initial<R: Rng>(
        schema: &ParameterSchema,
        size: usize,
        seen: &mut SeenParams,
        rng: &mut R,
    ) -> Result<Vec<Individual>> {
        let cardinality = schema.domain_cardinality();
        if cardinality < size as f64 {
            return Err(ParetuneError::ExhaustedSampling(format!(
                "strategy {} spans {} distinct assignments, population size {} requested",
                schema.strategy(),
                cardinality,
                size
            )));
        }

        let mut population = Vec::with_capacity(size);
        while population.len() < size {
            let params = schema.sample(rng);
            if seen.insert(&params) {
                population.push(Individual::new(params));
            }
        }

        Ok(population)
    }

    /// Rebuild the next parent population from ranked fronts. Whole fronts
    /// are appended in rank order; the first front that does not fit is cut
    /// by crowding distance, most isolated first, stable on ties. Returns
    /// exactly `size` individuals whenever the fronts hold at least `size`.
    pub fn trim(population: &[Individual], fronts: &[Vec<usize>], size: usize) -> Vec<Individual> {
        let mut next = Vec::with_capacity(size);

        for front in fronts {
            if next.len() + front.len() <= size {
                next.extend(front.iter().map(|&i| population[i].clone()));
            } else {
                let remaining = size - next.len();
                if remaining > 0 {
                    let mut by_distance = front.clone();
                    by_distance.sort_by(|&a, &b| {
                        population[b]
                            .crowding_distance
                            .partial_cmp(&population[a].crowding_distance)
                            .unwrap_or(Ordering::Equal)
                    });
                    next.extend(
                        by_distance
                            .into_iter()
                            .take(remaining)
                            .map(|i| population[i].clone()),
                    );
                }
            }

            if next.len() == size {
                break;
            }
        }

        next
    }
}
