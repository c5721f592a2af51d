//! Selection, crossover, mutation and constraint repair for offspring
//! breeding.

use super::individual::Individual;
use super::population::SeenParams;
use crate::error::{ParetuneError, Result};
use crate::schema::ParameterSchema;
use crate::types::Parameters;
use rand::Rng;

/// Attempts per requested offspring before breeding is declared stuck.
const BREED_ATTEMPTS_PER_SLOT: usize = 10_000;

/// Binary tournament: two distinct members drawn uniformly at random.
/// The lower rank wins; crowding distance breaks rank ties. Assumes a
/// population of at least two.
pub fn tournament_select<'a, R: Rng>(population: &'a [Individual], rng: &mut R) -> &'a Individual {
    let picked = rand::seq::index::sample(rng, population.len(), 2);
    let a = &population[picked.index(0)];
    let b = &population[picked.index(1)];

    if a.rank != b.rank {
        if a.rank < b.rank {
            a
        } else {
            b
        }
    } else if a.crowding_distance >= b.crowding_distance {
        a
    } else {
        b
    }
}

/// Uniform gene-subset crossover: the child starts as parent A, then a
/// random non-empty subset of codes is overwritten from parent B.
pub fn crossover<R: Rng>(
    parent_a: &Individual,
    parent_b: &Individual,
    schema: &ParameterSchema,
    rng: &mut R,
) -> Parameters {
    let mut child = parent_a.parameters.clone();
    let crossings = rng.gen_range(1..=schema.len());

    for idx in rand::seq::index::sample(rng, schema.len(), crossings) {
        let code = &schema.specs()[idx].code;
        if let Some(value) = parent_b.parameters.get(code) {
            child.insert(code.clone(), *value);
        }
    }

    child
}

/// Multiplicative mutation: each selected value is scaled by `1 + s` with
/// `s` uniform in [-2, 2], then clamped and re-rounded by its domain. The
/// subset may be empty, skipping mutation for this child entirely.
pub fn mutate<R: Rng>(params: &mut Parameters, schema: &ParameterSchema, rng: &mut R) {
    let mutations = rng.gen_range(0..=schema.len());
    if mutations == 0 {
        return;
    }

    for idx in rand::seq::index::sample(rng, schema.len(), mutations) {
        let spec = &schema.specs()[idx];
        if let Some(value) = params.get(&spec.code).copied() {
            let strength = rng.gen_range(-2.0..=2.0);
            let perturbed = value.as_f64() * (1.0 + strength);
            params.insert(spec.code.clone(), spec.domain.constrain(perturbed));
        }
    }
}

/// Breed a full batch of parameter-distinct offspring from a ranked,
/// distance-scored parent population. Children colliding with anything in
/// `seen` are discarded and rebred.
pub fn create_offspring<R: Rng>(
    parents: &[Individual],
    schema: &ParameterSchema,
    size: usize,
    seen: &mut SeenParams,
    rng: &mut R,
) -> Result<Vec<Individual>> {
    let mut offspring = Vec::with_capacity(size);
    let budget = size.saturating_mul(BREED_ATTEMPTS_PER_SLOT);
    let mut attempts = 0usize;

    while offspring.len() < size {
        attempts += 1;
        if attempts > budget {
            return Err(ParetuneError::ExhaustedSampling(format!(
                "bred {} of {} distinct offspring in {} attempts for strategy {}",
                offspring.len(),
                size,
                attempts - 1,
                schema.strategy()
            )));
        }

        let parent_a = tournament_select(parents, rng);
        let parent_b = tournament_select(parents, rng);

        let mut child = crossover(parent_a, parent_b, schema, rng);
        mutate(&mut child, schema, rng);
        schema.repair(&mut child);

        if seen.insert(&child) {
            offspring.push(Individual::new(child));
        }
    }

    Ok(offspring)
}
