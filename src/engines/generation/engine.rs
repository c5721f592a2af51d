use super::individual::Individual;
use super::operators;
use super::pareto;
use super::population::{PopulationFactory, SeenParams};
use super::sink::ResultSink;
use crate::config::{ConfigSection, OptimiserConfig};
use crate::engines::evaluation::Evaluator;
use crate::error::{ParetuneError, Result};
use crate::schema::ParameterSchema;
use crate::types::RunContext;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::Arc;

/// Per-generation hooks for progress display.
pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_individual_evaluated(&mut self, evaluated: usize, total: usize);
    fn on_generation_complete(&mut self, generation: usize, population: &[Individual]);
}

/// Drives the generational loop: seed, evaluate, then breed, merge, sort
/// and trim for a fixed number of generations. Strictly sequential across
/// generations; evaluation within a generation may fan out over rayon.
pub struct Nsga2Engine {
    config: OptimiserConfig,
    schema: Arc<ParameterSchema>,
    evaluator: Box<dyn Evaluator>,
    ctx: RunContext,
    sink: Option<Box<dyn ResultSink>>,
    seen: SeenParams,
    rng: StdRng,
}

impl Nsga2Engine {
    pub fn new(
        config: OptimiserConfig,
        schema: Arc<ParameterSchema>,
        evaluator: Box<dyn Evaluator>,
        ctx: RunContext,
    ) -> Result<Self> {
        config.validate()?;
        if schema.is_empty() {
            return Err(ParetuneError::Configuration(format!(
                "strategy {} declares no parameters",
                schema.strategy()
            )));
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            config,
            schema,
            evaluator,
            ctx,
            sink: None,
            seen: SeenParams::new(),
            rng,
        })
    }

    /// Attach a per-generation result sink.
    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Run the configured number of generations and return the final
    /// parent population, ranked, distance-scored and order-annotated.
    pub fn run<C: ProgressCallback>(&mut self, callback: &mut C) -> Result<Vec<Individual>> {
        let size = self.config.population_size;

        let mut parents =
            PopulationFactory::create_initial(&self.schema, size, &mut self.seen, &mut self.rng)?;
        self.stamp(&mut parents);
        info!(
            "seeded {} individuals for strategy {} on {} {}",
            parents.len(),
            self.schema.strategy(),
            self.ctx.symbol,
            self.ctx.tf
        );

        self.evaluate(&mut parents, callback);

        // Seed diversity scores over the whole population so the first
        // round of tournaments has distances to compare
        let everyone: Vec<usize> = (0..parents.len()).collect();
        pareto::crowding_distance(&mut parents, &everyone);

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            let mut offspring = operators::create_offspring(
                &parents,
                &self.schema,
                size,
                &mut self.seen,
                &mut self.rng,
            )?;
            self.stamp(&mut offspring);
            self.evaluate(&mut offspring, callback);

            // Merge into a fresh arena. Indices below are valid only for
            // this generation
            let mut arena = parents;
            arena.append(&mut offspring);
            for individual in arena.iter_mut() {
                individual.reset_results();
            }

            let fronts = pareto::fast_non_dominated_sort(&mut arena);
            for front in &fronts {
                pareto::crowding_distance(&mut arena, front);
            }

            parents = PopulationFactory::trim(&arena, &fronts, size);
            for (position, individual) in parents.iter_mut().enumerate() {
                individual.order = Some(position);
            }

            debug!(
                "generation {}: {} fronts, front 0 holds {}",
                generation + 1,
                fronts.len(),
                fronts.first().map_or(0, Vec::len)
            );

            if let Some(sink) = self.sink.as_mut() {
                sink.on_generation(generation, &parents)?;
            }
            callback.on_generation_complete(generation, &parents);
        }

        Ok(parents)
    }

    fn stamp(&self, population: &mut [Individual]) {
        for individual in population.iter_mut() {
            individual.set_context(&self.ctx);
        }
    }

    /// Score every member of a freshly bred population exactly once. Each
    /// individual is exclusively owned by its evaluating task, so the
    /// parallel path needs no locking.
    fn evaluate<C: ProgressCallback>(&self, population: &mut [Individual], callback: &mut C) {
        let total = population.len();

        if self.config.parallel_evaluation {
            let evaluator = &self.evaluator;
            population.par_iter_mut().for_each(|individual| {
                individual.record(evaluator.evaluate(&individual.parameters).or_worst());
            });
            callback.on_individual_evaluated(total, total);
        } else {
            for (i, individual) in population.iter_mut().enumerate() {
                individual.record(self.evaluator.evaluate(&individual.parameters).or_worst());
                callback.on_individual_evaluated(i + 1, total);
            }
        }
    }
}
