//! # Engine
//!
//! The `Engine` struct drives the generational loop: per generation it runs
//! evaluate → rank → recombine → mutate as a fixed, non-reorderable
//! pipeline, then checks the wall-clock budget, the cooperative stop flag,
//! and the iteration budget, in that order. Generations execute strictly
//! sequentially on the calling thread; the only place control leaves the
//! engine is the fitness callback.
//!
//! Cancellation is cooperative: [`StopHandle::stop`] may be called from any
//! thread and is observed once per generation boundary, never preemptively,
//! so an in-flight fitness call cannot be interrupted and elapsed time may
//! overrun the budget by up to one generation's evaluator cost.
//!
//! Results are read from the snapshot taken immediately after the most
//! recent ranking pass; the partially recombined and mutated store of the
//! terminating generation is never exposed.
//!
//! ## Example
//!
//! ```rust
//! use bitevolve::engine::{Engine, EngineConfig, Popcount, RunOutcome};
//!
//! let config = EngineConfig::builder()
//!     .population_size(8)
//!     .gene_count(8)
//!     .rng_seed(42)
//!     .iterations(5)
//!     .build()
//!     .unwrap();
//!
//! let mut engine = Engine::new(config, Popcount).unwrap();
//! let outcome = engine.run().unwrap();
//! assert_eq!(outcome, RunOutcome::Completed);
//! let (best, fitness) = engine.best().unwrap();
//! assert_eq!(fitness, best.count_ones() as f64);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{EngineError, Result};
use crate::mutation::mutate;
use crate::population::Population;
use crate::ranking::rank;
use crate::recombination::recombine;
use crate::rng::SeededRng;

use super::config::EngineConfig;
use super::fitness::FitnessFunction;

/// Terminal state of a run. All variants are successful terminations;
/// failures are reported through `Err` instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The configured number of generations completed.
    Completed,
    /// The wall-clock budget was reached at a generation boundary.
    TimeLimitExceeded,
    /// The cooperative stop flag was cleared externally.
    Cancelled,
}

impl RunOutcome {
    /// Returns `true` for the early-stop terminations.
    pub fn is_early_stop(&self) -> bool {
        matches!(self, Self::TimeLimitExceeded | Self::Cancelled)
    }
}

/// Clone-able cancellation token for a running engine.
///
/// Backed by an atomic flag so `stop` is visible to the loop thread no
/// matter which thread calls it.
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Requests a cooperative stop. The loop observes the request at the
    /// next generation boundary and terminates as `Cancelled`.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while a run is in progress and not yet stopped.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Cleanup hook type: runs on every termination, success or failure.
type CleanupHook = Box<dyn FnMut() -> Result<()> + Send>;

/// The generational optimizer.
///
/// Owns its PRNG, chromosome store, and fitness vector exclusively; those
/// must not be shared with another engine instance. The fitness capability
/// is injected at construction.
pub struct Engine<F: FitnessFunction> {
    config: EngineConfig,
    fitness_fn: F,
    rng: SeededRng,
    population: Population,
    /// Snapshot of the store as of the most recent ranking pass.
    ranked: Population,
    has_ranked: bool,
    running: Arc<AtomicBool>,
    generations_run: usize,
    cleanup_hook: Option<CleanupHook>,
}

impl<F: FitnessFunction> Engine<F> {
    /// Creates an engine and builds its initial population.
    ///
    /// Seed patterns are copied verbatim into the leading slots; the rest
    /// of the store is filled from the freshly seeded PRNG. The fitness
    /// vector starts at zero and the engine is not running.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an invalid configuration;
    /// no partial state is created.
    pub fn new(config: EngineConfig, fitness_fn: F) -> Result<Self> {
        config.validate()?;
        let mut rng = SeededRng::from_seed(config.rng_seed);
        let population = Population::initialize(
            config.population_size,
            config.gene_count,
            &config.seed_patterns,
            &mut rng,
        )?;
        let ranked = population.clone();
        Ok(Self {
            config,
            fitness_fn,
            rng,
            population,
            ranked,
            has_ranked: false,
            running: Arc::new(AtomicBool::new(false)),
            generations_run: 0,
            cleanup_hook: None,
        })
    }

    /// Installs a hook that runs after every termination, regardless of
    /// outcome. A hook failure is logged and reported separately; it never
    /// masks the primary run result.
    pub fn with_cleanup_hook(
        mut self,
        hook: impl FnMut() -> Result<()> + Send + 'static,
    ) -> Self {
        self.cleanup_hook = Some(Box::new(hook));
        self
    }

    /// Replaces the configuration and reinitializes the PRNG and the
    /// population in full. Nothing is reused across configuration edits.
    pub fn reconfigure(&mut self, config: EngineConfig) -> Result<()> {
        config.validate()?;
        let mut rng = SeededRng::from_seed(config.rng_seed);
        let population = Population::initialize(
            config.population_size,
            config.gene_count,
            &config.seed_patterns,
            &mut rng,
        )?;
        self.ranked = population.clone();
        self.population = population;
        self.rng = rng;
        self.config = config;
        self.has_ranked = false;
        self.generations_run = 0;
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns a handle for stopping the run from another thread.
    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            running: Arc::clone(&self.running),
        }
    }

    /// Requests a cooperative stop of the current run.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Returns `true` while `run` is in progress.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Number of generations whose ranking pass completed.
    pub fn generations_run(&self) -> usize {
        self.generations_run
    }

    /// The population as of the most recent ranking pass, best first.
    ///
    /// Before the first generation this is the initial store with an
    /// all-zero fitness vector.
    pub fn ranked_population(&self) -> &Population {
        &self.ranked
    }

    /// The best chromosome and its fitness, once at least one ranking pass
    /// has completed.
    pub fn best(&self) -> Option<(&crate::chromosome::Chromosome, f64)> {
        if self.has_ranked {
            Some((self.ranked.chromosome(0), self.ranked.fitness()[0]))
        } else {
            None
        }
    }

    /// Human-readable summary of the best chromosome's active gene indices,
    /// suitable for a collaborator that maps genes back to domain elements.
    pub fn best_summary(&self) -> String {
        match self.best() {
            Some((chromosome, fitness)) => {
                let active = chromosome.active_indices();
                if active.is_empty() {
                    format!("no active genes (fitness {})", fitness)
                } else {
                    let indices: Vec<String> =
                        active.iter().map(|idx| idx.to_string()).collect();
                    format!(
                        "active genes {} ({} of {}, fitness {})",
                        indices.join(", "),
                        active.len(),
                        chromosome.len(),
                        fitness
                    )
                }
            }
            None => "no ranked population yet".to_string(),
        }
    }

    /// Runs the generational loop to a terminal state.
    ///
    /// Per generation: the fitness callback fills the fitness vector, the
    /// population is ranked and snapshotted, then recombined and mutated.
    /// The wall-clock budget, the stop flag, and the iteration budget are
    /// checked at the generation boundary, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Evaluation`] if the fitness callback fails;
    /// the failing generation is not committed and the cleanup hook still
    /// runs. Cancellation and time-limit stops are `Ok` outcomes.
    pub fn run(&mut self) -> Result<RunOutcome> {
        self.running.store(true, Ordering::SeqCst);
        let started = Instant::now();
        let result = self.drive(started);
        self.finish(result)
    }

    fn drive(&mut self, started: Instant) -> Result<RunOutcome> {
        let budget = Duration::from_secs(self.config.time_budget_secs);

        for generation in 0..self.config.iterations {
            let (chromosomes, fitness) = self.population.evaluation_view();
            self.fitness_fn
                .assign_fitness(chromosomes, fitness)
                .map_err(|e| EngineError::Evaluation {
                    generation,
                    source: Box::new(e),
                })?;

            rank(&mut self.population, self.config.favor_sparse);
            self.ranked = self.population.clone();
            self.has_ranked = true;
            self.generations_run = generation + 1;
            debug!(
                generation,
                best_fitness = self.ranked.fitness()[0],
                "generation ranked"
            );

            recombine(&mut self.population, &mut self.rng);
            mutate(&mut self.population, &mut self.rng);

            if !budget.is_zero() && started.elapsed() >= budget {
                info!(
                    generation,
                    elapsed_secs = started.elapsed().as_secs_f64(),
                    "wall-clock budget reached"
                );
                return Ok(RunOutcome::TimeLimitExceeded);
            }
            if !self.running.load(Ordering::SeqCst) {
                info!(generation, "cooperative stop observed");
                return Ok(RunOutcome::Cancelled);
            }
        }

        Ok(RunOutcome::Completed)
    }

    /// Terminal cleanup: clears the running flag and runs the optional
    /// hook. A hook failure is reported without masking `result`.
    fn finish(&mut self, result: Result<RunOutcome>) -> Result<RunOutcome> {
        self.running.store(false, Ordering::SeqCst);
        if let Some(hook) = self.cleanup_hook.as_mut() {
            if let Err(hook_err) = hook() {
                warn!(error = %hook_err, "cleanup hook failed; primary outcome unchanged");
            }
        }
        if let Ok(outcome) = &result {
            info!(
                ?outcome,
                generations = self.generations_run,
                "run terminated"
            );
        }
        result
    }
}
