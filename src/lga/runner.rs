//! LGA evolutionary loop execution.
//!
//! [`Evolution`] drives a single run as an explicit state machine:
//! `Init → Evaluate → (Reproduce → Evaluate)* → Done`.
//! [`LgaRunner`] executes several independent runs and keeps the best.

use super::codec::GenotypeCodec;
use super::config::LgaConfig;
use super::operators::{crossover, mutate, select};
use super::population::{self, evaluate, mean_fitness};
use super::types::Individual;
use crate::error::{Error, Result};
use crate::graph::Graph;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Upper bound on history preallocation; generation counts may be huge when
/// a run relies on cancellation or a time limit.
const HISTORY_PREALLOC: usize = 4096;

/// State of a single evolution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// No population yet.
    Init,
    /// Population must be decoded, scored and ranked.
    Evaluate,
    /// Ranked population must be bred into the next generation.
    Reproduce,
    /// Run finished.
    Done,
}

/// Outcome of one evolution run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Best individual seen during the run (always evaluated).
    pub best: Individual,

    /// Fitness of `best`.
    pub best_fitness: f64,

    /// Mean population fitness per generation.
    pub avg_fitness_history: Vec<f64>,

    /// Run-best fitness per generation (non-decreasing).
    pub best_fitness_history: Vec<f64>,

    /// Generations evaluated.
    pub generations: usize,

    /// Whether the run stopped early on cancellation or time limit.
    pub cancelled: bool,
}

/// Result of a multi-run LGA optimization.
///
/// Histories belong to the run that produced `best`.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionResult {
    /// Best individual across all runs.
    pub best: Individual,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: f64,

    /// Mean population fitness per generation of the winning run.
    pub avg_fitness_history: Vec<f64>,

    /// Best fitness per generation of the winning run.
    pub best_fitness_history: Vec<f64>,

    /// Zero-based index of the winning run.
    pub best_run: usize,

    /// Number of runs that executed.
    pub runs: usize,

    /// Whether any run was cut short by cancellation or time limit.
    pub cancelled: bool,
}

/// A single evolution run.
///
/// The random source is injected on every [`step`](Self::step), so a run
/// is fully reproducible from a seeded RNG.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_locus::{Graph, lga::{Evolution, GenotypeCodec, LgaConfig, RunPhase}};
///
/// let g = Graph::from_edges([(0, 1), (1, 2), (2, 3), (3, 0)]);
/// let codec = GenotypeCodec::build(&g).unwrap();
/// let config = LgaConfig::default().with_population_size(10).with_generations(3);
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let mut evo = Evolution::new(&g, &codec, &config);
/// assert_eq!(evo.step(&mut rng).unwrap(), RunPhase::Evaluate);
/// assert_eq!(evo.step(&mut rng).unwrap(), RunPhase::Reproduce);
/// let outcome = evo.run(&mut rng).unwrap();
/// assert_eq!(outcome.generations, 3);
/// ```
pub struct Evolution<'a> {
    graph: &'a Graph,
    codec: &'a GenotypeCodec,
    config: &'a LgaConfig,
    phase: RunPhase,
    population: Vec<Individual>,
    best: Option<Individual>,
    best_fitness: f64,
    avg_history: Vec<f64>,
    best_history: Vec<f64>,
    cancel: Option<Arc<AtomicBool>>,
    started: Option<Instant>,
    cancelled: bool,
}

impl<'a> Evolution<'a> {
    /// Creates a run in the [`RunPhase::Init`] state.
    pub fn new(graph: &'a Graph, codec: &'a GenotypeCodec, config: &'a LgaConfig) -> Self {
        Self {
            graph,
            codec,
            config,
            phase: RunPhase::Init,
            population: Vec::new(),
            best: None,
            best_fitness: f64::NEG_INFINITY,
            avg_history: Vec::with_capacity(config.generations.min(HISTORY_PREALLOC)),
            best_history: Vec::with_capacity(config.generations.min(HISTORY_PREALLOC)),
            cancel: None,
            started: None,
            cancelled: false,
        }
    }

    /// Attaches a cancellation flag checked between generations.
    pub fn with_cancel(mut self, cancel: Option<Arc<AtomicBool>>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Current state.
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Generations evaluated so far.
    pub fn generation(&self) -> usize {
        self.best_history.len()
    }

    /// Current population (ranked right after evaluation).
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Best individual so far.
    pub fn best(&self) -> Option<&Individual> {
        self.best.as_ref()
    }

    /// Advances the state machine by one state and returns the new state.
    ///
    /// Calling `step` in [`RunPhase::Done`] is a no-op.
    pub fn step<R: Rng>(&mut self, rng: &mut R) -> Result<RunPhase> {
        self.phase = match self.phase {
            RunPhase::Init => {
                self.population = population::generate(self.codec, self.config.population_size, rng)?;
                self.started = Some(Instant::now());
                RunPhase::Evaluate
            }
            RunPhase::Evaluate => self.evaluate_generation()?,
            RunPhase::Reproduce => {
                let survivors = select(&self.population, self.config.selection_rate)?;
                let offspring = crossover(
                    self.codec,
                    &survivors,
                    self.config.population_size,
                    self.config.crossover_rate,
                    rng,
                )?;
                self.population = mutate(self.codec, &offspring, self.config.mutation_rate, rng)?;
                RunPhase::Evaluate
            }
            RunPhase::Done => RunPhase::Done,
        };
        Ok(self.phase)
    }

    fn evaluate_generation(&mut self) -> Result<RunPhase> {
        let current = std::mem::take(&mut self.population);
        self.population = evaluate(self.graph, self.codec, current, self.config.parallel)?;

        let top = population::best(&self.population)?;
        let top_fitness = top.fitness().unwrap_or(f64::NEG_INFINITY);
        if self.best.is_none() || top_fitness > self.best_fitness {
            self.best = Some(top.clone());
            self.best_fitness = top_fitness;
        }

        let mean = mean_fitness(&self.population).unwrap_or(f64::NEG_INFINITY);
        self.avg_history.push(mean);
        self.best_history.push(self.best_fitness);

        let generation = self.generation();
        debug!(generation, best = self.best_fitness, mean, "generation evaluated");

        if generation >= self.config.generations {
            Ok(RunPhase::Done)
        } else if self.stop_requested() {
            warn!(generation, "evolution run stopped early");
            self.cancelled = true;
            Ok(RunPhase::Done)
        } else {
            Ok(RunPhase::Reproduce)
        }
    }

    fn stop_requested(&self) -> bool {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return true;
            }
        }
        match (self.config.time_limit_ms, self.started) {
            (Some(ms), Some(start)) => start.elapsed() >= Duration::from_millis(ms),
            _ => false,
        }
    }

    /// Drives the run to [`RunPhase::Done`] and returns its outcome.
    pub fn run<R: Rng>(mut self, rng: &mut R) -> Result<RunOutcome> {
        while self.step(rng)? != RunPhase::Done {}
        self.into_outcome()
    }

    /// Returns the outcome of a finished run.
    ///
    /// # Errors
    /// [`Error::EmptyPopulation`] if no generation was ever evaluated.
    pub fn into_outcome(self) -> Result<RunOutcome> {
        let best = self.best.ok_or(Error::EmptyPopulation)?;
        Ok(RunOutcome {
            best,
            best_fitness: self.best_fitness,
            generations: self.best_history.len(),
            avg_fitness_history: self.avg_history,
            best_fitness_history: self.best_history,
            cancelled: self.cancelled,
        })
    }
}

/// Executes independent LGA runs on one graph.
///
/// # Usage
///
/// ```
/// use u_locus::{Graph, lga::{LgaConfig, LgaRunner}};
///
/// let g = Graph::from_edges([(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)]);
/// let config = LgaConfig::default()
///     .with_population_size(30)
///     .with_generations(20)
///     .with_seed(42);
/// let result = LgaRunner::run(&g, &config).unwrap();
/// assert_eq!(result.best_fitness_history.len(), 20);
/// assert!(result.best_fitness > 0.0);
/// ```
pub struct LgaRunner;

impl LgaRunner {
    /// Runs the LGA.
    pub fn run(graph: &Graph, config: &LgaConfig) -> Result<EvolutionResult> {
        Self::run_with_cancel(graph, config, None)
    }

    /// Runs the LGA with an optional cancellation token.
    ///
    /// If the flag is set, each active run stops after its current
    /// generation and no new run starts.
    pub fn run_with_cancel(
        graph: &Graph,
        config: &LgaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(graph, config, &mut rng, cancel)
    }

    /// Runs the LGA drawing every per-run seed from `rng`.
    ///
    /// One seed per run is drawn up front, so results do not depend on
    /// whether runs execute sequentially or in parallel.
    pub fn run_with_rng<R: Rng>(
        graph: &Graph,
        config: &LgaConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<EvolutionResult> {
        config.validate()?;
        let codec = GenotypeCodec::build(graph)?;
        if graph.edge_count() == 0 {
            return Err(Error::InvalidGraph("modularity is undefined without edges"));
        }

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            runs = config.evolution_runs,
            "starting locus-based GA"
        );

        let seeds: Vec<u64> = (0..config.evolution_runs).map(|_| rng.random()).collect();
        let outcomes = run_all(graph, &codec, config, &seeds, &cancel)?;

        let runs = outcomes.len();
        let cancelled = outcomes.iter().any(|o| o.cancelled);
        let mut winner: Option<(usize, RunOutcome)> = None;
        for (run, outcome) in outcomes.into_iter().enumerate() {
            let better = match winner {
                None => true,
                Some((_, ref w)) => outcome.best_fitness > w.best_fitness,
            };
            if better {
                info!(run = run + 1, fitness = outcome.best_fitness, "new global best");
                winner = Some((run, outcome));
            }
        }

        let (best_run, outcome) = winner.ok_or(Error::EmptyPopulation)?;
        Ok(EvolutionResult {
            best: outcome.best,
            best_fitness: outcome.best_fitness,
            avg_fitness_history: outcome.avg_fitness_history,
            best_fitness_history: outcome.best_fitness_history,
            best_run,
            runs,
            cancelled,
        })
    }
}

fn run_once(
    graph: &Graph,
    codec: &GenotypeCodec,
    config: &LgaConfig,
    run: usize,
    seed: u64,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RunOutcome> {
    info!(run = run + 1, "evolution run started");
    let mut rng = StdRng::seed_from_u64(seed);
    let outcome = Evolution::new(graph, codec, config)
        .with_cancel(cancel)
        .run(&mut rng)?;
    info!(
        run = run + 1,
        fitness = outcome.best_fitness,
        generations = outcome.generations,
        "evolution run finished"
    );
    Ok(outcome)
}

fn is_cancelled(cancel: &Option<Arc<AtomicBool>>) -> bool {
    cancel.as_ref().is_some_and(|f| f.load(Ordering::Relaxed))
}

fn run_sequential(
    graph: &Graph,
    codec: &GenotypeCodec,
    config: &LgaConfig,
    seeds: &[u64],
    cancel: &Option<Arc<AtomicBool>>,
) -> Result<Vec<RunOutcome>> {
    let mut outcomes = Vec::with_capacity(seeds.len());
    for (run, &seed) in seeds.iter().enumerate() {
        if !outcomes.is_empty() && is_cancelled(cancel) {
            break;
        }
        outcomes.push(run_once(graph, codec, config, run, seed, cancel.clone())?);
    }
    Ok(outcomes)
}

#[cfg(feature = "parallel")]
fn run_all(
    graph: &Graph,
    codec: &GenotypeCodec,
    config: &LgaConfig,
    seeds: &[u64],
    cancel: &Option<Arc<AtomicBool>>,
) -> Result<Vec<RunOutcome>> {
    if config.parallel && seeds.len() > 1 {
        seeds
            .par_iter()
            .enumerate()
            .map(|(run, &seed)| run_once(graph, codec, config, run, seed, cancel.clone()))
            .collect()
    } else {
        run_sequential(graph, codec, config, seeds, cancel)
    }
}

#[cfg(not(feature = "parallel"))]
fn run_all(
    graph: &Graph,
    codec: &GenotypeCodec,
    config: &LgaConfig,
    seeds: &[u64],
    cancel: &Option<Arc<AtomicBool>>,
) -> Result<Vec<RunOutcome>> {
    run_sequential(graph, codec, config, seeds, cancel)
}

// ============================================================================
// Tests
// ============================================================================
