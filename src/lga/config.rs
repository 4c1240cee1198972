//! LGA configuration.
//!
//! [`LgaConfig`] holds every parameter that controls the evolutionary loop.

use crate::error::{Error, Result};

/// Configuration for the locus-based genetic algorithm.
///
/// # Defaults
///
/// ```
/// use u_locus::lga::LgaConfig;
///
/// let config = LgaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.generations, 100);
/// assert_eq!(config.evolution_runs, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_locus::lga::LgaConfig;
///
/// let config = LgaConfig::default()
///     .with_population_size(200)
///     .with_selection_rate(0.2)
///     .with_crossover_rate(0.8)
///     .with_seed(7);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LgaConfig {
    /// Number of independent evolution runs. The best run wins.
    pub evolution_runs: usize,

    /// Generations per run. Each generation is one evaluation of the
    /// population, so the histories have exactly this many entries.
    pub generations: usize,

    /// Number of individuals in the population.
    ///
    /// Typical range: 50–500.
    pub population_size: usize,

    /// Fraction of the ranked population kept by truncation selection (0.0–1.0).
    ///
    /// The survivor count is `ceil(rate × population)`, never below one.
    pub selection_rate: f64,

    /// Probability that a pairing recombines instead of copying its parents (0.0–1.0).
    pub crossover_rate: f64,

    /// Per-locus probability of resampling a gene (0.0–1.0).
    pub mutation_rate: f64,

    /// Whether to evaluate individuals and runs in parallel using rayon.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Results are
    /// identical either way for a fixed seed.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit per run in milliseconds.
    ///
    /// Checked between generations, so a run may overshoot by one
    /// generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for LgaConfig {
    fn default() -> Self {
        Self {
            evolution_runs: 1,
            generations: 100,
            population_size: 100,
            selection_rate: 0.1,
            crossover_rate: 0.5,
            mutation_rate: 0.05,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl LgaConfig {
    /// Sets the number of independent runs.
    pub fn with_evolution_runs(mut self, n: usize) -> Self {
        self.evolution_runs = n;
        self
    }

    /// Sets the number of generations per run.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the selection rate.
    pub fn with_selection_rate(mut self, rate: f64) -> Self {
        self.selection_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the per-run wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Settings of the published LGA benchmark: 10 runs of 50 generations,
    /// population 100, rates 0.1 / 0.8 / 0.05.
    pub fn reference() -> Self {
        Self {
            evolution_runs: 10,
            generations: 50,
            crossover_rate: 0.8,
            ..Self::default()
        }
    }

    /// Preset for quick exploration: a single short run.
    ///
    /// - Population: 50, Generations: 30, Crossover: 0.8
    pub fn fast() -> Self {
        Self {
            population_size: 50,
            generations: 30,
            crossover_rate: 0.8,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.evolution_runs == 0 {
            return Err(Error::InvalidConfig("evolution_runs must be at least 1"));
        }
        if self.generations == 0 {
            return Err(Error::InvalidConfig("generations must be at least 1"));
        }
        if self.population_size == 0 {
            return Err(Error::InvalidConfig("population_size must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.selection_rate) {
            return Err(Error::InvalidConfig("selection_rate must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(Error::InvalidConfig("crossover_rate must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(Error::InvalidConfig("mutation_rate must lie in [0, 1]"));
        }
        if self.time_limit_ms == Some(0) {
            return Err(Error::InvalidConfig("time_limit_ms must be positive or None"));
        }
        Ok(())
    }
}
