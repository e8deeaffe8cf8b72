//! Run configuration
//!
//! One typed parameter set per algorithm, validated once before a run starts.
//! Field names serialize in camelCase so a presentation layer can hand over
//! its form state as JSON:
//!
//! ```rust
//! use swarmlab::config::{AlgorithmConfig, RunConfig};
//!
//! let config = RunConfig::from_json(
//!     r#"{ "algorithm": "pso", "numParticles": 5, "dimensions": 2, "seed": 42 }"#,
//! ).unwrap();
//!
//! assert!(matches!(config.algorithm, AlgorithmConfig::Pso(ref pso) if pso.num_particles == 5));
//! assert_eq!(config.seed, Some(42));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineResult};
use crate::space::bounds::Bounds;
use crate::space::search_space::{SearchSpace, MAX_DIMENSION, MIN_DIMENSION};

fn check_dimension(dimensions: usize) -> Result<(), ConfigError> {
    if (MIN_DIMENSION..=MAX_DIMENSION).contains(&dimensions) {
        Ok(())
    } else {
        Err(ConfigError::Dimension(dimensions))
    }
}

fn check_population(
    algorithm: Algorithm,
    minimum: usize,
    actual: usize,
) -> Result<(), ConfigError> {
    if actual >= minimum {
        Ok(())
    } else {
        Err(ConfigError::PopulationSize {
            algorithm: algorithm.name(),
            minimum,
            actual,
        })
    }
}

fn check_iterations(max_iterations: usize) -> Result<(), ConfigError> {
    if max_iterations > 0 {
        Ok(())
    } else {
        Err(ConfigError::MaxIterations)
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Rate { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonNegative { name, value })
    }
}

/// Algorithm identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Particle Swarm Optimization
    Pso,
    /// Genetic Algorithm
    Ga,
    /// Differential Evolution
    De,
    /// Firefly Algorithm
    Fa,
    /// Bat Algorithm
    Ba,
    /// Grey Wolf Optimizer
    Gwo,
}

impl Algorithm {
    /// All algorithms, in presentation order
    pub const ALL: [Algorithm; 6] = [
        Algorithm::Pso,
        Algorithm::Ga,
        Algorithm::De,
        Algorithm::Fa,
        Algorithm::Ba,
        Algorithm::Gwo,
    ];

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Pso => "PSO",
            Algorithm::Ga => "GA",
            Algorithm::De => "DE",
            Algorithm::Fa => "FA",
            Algorithm::Ba => "BA",
            Algorithm::Gwo => "GWO",
        }
    }

    /// Smallest population the update rule can work with
    pub fn min_population(&self) -> usize {
        match self {
            Algorithm::Pso | Algorithm::Fa | Algorithm::Ba => 1,
            Algorithm::Ga => 2,
            Algorithm::Gwo => 3,
            // target plus three distinct donors
            Algorithm::De => 4,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Particle Swarm Optimization parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsoConfig {
    /// Swarm size
    pub num_particles: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Inertia weight
    pub w: f64,
    /// Cognitive coefficient
    pub c1: f64,
    /// Social coefficient
    pub c2: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            num_particles: 30,
            dimensions: 3,
            max_iterations: 100,
            w: 0.5,
            c1: 1.5,
            c2: 1.5,
        }
    }
}

impl PsoConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::Pso, Algorithm::Pso.min_population(), self.num_particles)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_iterations)?;
        check_non_negative("w", self.w)?;
        check_non_negative("c1", self.c1)?;
        check_non_negative("c2", self.c2)
    }
}

/// Genetic Algorithm parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GaConfig {
    /// Number of individuals
    pub population_size: usize,
    /// Probability of single-point crossover per parent pair
    pub crossover_rate: f64,
    /// Probability of mutating each gene
    pub mutation_rate: f64,
    /// Generation budget
    pub max_generations: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            crossover_rate: 0.7,
            mutation_rate: 0.01,
            max_generations: 100,
            dimensions: 3,
        }
    }
}

impl GaConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::Ga, Algorithm::Ga.min_population(), self.population_size)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_generations)?;
        check_rate("crossoverRate", self.crossover_rate)?;
        check_rate("mutationRate", self.mutation_rate)
    }
}

/// Differential Evolution parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeConfig {
    /// Number of individuals
    pub population_size: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Differential weight F
    pub mutation_factor: f64,
    /// Binomial crossover rate CR
    pub crossover_rate: f64,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            dimensions: 3,
            max_iterations: 100,
            mutation_factor: 0.8,
            crossover_rate: 0.9,
        }
    }
}

impl DeConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::De, Algorithm::De.min_population(), self.population_size)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_iterations)?;
        check_non_negative("mutationFactor", self.mutation_factor)?;
        check_rate("crossoverRate", self.crossover_rate)
    }
}

/// Firefly Algorithm parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FaConfig {
    /// Number of fireflies
    pub num_fireflies: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Randomization scale
    pub alpha: f64,
    /// Attractiveness at distance zero
    pub beta0: f64,
    /// Light absorption coefficient
    pub gamma: f64,
}

impl Default for FaConfig {
    fn default() -> Self {
        Self {
            num_fireflies: 30,
            dimensions: 3,
            max_iterations: 100,
            alpha: 0.5,
            beta0: 1.0,
            gamma: 1.0,
        }
    }
}

impl FaConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::Fa, Algorithm::Fa.min_population(), self.num_fireflies)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_iterations)?;
        check_non_negative("alpha", self.alpha)?;
        check_non_negative("beta0", self.beta0)?;
        check_non_negative("gamma", self.gamma)
    }
}

fn default_decay() -> f64 {
    0.9
}

/// Bat Algorithm parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BaConfig {
    /// Number of bats
    pub population_size: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Lower end of the frequency range
    pub frequency_min: f64,
    /// Upper end of the frequency range
    pub frequency_max: f64,
    /// Initial pulse rate
    pub pulse_rate: f64,
    /// Initial loudness
    pub loudness: f64,
    /// Loudness multiplier applied every iteration
    #[serde(default = "default_decay")]
    pub alpha: f64,
    /// Pulse-rate contraction toward 1 applied every iteration
    #[serde(default = "default_decay")]
    pub gamma: f64,
}

impl Default for BaConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            dimensions: 3,
            max_iterations: 100,
            frequency_min: 0.0,
            frequency_max: 2.0,
            pulse_rate: 0.5,
            loudness: 0.5,
            alpha: default_decay(),
            gamma: default_decay(),
        }
    }
}

impl BaConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::Ba, Algorithm::Ba.min_population(), self.population_size)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_iterations)?;
        if !(self.frequency_min.is_finite()
            && self.frequency_max.is_finite()
            && self.frequency_min <= self.frequency_max)
        {
            return Err(ConfigError::FrequencyRange {
                min: self.frequency_min,
                max: self.frequency_max,
            });
        }
        check_rate("pulseRate", self.pulse_rate)?;
        check_rate("loudness", self.loudness)?;
        check_rate("alpha", self.alpha)?;
        check_rate("gamma", self.gamma)
    }
}

/// Grey Wolf Optimizer parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GwoConfig {
    /// Pack size
    pub population_size: usize,
    /// Dimensionality (2 or 3)
    pub dimensions: usize,
    /// Iteration budget
    pub max_iterations: usize,
    /// Initial value of the control parameter, annealed linearly to 0
    pub a: f64,
}

impl Default for GwoConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            dimensions: 3,
            max_iterations: 100,
            a: 2.0,
        }
    }
}

impl GwoConfig {
    /// Validate all parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_population(Algorithm::Gwo, Algorithm::Gwo.min_population(), self.population_size)?;
        check_dimension(self.dimensions)?;
        check_iterations(self.max_iterations)?;
        check_non_negative("a", self.a)
    }
}

/// Parameters for one of the six algorithms
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "lowercase")]
pub enum AlgorithmConfig {
    /// Particle Swarm Optimization
    Pso(PsoConfig),
    /// Genetic Algorithm
    Ga(GaConfig),
    /// Differential Evolution
    De(DeConfig),
    /// Firefly Algorithm
    Fa(FaConfig),
    /// Bat Algorithm
    Ba(BaConfig),
    /// Grey Wolf Optimizer
    Gwo(GwoConfig),
}

impl AlgorithmConfig {
    /// Default parameters for `algorithm`
    pub fn default_for(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Pso => Self::Pso(PsoConfig::default()),
            Algorithm::Ga => Self::Ga(GaConfig::default()),
            Algorithm::De => Self::De(DeConfig::default()),
            Algorithm::Fa => Self::Fa(FaConfig::default()),
            Algorithm::Ba => Self::Ba(BaConfig::default()),
            Algorithm::Gwo => Self::Gwo(GwoConfig::default()),
        }
    }

    /// Which algorithm these parameters belong to
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Pso(_) => Algorithm::Pso,
            Self::Ga(_) => Algorithm::Ga,
            Self::De(_) => Algorithm::De,
            Self::Fa(_) => Algorithm::Fa,
            Self::Ba(_) => Algorithm::Ba,
            Self::Gwo(_) => Algorithm::Gwo,
        }
    }

    /// Number of candidates N
    pub fn population_size(&self) -> usize {
        match self {
            Self::Pso(c) => c.num_particles,
            Self::Ga(c) => c.population_size,
            Self::De(c) => c.population_size,
            Self::Fa(c) => c.num_fireflies,
            Self::Ba(c) => c.population_size,
            Self::Gwo(c) => c.population_size,
        }
    }

    /// Dimensionality d
    pub fn dimensions(&self) -> usize {
        match self {
            Self::Pso(c) => c.dimensions,
            Self::Ga(c) => c.dimensions,
            Self::De(c) => c.dimensions,
            Self::Fa(c) => c.dimensions,
            Self::Ba(c) => c.dimensions,
            Self::Gwo(c) => c.dimensions,
        }
    }

    /// Iteration (or generation) budget
    pub fn max_iterations(&self) -> usize {
        match self {
            Self::Pso(c) => c.max_iterations,
            Self::Ga(c) => c.max_generations,
            Self::De(c) => c.max_iterations,
            Self::Fa(c) => c.max_iterations,
            Self::Ba(c) => c.max_iterations,
            Self::Gwo(c) => c.max_iterations,
        }
    }

    /// Validate the parameters of the selected algorithm
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::Pso(c) => c.validate(),
            Self::Ga(c) => c.validate(),
            Self::De(c) => c.validate(),
            Self::Fa(c) => c.validate(),
            Self::Ba(c) => c.validate(),
            Self::Gwo(c) => c.validate(),
        }
    }
}

impl Default for AlgorithmConfig {
    fn default() -> Self {
        Self::Pso(PsoConfig::default())
    }
}

impl From<PsoConfig> for AlgorithmConfig {
    fn from(config: PsoConfig) -> Self {
        Self::Pso(config)
    }
}

impl From<GaConfig> for AlgorithmConfig {
    fn from(config: GaConfig) -> Self {
        Self::Ga(config)
    }
}

impl From<DeConfig> for AlgorithmConfig {
    fn from(config: DeConfig) -> Self {
        Self::De(config)
    }
}

impl From<FaConfig> for AlgorithmConfig {
    fn from(config: FaConfig) -> Self {
        Self::Fa(config)
    }
}

impl From<BaConfig> for AlgorithmConfig {
    fn from(config: BaConfig) -> Self {
        Self::Ba(config)
    }
}

impl From<GwoConfig> for AlgorithmConfig {
    fn from(config: GwoConfig) -> Self {
        Self::Gwo(config)
    }
}

/// Complete configuration of a run
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunConfig {
    /// Algorithm and its parameters
    #[serde(flatten)]
    pub algorithm: AlgorithmConfig,
    /// Bounds shared by every coordinate
    #[serde(default)]
    pub bounds: Bounds,
    /// Seed for the random source (entropy when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl RunConfig {
    /// Create a configuration with default bounds and no seed
    pub fn new(algorithm: impl Into<AlgorithmConfig>) -> Self {
        Self {
            algorithm: algorithm.into(),
            bounds: Bounds::default(),
            seed: None,
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the bounds
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Parse a JSON document and validate it
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Validate bounds and algorithm parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds.validate()?;
        self.algorithm.validate()
    }

    /// Search space described by this configuration
    pub fn search_space(&self) -> Result<SearchSpace, ConfigError> {
        SearchSpace::new(self.bounds, self.algorithm.dimensions())
    }
}
