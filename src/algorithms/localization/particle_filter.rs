//! Particle filter (Monte Carlo localization).
//!
//! The belief is a fixed-size set of weighted pose hypotheses, initialized
//! uniformly over the map and replaced wholesale on every tick:
//!
//! 1. every particle is advanced by the agent's accumulated odometry, the
//!    identical delta for all, since the noise already entered at recording,
//! 2. every particle is weighted by how well the noise-free scan from its
//!    hypothesized pose matches the agent's observed scan,
//! 3. weights are normalized (degenerate vectors fall back to uniform),
//! 4. the next belief is drawn by weighted roulette-wheel sampling.
//!
//! Weighting runs in log space with a log-sum-exp shift so that a long ray
//! fan cannot underflow the per-ray Gaussian likelihood product.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use super::motion_model;
use super::sampling::{normalize, WeightedSampler};
use crate::algorithms::mapping::OccupancyMap;
use crate::algorithms::sensing::{RangeSensor, RangeSensorConfig};
use crate::core::math::log_gaussian;
use crate::core::types::{Odometry, Pose, RangeScan};

/// A single particle: one hypothesized agent pose.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// Hypothesized pose.
    pub pose: Pose,
    /// Importance weight. Transient: recomputed every tick, meaningless
    /// between ticks.
    pub weight: f32,
}

impl Particle {
    /// Create a particle with unit weight.
    pub fn new(pose: Pose) -> Self {
        Self { pose, weight: 1.0 }
    }

    /// Create a particle with the given weight.
    pub fn with_weight(pose: Pose, weight: f32) -> Self {
        Self { pose, weight }
    }
}

/// Invalid filter or sensor configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The belief would be empty.
    #[error("belief must hold at least one sample")]
    NoSamples,

    /// The sensor would cast no rays.
    #[error("sensor resolution must be at least one ray")]
    NoRays,

    /// The sensor range limit is not positive.
    #[error("sensor max distance must be positive, got {0}")]
    NonPositiveRange(f32),

    /// The weighting Gaussian is degenerate.
    #[error("weight sigma must be positive, got {0}")]
    NonPositiveSigma(f32),
}

/// Configuration for the particle filter.
#[derive(Debug, Clone, Copy)]
pub struct ParticleFilterConfig {
    /// Number of particles in the belief.
    pub num_samples: usize,

    /// Standard deviation, in pixels, of the per-ray Gaussian used to turn
    /// scan disagreement into a likelihood.
    pub weight_sigma: f32,

    /// Random seed (0 = seed from entropy).
    pub seed: u64,
}

impl Default for ParticleFilterConfig {
    fn default() -> Self {
        Self {
            num_samples: 100,
            weight_sigma: 40.0,
            seed: 0,
        }
    }
}

impl ParticleFilterConfig {
    /// Check this configuration together with the sensor geometry it will
    /// evaluate expected scans with.
    pub fn validate(&self, sensor: &RangeSensorConfig) -> Result<(), ConfigError> {
        if self.num_samples == 0 {
            return Err(ConfigError::NoSamples);
        }
        if sensor.resolution == 0 {
            return Err(ConfigError::NoRays);
        }
        if sensor.max_distance <= 0.0 {
            return Err(ConfigError::NonPositiveRange(sensor.max_distance));
        }
        if self.weight_sigma <= 0.0 {
            return Err(ConfigError::NonPositiveSigma(self.weight_sigma));
        }
        Ok(())
    }
}

/// Filter diagnostics, recomputed per tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterState {
    /// Effective number of particles (1 / Σ w²) before resampling.
    pub neff: f32,
    /// Largest normalized weight before resampling.
    pub max_weight: f32,
    /// Ticks processed since construction.
    pub iterations: u64,
}

/// Monte Carlo localization filter.
#[derive(Debug)]
pub struct ParticleFilter {
    config: ParticleFilterConfig,
    /// Noise-free sensor sharing the observation's geometry, used to compute
    /// the reading each hypothesis predicts.
    sensor: RangeSensor,
    particles: Vec<Particle>,
    rng: StdRng,
    state: FilterState,
}

impl ParticleFilter {
    /// Create a filter with its belief drawn uniformly over the map bounds,
    /// headings uniform in [0, 2π).
    ///
    /// `sensor` must describe the same ray geometry the observations fed to
    /// [`tick`](Self::tick) were taken with.
    pub fn new(
        config: ParticleFilterConfig,
        sensor: RangeSensorConfig,
        map: &OccupancyMap,
    ) -> Self {
        if config.num_samples == 0 {
            log::warn!("particle filter configured with zero samples; belief will stay empty");
        }

        let mut rng = if config.seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(config.seed)
        };

        let particles = (0..config.num_samples)
            .map(|_| Particle::new(Pose::random_in(map.width(), map.height(), &mut rng)))
            .collect();

        Self {
            config,
            sensor: RangeSensor::new(sensor.noise_free()),
            particles,
            rng,
            state: FilterState::default(),
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ParticleFilterConfig {
        &self.config
    }

    /// Current belief (for rendering).
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Diagnostics from the most recent tick.
    pub fn state(&self) -> &FilterState {
        &self.state
    }

    /// Number of particles in the belief.
    pub fn num_samples(&self) -> usize {
        self.particles.len()
    }

    /// Run one full prediction / weighting / resampling cycle.
    ///
    /// `odometry` is the delta accumulated since the previous tick (the
    /// caller resets the accumulator afterwards); `observation` is the
    /// agent's noisy scan taken at this tick.
    pub fn tick(&mut self, odometry: &Odometry, observation: &RangeScan, map: &OccupancyMap) {
        self.state.iterations += 1;

        if self.particles.is_empty() {
            log::warn!("tick on an empty belief; nothing to estimate");
            return;
        }
        if observation.len() != self.sensor.config().resolution {
            log::warn!(
                "observation has {} rays but the filter expects {}; weighting degrades",
                observation.len(),
                self.sensor.config().resolution
            );
        }

        // 1. Prediction: identical delta for every hypothesis.
        for particle in &mut self.particles {
            particle.pose = motion_model::predict(&particle.pose, odometry);
        }

        // 2. Weighting: per-ray Gaussian likelihood in log space.
        let mut log_weights = Vec::with_capacity(self.particles.len());
        for particle in &self.particles {
            let expected = self.sensor.scan_exact(map, &particle.pose);
            let log_weight: f32 = expected
                .distances
                .iter()
                .zip(&observation.distances)
                .map(|(e, o)| log_gaussian(e - o, self.config.weight_sigma))
                .sum();
            log_weights.push(log_weight);
        }

        let max_log = log_weights.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let linear: Vec<f32> = if max_log.is_finite() {
            log_weights.iter().map(|&lw| (lw - max_log).exp()).collect()
        } else {
            log::warn!("all particles scored zero likelihood; weighting uniformly");
            vec![1.0; self.particles.len()]
        };

        // 3. Normalization (uniform fallback on degenerate vectors).
        let weights = normalize(&linear);
        for (particle, &w) in self.particles.iter_mut().zip(&weights) {
            particle.weight = w;
        }

        let sum_sq: f32 = weights.iter().map(|w| w * w).sum();
        self.state.neff = if sum_sq > 1e-12 { 1.0 / sum_sq } else { 0.0 };
        self.state.max_weight = weights.iter().copied().fold(0.0, f32::max);

        // 4/5. Resampling: the belief is replaced wholesale, weights reset.
        let sampler = WeightedSampler::new(&weights);
        let uniform = 1.0 / self.particles.len() as f32;
        let mut next = Vec::with_capacity(self.particles.len());
        for _ in 0..self.particles.len() {
            let idx = sampler.sample(&mut self.rng);
            next.push(Particle::with_weight(self.particles[idx].pose, uniform));
        }
        self.particles = next;
    }

    /// Weighted mean pose of the belief.
    ///
    /// Positions average linearly; headings average on the unit circle so
    /// hypotheses pointing both ways across an angle wrap do not cancel.
    pub fn estimate(&self) -> Pose {
        let mut sum_x = 0.0;
        let mut sum_y = 0.0;
        let mut sum_sin = 0.0;
        let mut sum_cos = 0.0;
        let mut total = 0.0;

        for p in &self.particles {
            sum_x += p.weight * p.pose.x;
            sum_y += p.weight * p.pose.y;
            sum_sin += p.weight * p.pose.heading.sin();
            sum_cos += p.weight * p.pose.heading.cos();
            total += p.weight;
        }

        if total > 1e-12 {
            Pose::new(sum_x / total, sum_y / total, sum_sin.atan2(sum_cos))
        } else {
            let n = self.particles.len().max(1) as f32;
            let mean_x = self.particles.iter().map(|p| p.pose.x).sum::<f32>() / n;
            let mean_y = self.particles.iter().map(|p| p.pose.y).sum::<f32>() / n;
            let mean_sin = self.particles.iter().map(|p| p.pose.heading.sin()).sum::<f32>() / n;
            let mean_cos = self.particles.iter().map(|p| p.pose.heading.cos()).sum::<f32>() / n;
            Pose::new(mean_x, mean_y, mean_sin.atan2(mean_cos))
        }
    }
}
