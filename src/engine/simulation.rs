//! Two-cadence simulation orchestration.

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::algorithms::localization::{ParticleFilter, ParticleFilterConfig};
use crate::algorithms::mapping::{OccupancyMap, World};
use crate::algorithms::sensing::{RangeSensor, RangeSensorConfig};
use crate::core::types::{Pose, RangeScan};

use super::agent::{Agent, AgentConfig};
use super::input::InputState;

/// Top-level simulation configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulationConfig {
    /// Range sensor geometry and noise, shared by the agent's scans and the
    /// filter's expected-scan queries.
    pub sensor: RangeSensorConfig,
    /// Particle filter parameters.
    pub filter: ParticleFilterConfig,
    /// Agent motion parameters.
    pub agent: AgentConfig,
    /// Seed for agent spawning and sensor noise (0 = from entropy). The
    /// filter draws from its own seeded stream.
    pub seed: u64,
}

/// Owns the world, its rasterized map, the true agent, and the filter.
///
/// Two cadences drive it: [`step`](Self::step) runs every simulation frame
/// (agent motion plus a fresh scan for display), and [`tick`](Self::tick)
/// runs only when the caller triggers an algorithmic tick (filter cycle
/// plus odometer reset). All work is synchronous and single-threaded; a
/// slow tick delays the next step rather than overlapping it.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    map: OccupancyMap,
    sensor: RangeSensor,
    agent: Agent,
    filter: ParticleFilter,
    rng: StdRng,
    last_scan: Option<RangeScan>,
}

impl Simulation {
    /// Rasterize `world` and set up the agent and filter inside it.
    pub fn new(world: World, config: SimulationConfig) -> Self {
        let map = OccupancyMap::from_world(&world);
        let mut rng = if config.seed == 0 {
            StdRng::from_entropy()
        } else {
            StdRng::seed_from_u64(config.seed)
        };

        let agent = Agent::spawn(config.agent, &world, &mut rng);
        let filter = ParticleFilter::new(config.filter, config.sensor, &map);

        Self {
            world,
            map,
            sensor: RangeSensor::new(config.sensor),
            agent,
            filter,
            rng,
            last_scan: None,
        }
    }

    /// One simulation frame: move the agent under the held controls and
    /// refresh the displayed scan.
    pub fn step(&mut self, input: &InputState) {
        self.agent.step(input, &self.world, &mut self.rng);
        let scan = self.sensor.scan(&self.map, self.agent.pose(), &mut self.rng);
        self.last_scan = Some(scan);
    }

    /// One algorithmic tick: scan at the true pose, cycle the filter with
    /// the accumulated odometry, then reset the odometer (the only reset).
    pub fn tick(&mut self) {
        let observation = self.sensor.scan(&self.map, self.agent.pose(), &mut self.rng);
        self.filter
            .tick(self.agent.odometry(), &observation, &self.map);
        self.agent.reset_odometer();
        self.last_scan = Some(observation);
    }

    /// The static world geometry, for rendering.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The rasterized map.
    pub fn map(&self) -> &OccupancyMap {
        &self.map
    }

    /// The true agent.
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// The localization filter.
    pub fn filter(&self) -> &ParticleFilter {
        &self.filter
    }

    /// Weighted mean of the belief.
    pub fn estimate(&self) -> Pose {
        self.filter.estimate()
    }

    /// The most recent scan, for rendering.
    pub fn last_scan(&self) -> Option<&RangeScan> {
        self.last_scan.as_ref()
    }
}
