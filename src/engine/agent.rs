//! True-state agent.

use rand::Rng;

use crate::algorithms::mapping::World;
use crate::core::types::{Odometry, Pose};

use super::input::InputState;

/// Motion parameters for the simulated agent.
#[derive(Debug, Clone, Copy)]
pub struct AgentConfig {
    /// Drive distance per simulation step, in pixels.
    pub drive_speed: f32,
    /// Turn per simulation step, in radians.
    pub turn_rate: f32,
    /// Relative spread of the odometry recording noise.
    pub motion_noise: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            drive_speed: 2.0,
            turn_rate: 0.06,
            motion_noise: 0.05,
        }
    }
}

/// The single source of ground truth.
///
/// The agent's pose is the only pose mutated in place: each simulation step
/// applies the held controls directly, then records the displacement that
/// actually happened into the odometry accumulator (with recording noise).
/// The filter never reads this pose; it only ever sees the accumulated
/// odometry and the sensor readings taken here.
#[derive(Debug, Clone)]
pub struct Agent {
    config: AgentConfig,
    pose: Pose,
    odometry: Odometry,
}

impl Agent {
    /// Place an agent at a known pose.
    pub fn new(config: AgentConfig, pose: Pose) -> Self {
        Self {
            config,
            pose,
            odometry: Odometry::zero(),
        }
    }

    /// Place an agent at a random pose within the world.
    pub fn spawn<R: Rng>(config: AgentConfig, world: &World, rng: &mut R) -> Self {
        Self::new(config, Pose::random_in(world.width(), world.height(), rng))
    }

    /// The true pose.
    #[inline]
    pub fn pose(&self) -> &Pose {
        &self.pose
    }

    /// The odometry accumulated since the last tick.
    #[inline]
    pub fn odometry(&self) -> &Odometry {
        &self.odometry
    }

    /// Zero the odometry accumulator. Call exactly once per algorithmic
    /// tick, after the filter has consumed the delta.
    pub fn reset_odometer(&mut self) {
        self.odometry.reset();
    }

    /// Advance the true pose by one simulation step.
    ///
    /// Applies the held controls, clamps the position to the world bounds,
    /// and records the post-clamp displacement (what actually happened,
    /// not what was commanded) into the odometer.
    pub fn step<R: Rng>(&mut self, input: &InputState, world: &World, rng: &mut R) {
        let drive = input.drive_direction() * self.config.drive_speed;
        let turn = input.turn_direction() * self.config.turn_rate;

        let previous = self.pose;
        let (sin_h, cos_h) = self.pose.heading.sin_cos();

        self.pose.x = (previous.x + cos_h * drive).clamp(0.0, (world.width() - 1) as f32);
        self.pose.y = (previous.y + sin_h * drive).clamp(0.0, (world.height() - 1) as f32);
        self.pose.heading += turn;

        self.odometry.record(
            self.pose.x - previous.x,
            self.pose.y - previous.y,
            self.pose.heading - previous.heading,
            self.config.motion_noise,
            rng,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn noise_free_config() -> AgentConfig {
        AgentConfig {
            drive_speed: 2.0,
            turn_rate: 0.1,
            motion_noise: 0.0,
        }
    }

    #[test]
    fn test_step_forward_moves_along_heading() {
        let world = World::new(100, 100);
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(noise_free_config(), Pose::new(50.0, 50.0, 0.0));

        let input = InputState {
            forward: true,
            ..Default::default()
        };
        agent.step(&input, &world, &mut rng);

        assert_relative_eq!(agent.pose().x, 52.0);
        assert_relative_eq!(agent.pose().y, 50.0, epsilon = 1e-5);
        assert_relative_eq!(agent.odometry().dx, 2.0);
    }

    #[test]
    fn test_step_turn_accumulates_heading() {
        let world = World::new(100, 100);
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(noise_free_config(), Pose::new(50.0, 50.0, 0.0));

        let input = InputState {
            turn_right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            agent.step(&input, &world, &mut rng);
        }

        // 100 turns of 0.1 rad; never wrapped or normalized.
        assert_relative_eq!(agent.pose().heading, 10.0, epsilon = 1e-4);
        assert_relative_eq!(agent.odometry().dheading, 10.0, epsilon = 1e-4);
    }

    #[test]
    fn test_step_clamps_to_world_and_records_actual() {
        let world = World::new(100, 100);
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(noise_free_config(), Pose::new(98.5, 50.0, 0.0));

        let input = InputState {
            forward: true,
            ..Default::default()
        };
        agent.step(&input, &world, &mut rng);

        assert_relative_eq!(agent.pose().x, 99.0);
        // Commanded 2 pixels, wall allowed half a pixel; the odometer sees
        // the actual displacement.
        assert_relative_eq!(agent.odometry().dx, 0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_reset_odometer() {
        let world = World::new(100, 100);
        let mut rng = StdRng::seed_from_u64(1);
        let mut agent = Agent::new(noise_free_config(), Pose::new(50.0, 50.0, 0.0));

        let input = InputState {
            forward: true,
            turn_right: true,
            ..Default::default()
        };
        agent.step(&input, &world, &mut rng);
        agent.reset_odometer();
        assert_eq!(*agent.odometry(), Odometry::zero());
    }
}
