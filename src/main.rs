//! mcl2d headless simulation driver
//!
//! Runs the agent simulation and the localization filter without a
//! renderer: a scripted wall-avoiding policy stands in for keyboard input,
//! the fixed step counter stands in for the frame timer, and estimation
//! error is reported through the log instead of a canvas.
//!
//! # Usage
//!
//! ```bash
//! # With default config
//! cargo run --release
//!
//! # With custom config file
//! cargo run --release -- --config mcl2d.toml
//!
//! # With command line overrides
//! cargo run --release -- --steps 5000 --seed 42
//! ```

use mcl2d::{
    AgentConfig, InputState, LineSegment, ParticleFilterConfig, RangeSensorConfig, Simulation,
    SimulationConfig, World,
};
use serde::Deserialize;
use std::fs;

/// Configuration file structure
#[derive(Debug, Deserialize, Default)]
struct Config {
    #[serde(default)]
    world: WorldConfig,
    #[serde(default)]
    sensor: SensorConfig,
    #[serde(default)]
    filter: FilterConfig,
    #[serde(default)]
    agent: MotionConfig,
    #[serde(default)]
    run: RunConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct WorldConfig {
    width: u32,
    height: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct SensorConfig {
    resolution: usize,
    max_distance: f32,
    noise_level: f32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        let defaults = RangeSensorConfig::default();
        Self {
            resolution: defaults.resolution,
            max_distance: defaults.max_distance,
            noise_level: defaults.noise_level,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct FilterConfig {
    num_samples: usize,
    weight_sigma: f32,
    seed: u64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        let defaults = ParticleFilterConfig::default();
        Self {
            num_samples: defaults.num_samples,
            weight_sigma: defaults.weight_sigma,
            seed: defaults.seed,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct MotionConfig {
    drive_speed: f32,
    turn_rate: f32,
    motion_noise: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        let defaults = AgentConfig::default();
        Self {
            drive_speed: defaults.drive_speed,
            turn_rate: defaults.turn_rate,
            motion_noise: defaults.motion_noise,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct RunConfig {
    /// Total simulation steps to run.
    steps: u64,
    /// Algorithmic tick every N steps.
    tick_every: u64,
    /// Seed for the simulation RNG (0 = from entropy).
    seed: u64,
    /// Forward clearance, in pixels, below which the policy turns.
    avoid_distance: f32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            steps: 2000,
            tick_every: 20,
            seed: 0,
            avoid_distance: 60.0,
        }
    }
}

/// Command line arguments
struct Args {
    config_path: Option<String>,
    steps: Option<u64>,
    seed: Option<u64>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut result = Args {
        config_path: None,
        steps: None,
        seed: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    result.config_path = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--steps" | "-n" => {
                if i + 1 < args.len() {
                    result.steps = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--seed" | "-s" => {
                if i + 1 < args.len() {
                    result.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    result
}

fn print_help() {
    println!("mcl2d - Monte Carlo localization simulator");
    println!();
    println!("USAGE:");
    println!("    mcl2d [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <FILE>     Configuration file (mcl2d.toml)");
    println!("    -n, --steps <N>         Simulation steps to run (2000)");
    println!("    -s, --seed <SEED>       RNG seed, 0 for entropy (0)");
    println!("    -h, --help              Print help information");
}

fn load_config(args: &Args) -> Config {
    let mut config = match &args.config_path {
        Some(path) => match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(cfg) => {
                    log::info!("loaded config from {}", path);
                    cfg
                }
                Err(e) => {
                    log::error!("failed to parse config {}: {}", path, e);
                    Config::default()
                }
            },
            Err(e) => {
                log::error!("failed to read config {}: {}", path, e);
                Config::default()
            }
        },
        None => Config::default(),
    };

    if let Some(steps) = args.steps {
        config.run.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.run.seed = seed;
        config.filter.seed = seed;
    }

    config
}

/// The demo floor plan: bordered area with a few interior walls, enough
/// asymmetry that different rooms produce different scans.
fn demo_world(width: u32, height: u32) -> World {
    let w = width as f32;
    let h = height as f32;
    let mut world = World::bordered(width, height);
    world.add_segment(LineSegment::new(w * 0.35, 0.0, w * 0.35, h * 0.55));
    world.add_segment(LineSegment::new(w * 0.65, h - 1.0, w * 0.65, h * 0.4));
    world.add_segment(LineSegment::new(0.0, h * 0.75, w * 0.2, h * 0.75));
    world
}

/// Drive forward until the forward ray reports a nearby wall, then hold a
/// clockwise turn until it clears.
fn policy(sim: &Simulation, avoid_distance: f32) -> InputState {
    let blocked = sim
        .last_scan()
        .map(|scan| !scan.is_empty() && scan.distances[0] < avoid_distance)
        .unwrap_or(false);

    InputState {
        forward: true,
        turn_right: blocked,
        ..Default::default()
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args();
    let config = load_config(&args);

    let sensor = RangeSensorConfig {
        resolution: config.sensor.resolution,
        max_distance: config.sensor.max_distance,
        noise_level: config.sensor.noise_level,
    };
    let filter = ParticleFilterConfig {
        num_samples: config.filter.num_samples,
        weight_sigma: config.filter.weight_sigma,
        seed: config.filter.seed,
    };
    if let Err(e) = filter.validate(&sensor) {
        log::error!("invalid configuration: {}", e);
        std::process::exit(1);
    }

    let world = demo_world(config.world.width, config.world.height);
    let sim_config = SimulationConfig {
        sensor,
        filter,
        agent: AgentConfig {
            drive_speed: config.agent.drive_speed,
            turn_rate: config.agent.turn_rate,
            motion_noise: config.agent.motion_noise,
        },
        seed: config.run.seed,
    };
    let mut sim = Simulation::new(world, sim_config);

    log::info!(
        "world {}x{}, {} particles, {} rays, tick every {} steps",
        config.world.width,
        config.world.height,
        config.filter.num_samples,
        config.sensor.resolution,
        config.run.tick_every
    );

    let mut error_sum = 0.0f32;
    let mut ticks = 0u64;

    for step in 1..=config.run.steps {
        let input = policy(&sim, config.run.avoid_distance);
        sim.step(&input);

        if step % config.run.tick_every == 0 {
            sim.tick();
            ticks += 1;

            let truth = sim.agent().pose();
            let estimate = sim.estimate();
            let error = truth.position().distance(&estimate.position());
            error_sum += error;

            let state = sim.filter().state();
            log::info!(
                "tick {:4}  truth ({:6.1},{:6.1})  estimate ({:6.1},{:6.1})  error {:6.1}px  neff {:5.1}",
                ticks,
                truth.x,
                truth.y,
                estimate.x,
                estimate.y,
                error,
                state.neff
            );
        }
    }

    if ticks > 0 {
        log::info!(
            "finished: {} steps, {} ticks, mean position error {:.1}px",
            config.run.steps,
            ticks,
            error_sum / ticks as f32
        );
    }
}
