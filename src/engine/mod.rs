//! Simulation engine layer.
//!
//! Orchestrates the true-state simulation on top of the algorithms layer:
//! the agent moves under user control at the simulation cadence, and the
//! particle filter runs at the (less frequent) algorithmic-tick cadence.
//!
//! # Components
//!
//! - [`InputState`]: Per-frame snapshot of the held movement controls
//! - [`Agent`]: The single true pose plus its odometry accumulator
//! - [`Simulation`]: Owns world, map, agent, and filter; exposes `step`
//!   and `tick`

mod agent;
mod input;
mod simulation;

pub use agent::{Agent, AgentConfig};
pub use input::InputState;
pub use simulation::{Simulation, SimulationConfig};
