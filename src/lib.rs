//! Attitude simulation of a spacecraft carrying a Kane damper.
//!
//! The physics lives in [`physics`]; this crate adds scenario files,
//! recorded trajectories, a fixed-step driver and a bevy plugin.
//!
//! Notably, all vectors are in the body frame unless a name says otherwise.

// Recommended alias.
extern crate nalgebra as na;

pub use adcs_physics as physics;

pub mod plugin;
pub mod scenario;
pub mod simulation;
pub mod trajectory;

pub use plugin::{ActiveIntegrator, AttitudePlugin, Degenerate};
pub use scenario::{DamperConfig, InertiaConfig, IntegratorKind, ScenarioConfig};
pub use simulation::Simulation;
pub use trajectory::{Sample, Trajectory};
