//! Scenario configuration.
//!
//! Everything a driver needs to set up a run, in a form that round-trips
//! through JSON.

use adcs_physics::{
    AngularVelocity, ForwardEuler, Inertia, Integrator, KaneDamper, Quaternion, RungeKutta4, State,
    Torque,
};
use anyhow::{Context, Result};
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    ForwardEuler,
    RungeKutta4,
}

/// An inertia given either as one moment (isotropic) or as
/// `[Ixx, Iyy, Izz, Ixy, Ixz, Iyz]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InertiaConfig {
    Moment(f64),
    Tensor([f64; 6]),
}

impl InertiaConfig {
    pub fn build(&self) -> adcs_physics::Result<Inertia> {
        match *self {
            InertiaConfig::Moment(moment) => Inertia::isotropic(moment),
            InertiaConfig::Tensor([ixx, iyy, izz, ixy, ixz, iyz]) => {
                Inertia::new(ixx, iyy, izz, ixy, ixz, iyz)
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DamperConfig {
    /// Must be isotropic.
    pub inertia: InertiaConfig,
    pub coefficient: f64,
    /// Couple only the spin about this body axis. Full coupling when absent.
    #[serde(default)]
    pub axis: Option<na::Vector3<f64>>,
    /// Initial damper angular velocity, body frame, rad/s.
    #[serde(default = "zero_vector")]
    pub angular_velocity: na::Vector3<f64>,
}

/// A complete run description.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Primary body inertia, kg·m².
    pub inertia: InertiaConfig,
    /// Initial body angular velocity, body frame, rad/s.
    #[serde(default = "zero_vector")]
    pub angular_velocity: na::Vector3<f64>,
    /// Initial orientation as `[w, x, y, z]`.
    #[serde(default = "identity")]
    pub orientation: [f64; 4],
    #[serde(default)]
    pub damper: Option<DamperConfig>,
    /// Constant external torque, body frame, N·m.
    #[serde(default = "zero_vector")]
    pub torque: na::Vector3<f64>,
    pub integrator: IntegratorKind,
    /// Seconds per step.
    pub time_step: f64,
    pub steps: usize,
}

fn zero_vector() -> na::Vector3<f64> {
    na::Vector3::zeros()
}

fn identity() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

impl ScenarioConfig {
    /// A prolate-ish body spun mostly about its minor axis with a small
    /// spherical damper: 100 s of forward Euler at 10 ms.
    pub fn reference() -> Self {
        ScenarioConfig {
            inertia: InertiaConfig::Tensor([1.00, 1.05, 2.0, 0.0, 0.0, 0.0]),
            angular_velocity: na::Vector3::new(2.0, 0.3, 0.3),
            orientation: identity(),
            damper: Some(DamperConfig {
                inertia: InertiaConfig::Tensor([0.1, 0.1, 0.1, 0.0, 0.0, 0.0]),
                coefficient: 0.1,
                axis: None,
                angular_velocity: zero_vector(),
            }),
            torque: zero_vector(),
            integrator: IntegratorKind::ForwardEuler,
            time_step: 0.01,
            steps: 10_000,
        }
    }

    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("failed to parse scenario")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to encode scenario")
    }

    /// Simulated duration, seconds.
    pub fn duration(&self) -> f64 {
        self.steps as f64 * self.time_step
    }

    pub fn initial_state(&self) -> Result<State> {
        let inertia = self.inertia.build().context("invalid body inertia")?;
        let [w, x, y, z] = self.orientation;

        let mut state = State::new(inertia)
            .with_angular_velocity(AngularVelocity::from(self.angular_velocity))
            .with_quaternion(Quaternion::new(w, x, y, z))
            .context("invalid initial orientation")?
            .with_torque(Torque::from(self.torque));

        if let Some(config) = &self.damper {
            let inertia = config.inertia.build().context("invalid damper inertia")?;
            let mut damper = KaneDamper::new(inertia, config.coefficient)
                .context("invalid damper")?
                .with_angular_velocity(AngularVelocity::from(config.angular_velocity));
            if let Some(axis) = config.axis {
                damper = damper.with_axis(axis).context("invalid damping axis")?;
            }
            state = state.with_damper(damper);
        }

        Ok(state)
    }

    pub fn integrator(&self) -> Result<Box<dyn Integrator>> {
        let integrator: Box<dyn Integrator> = match self.integrator {
            IntegratorKind::ForwardEuler => Box::new(ForwardEuler::new(self.time_step)?),
            IntegratorKind::RungeKutta4 => Box::new(RungeKutta4::new(self.time_step)?),
        };
        Ok(integrator)
    }
}
