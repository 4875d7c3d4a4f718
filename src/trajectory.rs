//! Recorded trajectories and their conservation diagnostics.

use adcs_physics::State;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Body −x axis.
fn nose() -> na::Vector3<f64> {
    -na::Vector3::x()
}

/// Body +y axis.
fn wingtip() -> na::Vector3<f64> {
    na::Vector3::y()
}

/// What a driver needs from one [`State`] to plot or check a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: f64,
    /// `[w, x, y, z]`, body -> inertial.
    pub quaternion: [f64; 4],
    /// Body frame.
    pub angular_velocity: na::Vector3<f64>,
    /// Body frame.
    pub damper_angular_velocity: Option<na::Vector3<f64>>,
    /// Body plus damper.
    pub kinetic_energy: f64,
    /// Total angular momentum, inertial frame.
    pub angular_momentum: na::Vector3<f64>,
    /// Inertial direction of the body's nose.
    pub nose: na::Vector3<f64>,
    /// Inertial direction of the body's right wingtip.
    pub wingtip: na::Vector3<f64>,
}

impl Sample {
    pub fn from_state(state: &State) -> Result<Self> {
        let context = || format!("cannot sample state at t = {}", state.time);
        Ok(Sample {
            time: state.time,
            quaternion: state.quaternion.to_array(),
            angular_velocity: *state.angular_velocity.as_vector(),
            damper_angular_velocity: state.damper.map(|d| *d.angular_velocity.as_vector()),
            kinetic_energy: state.kinetic_energy(),
            angular_momentum: state
                .inertial_angular_momentum()
                .with_context(context)?
                .into(),
            nose: state.body_to_inertial(&nose()).with_context(context)?,
            wingtip: state.body_to_inertial(&wingtip()).with_context(context)?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    pub samples: Vec<Sample>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: &State) -> Result<()> {
        self.samples.push(Sample::from_state(state)?);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    /// Largest departure of the inertial angular momentum from its first
    /// value, relative to the first magnitude (absolute if that is zero).
    pub fn momentum_drift(&self) -> f64 {
        let Some(first) = self.samples.first() else {
            return 0.0;
        };
        let h0 = first.angular_momentum;
        let scale = if h0.norm() > 0.0 { h0.norm() } else { 1.0 };
        self.samples
            .iter()
            .map(|s| (s.angular_momentum - h0).norm() / scale)
            .fold(0.0, f64::max)
    }

    /// True when no sample gains more than `tolerance` of kinetic energy over
    /// its predecessor.
    pub fn energy_is_non_increasing(&self, tolerance: f64) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[1].kinetic_energy <= pair[0].kinetic_energy + tolerance)
    }

    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        serde_cbor::to_vec(self).context("failed to encode trajectory as CBOR")
    }

    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        serde_cbor::from_slice(bytes).context("failed to decode CBOR trajectory")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("failed to encode trajectory as JSON")
    }
}
