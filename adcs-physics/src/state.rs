//! Complete simulation snapshot.

use bevy::ecs::component::Component;

use crate::damper::KaneDamper;
use crate::dynamics::{self, Derivative};
use crate::error::{PhysicsError, Result, UNIT_TOLERANCE};
use crate::inertia::Inertia;
use crate::quantity::{AngularMomentum, AngularVelocity, Torque};
use crate::quaternion::Quaternion;

/// Rigid body plus optional Kane damper at one instant.
///
/// A plain value: integrators read one and hand back a fresh one, so a
/// trajectory is just a sequence of these with nothing shared between them.
#[derive(Clone, Copy, Debug, PartialEq, Component)]
pub struct State {
    /// Orientation BODY -> INERTIAL, unit norm.
    pub quaternion: Quaternion,

    /// Primary body angular velocity, BODY frame.
    pub angular_velocity: AngularVelocity,

    /// Primary body inertia, BODY frame.
    pub inertia: Inertia,

    pub damper: Option<KaneDamper>,

    /// Constant external torque, BODY frame.
    pub torque: Torque,

    /// Simulation time, seconds.
    pub time: f64,
}

impl State {
    /// Body at rest in the identity attitude, no damper, no torque, `t = 0`.
    pub fn new(inertia: Inertia) -> Self {
        Self {
            quaternion: Quaternion::identity(),
            angular_velocity: AngularVelocity::zero(),
            inertia,
            damper: None,
            torque: Torque::zero(),
            time: 0.0,
        }
    }

    pub fn with_angular_velocity(mut self, angular_velocity: AngularVelocity) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    /// Set the initial attitude. Anything but a unit quaternion is refused
    /// rather than silently renormalized.
    pub fn with_quaternion(mut self, quaternion: Quaternion) -> Result<Self> {
        let norm = quaternion.norm();
        if norm.is_nan() || (norm - 1.0).abs() > UNIT_TOLERANCE {
            return Err(PhysicsError::NotUnitQuaternion { norm });
        }
        self.quaternion = quaternion;
        Ok(self)
    }

    pub fn with_damper(mut self, damper: KaneDamper) -> Self {
        self.damper = Some(damper);
        self
    }

    pub fn with_torque(mut self, torque: Torque) -> Self {
        self.torque = torque;
        self
    }

    /// Time derivative of every component under the state's own torque.
    pub fn derivative(&self) -> Derivative {
        dynamics::derivative(self, &self.torque)
    }

    /// `self + dt·rate` component-wise, with time advanced by `dt`.
    ///
    /// The orientation is NOT renormalized; see [`State::renormalize`].
    pub fn advance(&self, rate: &Derivative, dt: f64) -> Self {
        let mut next = *self;
        next.quaternion = self.quaternion + rate.quaternion.scale(dt);
        next.angular_velocity = self
            .angular_velocity
            .advance(&rate.angular_acceleration, dt);
        if let (Some(damper), Some(alpha)) = (next.damper.as_mut(), rate.damper_acceleration) {
            damper.angular_velocity = damper.angular_velocity.advance(&alpha, dt);
        }
        next.time = self.time + dt;
        next
    }

    /// Project the orientation back onto the unit sphere.
    pub fn renormalize(mut self) -> Result<Self> {
        self.quaternion = self.quaternion.normalize()?;
        Ok(self)
    }

    /// Total angular momentum (body + damper), BODY frame.
    pub fn angular_momentum(&self) -> AngularMomentum {
        let body = self.inertia.angular_momentum(&self.angular_velocity);
        match &self.damper {
            Some(damper) => body + damper.angular_momentum(),
            None => body,
        }
    }

    /// Total angular momentum in the INERTIAL frame.
    pub fn inertial_angular_momentum(&self) -> Result<AngularMomentum> {
        self.angular_momentum().rotate(&self.quaternion)
    }

    /// Total rotational kinetic energy (body + damper).
    pub fn kinetic_energy(&self) -> f64 {
        let body = self.inertia.kinetic_energy(&self.angular_velocity);
        body + self.damper.as_ref().map_or(0.0, KaneDamper::kinetic_energy)
    }

    /// Where a body-fixed direction points in the inertial frame.
    pub fn body_to_inertial(&self, v: &na::Vector3<f64>) -> Result<na::Vector3<f64>> {
        self.quaternion.rotate_vector(v)
    }
}
