//! Equations of motion for the primary body and its Kane damper.
//!
//! With `τ_c` the viscous torque the damper exerts on the body (see
//! [`KaneDamper::coupling_torque`]), and everything in BODY coordinates:
//!
//! ```text
//! q̇   = ½ q ⊗ [0, ω]
//! I ω̇ = τ_ext + τ_c − ω × (I ω)
//! I_d ω̇_d = −τ_c − ω × (I_d ω_d)
//! ```
//!
//! Summing the last two gives `Ḣ = τ_ext − ω × H` for the total momentum H,
//! i.e. the inertial-frame momentum only changes through external torque.
//! Without a damper the system reduces to Euler's rigid-body equations.

use std::ops::{Add, Mul};

use crate::damper::KaneDamper;
use crate::quantity::{AngularAcceleration, Torque};
use crate::quaternion::Quaternion;
use crate::state::State;

/// Time derivative of a [`State`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Derivative {
    /// `q̇`
    pub quaternion: Quaternion,
    /// `ω̇` of the primary body.
    pub angular_acceleration: AngularAcceleration,
    /// `ω̇_d`, present exactly when the state carries a damper.
    pub damper_acceleration: Option<AngularAcceleration>,
}

/// Evaluate the equations of motion at `state` under the body-frame
/// external torque `torque`.
pub fn derivative(state: &State, torque: &Torque) -> Derivative {
    let omega = &state.angular_velocity;

    let (coupling, damper_acceleration) = match &state.damper {
        Some(damper) => {
            let coupling = damper.coupling_torque(omega);
            (coupling, Some(damper.angular_acceleration(omega, &coupling)))
        }
        None => (Torque::zero(), None),
    };

    let momentum = state.inertia.apply(omega.as_vector());
    let gyroscopic = omega.as_vector().cross(&momentum);
    let net = torque.as_vector() + coupling.as_vector() - gyroscopic;

    Derivative {
        quaternion: state.quaternion.derivative(omega),
        angular_acceleration: state.inertia.solve(&net).into(),
        damper_acceleration,
    }
}

/// Rate at which the damper turns kinetic energy into heat, `τ_c·(ω_d − ω)`.
/// Never negative.
pub fn dissipation_rate(state: &State) -> f64 {
    state.damper.as_ref().map_or(0.0, |damper: &KaneDamper| {
        let relative = damper.angular_velocity - state.angular_velocity;
        damper
            .coupling_torque(&state.angular_velocity)
            .as_vector()
            .dot(relative.as_vector())
    })
}

impl Add for Derivative {
    type Output = Derivative;

    fn add(self, other: Self) -> Self::Output {
        let damper_acceleration = match (self.damper_acceleration, other.damper_acceleration) {
            (Some(a), Some(b)) => Some(a + b),
            (a, b) => a.or(b),
        };
        Derivative {
            quaternion: self.quaternion + other.quaternion,
            angular_acceleration: self.angular_acceleration + other.angular_acceleration,
            damper_acceleration,
        }
    }
}

impl Mul<f64> for Derivative {
    type Output = Derivative;

    fn mul(self, s: f64) -> Self::Output {
        Derivative {
            quaternion: self.quaternion.scale(s),
            angular_acceleration: self.angular_acceleration.scale(s),
            damper_acceleration: self.damper_acceleration.map(|a| a.scale(s)),
        }
    }
}
