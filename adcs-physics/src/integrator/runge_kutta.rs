//! Classical fourth-order Runge-Kutta.

use super::{Integrator, validate_time_step};
use crate::error::Result;
use crate::state::State;

/// Classical RK4 with weights (1, 2, 2, 1)/6.
///
/// The orientation is renormalized once per full step. Stage states keep the
/// raw `q + c·h·k` quaternion: the kinematic rate is linear in `q`, so the
/// stage slopes are still consistent, and projecting them would cost the
/// scheme its fourth order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RungeKutta4 {
    h: f64,
}

impl RungeKutta4 {
    pub fn new(h: f64) -> Result<Self> {
        Ok(Self {
            h: validate_time_step(h)?,
        })
    }
}

impl Integrator for RungeKutta4 {
    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn time_step(&self) -> f64 {
        self.h
    }

    fn step(&self, state: &State) -> Result<State> {
        let h = self.h;

        let k1 = state.derivative();
        let k2 = state.advance(&k1, 0.5 * h).derivative();
        let k3 = state.advance(&k2, 0.5 * h).derivative();
        let k4 = state.advance(&k3, h).derivative();

        let slope = (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (1.0 / 6.0);
        state.advance(&slope, h).renormalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;
    use crate::inertia::Inertia;
    use crate::quantity::{AngularVelocity, Torque};
    use crate::quaternion::Quaternion;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_time_step() {
        assert_eq!(RungeKutta4::new(0.0), Err(PhysicsError::InvalidTimeStep(0.0)));
        assert!(RungeKutta4::new(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_constant_spin_matches_closed_form() {
        // Spin about a principal axis: q(t) = [cos(ωt/2), 0, 0, sin(ωt/2)].
        let rk4 = RungeKutta4::new(0.01).unwrap();
        let state = State::new(Inertia::diagonal(1.0, 1.05, 2.0).unwrap())
            .with_angular_velocity(AngularVelocity::new(0.0, 0.0, 1.0));
        let last = *rk4.propagate(&state, 100).unwrap().last().unwrap();

        assert_relative_eq!(last.quaternion.w(), 0.5_f64.cos(), epsilon = 1e-10);
        assert_relative_eq!(last.quaternion.z(), 0.5_f64.sin(), epsilon = 1e-10);
        assert_relative_eq!(last.time, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_torque() {
        // Isotropic body under constant torque: ω is linear in time.
        let rk4 = RungeKutta4::new(0.01).unwrap();
        let state = State::new(Inertia::isotropic(2.0).unwrap())
            .with_torque(Torque::new(0.0, 4.0, 0.0));
        let last = *rk4.propagate(&state, 100).unwrap().last().unwrap();

        assert_relative_eq!(last.angular_velocity.y(), 2.0, epsilon = 1e-12);
        // Rotation angle ∫ω dt = t² = 1 rad about y.
        let expected = Quaternion::new(0.5_f64.cos(), 0.0, 0.5_f64.sin(), 0.0);
        assert_relative_eq!(last.quaternion.w(), expected.w(), epsilon = 1e-8);
        assert_relative_eq!(last.quaternion.y(), expected.y(), epsilon = 1e-8);
    }
}
