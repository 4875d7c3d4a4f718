//! Forward Euler.

use super::{Integrator, validate_time_step};
use crate::error::Result;
use crate::state::State;

/// First-order explicit Euler: `x(t + h) = x(t) + h·f(x(t))`, orientation
/// renormalized afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForwardEuler {
    h: f64,
}

impl ForwardEuler {
    pub fn new(h: f64) -> Result<Self> {
        Ok(Self {
            h: validate_time_step(h)?,
        })
    }
}

impl Integrator for ForwardEuler {
    fn name(&self) -> &'static str {
        "forward Euler"
    }

    fn time_step(&self) -> f64 {
        self.h
    }

    fn step(&self, state: &State) -> Result<State> {
        let rate = state.derivative();
        state.advance(&rate, self.h).renormalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;
    use crate::inertia::Inertia;
    use crate::quantity::AngularVelocity;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_bad_time_step() {
        assert_eq!(ForwardEuler::new(0.0), Err(PhysicsError::InvalidTimeStep(0.0)));
        assert_eq!(ForwardEuler::new(-0.01), Err(PhysicsError::InvalidTimeStep(-0.01)));
        assert!(ForwardEuler::new(f64::NAN).is_err());
        assert!(ForwardEuler::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_single_step() {
        let fe = ForwardEuler::new(0.01).unwrap();
        let omega = AngularVelocity::new(2.0, 0.3, 0.3);
        let state = State::new(Inertia::diagonal(1.0, 1.05, 2.0).unwrap())
            .with_angular_velocity(omega);
        let next = fe.step(&state).unwrap();

        let alpha = state.derivative().angular_acceleration;
        assert_eq!(next.angular_velocity, omega.advance(&alpha, 0.01));
        assert_relative_eq!(next.time, 0.01);
        assert_relative_eq!(next.quaternion.norm(), 1.0, epsilon = 1e-15);
        // Small rotation mostly about x.
        assert!(next.quaternion.x() > 0.0);
        assert_relative_eq!(next.quaternion.x(), 0.01, epsilon = 1e-4);
    }

    #[test]
    fn test_corrupted_orientation_fails() {
        let fe = ForwardEuler::new(0.01).unwrap();
        let mut state = State::new(Inertia::diagonal(1.0, 1.05, 2.0).unwrap())
            .with_angular_velocity(AngularVelocity::new(2.0, 0.3, 0.3));
        state.quaternion = crate::quaternion::Quaternion::new(f64::INFINITY, 0.0, 0.0, 0.0);

        assert!(matches!(
            fe.step(&state),
            Err(PhysicsError::DegenerateQuaternion { .. })
        ));
    }

    #[test]
    fn test_propagate_length() {
        let fe = ForwardEuler::new(0.1).unwrap();
        let state = State::new(Inertia::diagonal(1.0, 1.0, 1.0).unwrap());
        let trajectory = fe.propagate(&state, 5).unwrap();

        assert_eq!(trajectory.len(), 6);
        assert_eq!(trajectory[0], state);
        assert_relative_eq!(trajectory[5].time, 0.5, epsilon = 1e-12);
    }
}
