//! Fixed-step explicit integrators.
//!
//! Every scheme implements [`Integrator`], so a driver can swap one for
//! another without touching the dynamics.

mod forward_euler;
mod runge_kutta;

pub use forward_euler::ForwardEuler;
pub use runge_kutta::RungeKutta4;

use crate::error::{PhysicsError, Result};
use crate::state::State;

pub trait Integrator: Send + Sync {
    /// Short human-readable name of the scheme.
    fn name(&self) -> &'static str;

    /// Fixed step size, seconds.
    fn time_step(&self) -> f64;

    /// Produce the state one time step after `state`. The input is left
    /// untouched and the returned orientation has unit norm.
    fn step(&self, state: &State) -> Result<State>;

    /// `steps` consecutive steps from `initial`. The returned trajectory
    /// starts with `initial` and holds `steps + 1` states.
    fn propagate(&self, initial: &State, steps: usize) -> Result<Vec<State>> {
        let mut trajectory = Vec::with_capacity(steps + 1);
        trajectory.push(*initial);
        let mut state = *initial;
        for _ in 0..steps {
            state = self.step(&state)?;
            trajectory.push(state);
        }
        Ok(trajectory)
    }
}

fn validate_time_step(dt: f64) -> Result<f64> {
    if dt.is_finite() && dt > 0.0 {
        Ok(dt)
    } else {
        Err(PhysicsError::InvalidTimeStep(dt))
    }
}
