//! Attitude dynamics of a rigid body carrying a Kane damper.
//!
//! Orientation is a unit quaternion (body -> inertial), angular velocities and
//! torques are in the body frame. A [`State`] is advanced by any
//! [`Integrator`], each step producing a new `State` value.

extern crate nalgebra as na;

pub mod damper;
pub mod dynamics;
pub mod error;
pub mod inertia;
pub mod integrator;
pub mod quantity;
pub mod quaternion;
pub mod state;

pub use damper::{DampingModel, KaneDamper};
pub use dynamics::Derivative;
pub use error::{PhysicsError, Result};
pub use inertia::Inertia;
pub use integrator::{ForwardEuler, Integrator, RungeKutta4};
pub use quantity::{AngularAcceleration, AngularMomentum, AngularVelocity, Torque};
pub use quaternion::Quaternion;
pub use state::State;
