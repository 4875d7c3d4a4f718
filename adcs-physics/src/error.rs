//! Failures the engine reports instead of producing meaningless dynamics.

use thiserror::Error;

/// Smallest quaternion norm that can still be normalized or inverted.
pub const NORM_EPSILON: f64 = 1e-12;

/// How far an orientation handed to a [`crate::State`] may stray from unit norm.
pub const UNIT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// A quaternion collapsed towards zero or blew up, so it has no direction
    /// left to keep.
    #[error("quaternion norm {norm:e} cannot be normalized or inverted")]
    DegenerateQuaternion { norm: f64 },

    #[error("orientation quaternion has norm {norm}, expected a unit quaternion")]
    NotUnitQuaternion { norm: f64 },

    #[error("inertia tensor has non-finite components")]
    NonFiniteInertia,

    #[error("inertia tensor is not symmetric")]
    AsymmetricInertia,

    #[error("inertia tensor is not positive definite (principal moments {0:?})")]
    NotPositiveDefinite([f64; 3]),

    /// No rigid body can have one principal moment exceed the sum of the other two.
    #[error("principal moments {0:?} violate the triangle inequality")]
    NonPhysicalInertia([f64; 3]),

    #[error("damper inertia must be isotropic, got principal moments {0:?}")]
    AnisotropicDamper([f64; 3]),

    #[error("damping coefficient must be finite and non-negative, got {0}")]
    InvalidDampingCoefficient(f64),

    #[error("damping axis must be non-zero")]
    ZeroDampingAxis,

    #[error("time step must be finite and positive, got {0}")]
    InvalidTimeStep(f64),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;
