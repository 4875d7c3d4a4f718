//! Kane damper.
//!
//! Conceptually a solid sphere suspended in viscous fluid inside the primary
//! body. As the body rotates the fluid drags the sphere along, and the viscous
//! torque between them is proportional to their relative angular velocity.
//! The exchange is internal: it moves angular momentum between the two bodies
//! and dissipates kinetic energy, but never changes the total momentum.

use crate::error::{PhysicsError, Result};
use crate::inertia::Inertia;
use crate::quantity::{AngularAcceleration, AngularMomentum, AngularVelocity, Torque};

/// Relative spread of principal moments tolerated for a "sphere".
const ISOTROPY_TOLERANCE: f64 = 1e-9;

/// Which components of the relative spin the fluid acts on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DampingModel {
    /// Viscous drag on the full relative angular velocity.
    Full,
    /// Drag only on the relative spin about one body-fixed axis, as in a
    /// single-axis nutation damper.
    Axis(na::Unit<na::Vector3<f64>>),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KaneDamper {
    inertia: Inertia,
    coefficient: f64,
    model: DampingModel,
    /// Absolute angular velocity of the damper, BODY frame components.
    pub angular_velocity: AngularVelocity,
}

impl KaneDamper {
    /// Damper at rest with full three-axis coupling.
    ///
    /// The inertia must be isotropic: the sphere turns relative to the body,
    /// so only an isotropic tensor stays constant in body coordinates.
    pub fn new(inertia: Inertia, coefficient: f64) -> Result<Self> {
        if !inertia.is_isotropic(ISOTROPY_TOLERANCE) {
            return Err(PhysicsError::AnisotropicDamper(inertia.principal_moments()));
        }
        if !coefficient.is_finite() || coefficient < 0.0 {
            return Err(PhysicsError::InvalidDampingCoefficient(coefficient));
        }
        Ok(Self {
            inertia,
            coefficient,
            model: DampingModel::Full,
            angular_velocity: AngularVelocity::zero(),
        })
    }

    /// Solid sphere with the given scalar moment of inertia.
    pub fn sphere(moment: f64, coefficient: f64) -> Result<Self> {
        Self::new(Inertia::isotropic(moment)?, coefficient)
    }

    /// Restrict the coupling to a single body-fixed axis.
    pub fn with_axis(mut self, axis: na::Vector3<f64>) -> Result<Self> {
        let axis = na::Unit::try_new(axis, 1e-12).ok_or(PhysicsError::ZeroDampingAxis)?;
        self.model = DampingModel::Axis(axis);
        Ok(self)
    }

    pub fn with_angular_velocity(mut self, angular_velocity: AngularVelocity) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn inertia(&self) -> &Inertia {
        &self.inertia
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }

    pub fn model(&self) -> DampingModel {
        self.model
    }

    /// Viscous torque the damper exerts ON the primary body, `c·P(ω_d − ω)`.
    /// The damper feels the opposite.
    pub fn coupling_torque(&self, body_omega: &AngularVelocity) -> Torque {
        let relative = self.angular_velocity.as_vector() - body_omega.as_vector();
        let relative = match self.model {
            DampingModel::Full => relative,
            DampingModel::Axis(axis) => axis.into_inner() * axis.dot(&relative),
        };
        Torque::from(relative * self.coefficient)
    }

    /// `ω̇_d = I_d⁻¹ (−τ_c − ω × I_d·ω_d)`.
    ///
    /// `ω_d` is tracked in the rotating body frame, hence the transport term.
    pub fn angular_acceleration(
        &self,
        body_omega: &AngularVelocity,
        coupling: &Torque,
    ) -> AngularAcceleration {
        let momentum = self.inertia.apply(self.angular_velocity.as_vector());
        let transport = body_omega.as_vector().cross(&momentum);
        self.inertia
            .solve(&(-coupling.as_vector() - transport))
            .into()
    }

    pub fn angular_momentum(&self) -> AngularMomentum {
        self.inertia.angular_momentum(&self.angular_velocity)
    }

    pub fn kinetic_energy(&self) -> f64 {
        self.inertia.kinetic_energy(&self.angular_velocity)
    }
}
