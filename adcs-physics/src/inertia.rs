//! Inertia tensors.

use std::fmt;
use std::ops::Mul;

use crate::error::{PhysicsError, Result};
use crate::quantity::{AngularMomentum, AngularVelocity};

/// Relative mismatch allowed between `I` and `Iᵀ`.
const SYMMETRY_TOLERANCE: f64 = 1e-12;

/// Relative slack on the triangle inequality, so thin plates (`Izz = Ixx + Iyy`)
/// survive rounding.
const TRIANGLE_TOLERANCE: f64 = 1e-9;

/// Symmetric, positive definite 3×3 inertia tensor, kg·m².
///
/// ```text
/// I = [[ Ixx Ixy Ixz ]
///      [ Ixy Iyy Iyz ]
///      [ Ixz Iyz Izz ]]
/// ```
///
/// Validated once on construction and immutable afterwards. The inverse is
/// cached since every derivative evaluation needs it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Inertia {
    tensor: na::Matrix3<f64>,
    inverse: na::Matrix3<f64>,
}

impl Inertia {
    /// Build from the six independent components.
    pub fn new(ixx: f64, iyy: f64, izz: f64, ixy: f64, ixz: f64, iyz: f64) -> Result<Self> {
        #[rustfmt::skip]
        let tensor = na::Matrix3::new(
            ixx, ixy, ixz,
            ixy, iyy, iyz,
            ixz, iyz, izz,
        );
        Self::from_matrix(tensor)
    }

    /// Principal-axis tensor.
    pub fn diagonal(ixx: f64, iyy: f64, izz: f64) -> Result<Self> {
        Self::new(ixx, iyy, izz, 0.0, 0.0, 0.0)
    }

    /// Same moment about every axis, as for a solid sphere.
    pub fn isotropic(moment: f64) -> Result<Self> {
        Self::diagonal(moment, moment, moment)
    }

    /// Validate a full matrix. Rejects non-finite, asymmetric, indefinite and
    /// otherwise non-physical tensors.
    pub fn from_matrix(tensor: na::Matrix3<f64>) -> Result<Self> {
        if tensor.iter().any(|v| !v.is_finite()) {
            return Err(PhysicsError::NonFiniteInertia);
        }
        if (tensor - tensor.transpose()).amax() > SYMMETRY_TOLERANCE * tensor.amax() {
            return Err(PhysicsError::AsymmetricInertia);
        }
        let tensor = (tensor + tensor.transpose()) * 0.5;

        let moments = sorted_eigenvalues(&tensor);
        if moments.iter().any(|&m| m <= 0.0) {
            return Err(PhysicsError::NotPositiveDefinite(moments));
        }
        // Each moment must not exceed the sum of the other two.
        let sum: f64 = moments.iter().sum();
        if moments
            .iter()
            .any(|&m| 2.0 * m > sum * (1.0 + TRIANGLE_TOLERANCE))
        {
            return Err(PhysicsError::NonPhysicalInertia(moments));
        }

        let inverse = tensor
            .try_inverse()
            .ok_or(PhysicsError::NotPositiveDefinite(moments))?;
        Ok(Self { tensor, inverse })
    }

    pub fn ixx(&self) -> f64 {
        self.tensor[(0, 0)]
    }

    pub fn iyy(&self) -> f64 {
        self.tensor[(1, 1)]
    }

    pub fn izz(&self) -> f64 {
        self.tensor[(2, 2)]
    }

    pub fn ixy(&self) -> f64 {
        self.tensor[(0, 1)]
    }

    pub fn ixz(&self) -> f64 {
        self.tensor[(0, 2)]
    }

    pub fn iyz(&self) -> f64 {
        self.tensor[(1, 2)]
    }

    pub fn tensor(&self) -> &na::Matrix3<f64> {
        &self.tensor
    }

    pub fn inverse(&self) -> &na::Matrix3<f64> {
        &self.inverse
    }

    /// Principal moments, ascending.
    pub fn principal_moments(&self) -> [f64; 3] {
        sorted_eigenvalues(&self.tensor)
    }

    /// True when all principal moments agree to within `relative` of the largest.
    pub fn is_isotropic(&self, relative: f64) -> bool {
        let [min, _, max] = self.principal_moments();
        max - min <= relative * max
    }

    /// `I·v`
    pub fn apply(&self, v: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.tensor * v
    }

    /// `I⁻¹·v`
    pub fn solve(&self, v: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.inverse * v
    }

    /// `H = I·ω`
    pub fn angular_momentum(&self, omega: &AngularVelocity) -> AngularMomentum {
        self.apply(omega.as_vector()).into()
    }

    /// `½ ωᵀ·I·ω`
    pub fn kinetic_energy(&self, omega: &AngularVelocity) -> f64 {
        0.5 * omega.as_vector().dot(&self.apply(omega.as_vector()))
    }
}

impl Mul<AngularVelocity> for Inertia {
    type Output = AngularMomentum;

    fn mul(self, omega: AngularVelocity) -> Self::Output {
        self.angular_momentum(&omega)
    }
}

impl fmt::Display for Inertia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (n, row) in self.tensor.row_iter().enumerate() {
            if n > 0 {
                writeln!(f)?;
            }
            write!(f, "[{:>10.6} {:>10.6} {:>10.6}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

fn sorted_eigenvalues(tensor: &na::Matrix3<f64>) -> [f64; 3] {
    let eigenvalues = tensor.symmetric_eigenvalues();
    let mut moments = [eigenvalues[0], eigenvalues[1], eigenvalues[2]];
    moments.sort_by(|a, b| a.total_cmp(b));
    moments
}
