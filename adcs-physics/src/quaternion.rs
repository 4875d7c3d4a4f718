//! Quaternion algebra.
//!
//! Orientations are body -> inertial: a body-frame vector `v` is seen in the
//! inertial frame as the vector part of `q ⊗ [0, v] ⊗ q⁻¹`, and the attitude
//! evolves as `q̇ = ½ q ⊗ [0, ω]` with ω in the body frame.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{NORM_EPSILON, PhysicsError, Result};
use crate::quantity::AngularVelocity;

/// A quaternion `w + xi + yj + zk`.
///
/// The same type holds unit orientations, pure (vector) quaternions and
/// quaternion rates. Only [`crate::State`] insists on unit norm.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quaternion(na::Quaternion<f64>);

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self(na::Quaternion::new(w, x, y, z))
    }

    /// The orientation where body and inertial frames coincide.
    pub fn identity() -> Self {
        Self(na::Quaternion::identity())
    }

    /// Pure quaternion `[0, (x, y, z)]`.
    pub fn from_vector(x: f64, y: f64, z: f64) -> Self {
        Self::embed(&na::Vector3::new(x, y, z))
    }

    pub fn embed(v: &na::Vector3<f64>) -> Self {
        Self(na::Quaternion::from_imag(*v))
    }

    pub fn w(&self) -> f64 {
        self.0.w
    }

    pub fn x(&self) -> f64 {
        self.0.i
    }

    pub fn y(&self) -> f64 {
        self.0.j
    }

    pub fn z(&self) -> f64 {
        self.0.k
    }

    /// Vector (imaginary) part.
    pub fn vector(&self) -> na::Vector3<f64> {
        self.0.imag()
    }

    /// Components in `[w, x, y, z]` order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.0.w, self.0.i, self.0.j, self.0.k]
    }

    pub fn norm(&self) -> f64 {
        self.0.norm()
    }

    pub fn conjugate(&self) -> Self {
        Self(self.0.conjugate())
    }

    /// `q̄ / ‖q‖²`. Fails if the norm has underflowed or is not finite.
    pub fn inverse(&self) -> Result<Self> {
        let norm = self.norm();
        if !norm.is_finite() || norm < NORM_EPSILON {
            return Err(PhysicsError::DegenerateQuaternion { norm });
        }
        Ok(Self(self.0.conjugate() / self.0.norm_squared()))
    }

    /// `q / ‖q‖`. Fails if the norm has underflowed or is not finite.
    pub fn normalize(&self) -> Result<Self> {
        let norm = self.norm();
        if !norm.is_finite() || norm < NORM_EPSILON {
            return Err(PhysicsError::DegenerateQuaternion { norm });
        }
        Ok(Self(self.0 / norm))
    }

    pub fn scale(&self, s: f64) -> Self {
        Self(self.0 * s)
    }

    /// Vector part of `q ⊗ [0, v] ⊗ q⁻¹`.
    ///
    /// Uses the true inverse, so a slightly non-unit `q` still rotates without
    /// stretching.
    pub fn rotate_vector(&self, v: &na::Vector3<f64>) -> Result<na::Vector3<f64>> {
        let rotated = *self * Self::embed(v) * self.inverse()?;
        Ok(rotated.vector())
    }

    /// Kinematic rate `½ q ⊗ [0, ω]` for a body-frame angular velocity.
    pub fn derivative(&self, omega: &AngularVelocity) -> Self {
        (*self * Self::embed(omega.as_vector())).scale(0.5)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, other: Self) -> Self::Output {
        Self(self.0 + other.0)
    }
}

impl Sub for Quaternion {
    type Output = Quaternion;

    fn sub(self, other: Self) -> Self::Output {
        Self(self.0 - other.0)
    }
}

/// Hamilton product.
impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, other: Self) -> Self::Output {
        Self(self.0 * other.0)
    }
}

impl Mul<f64> for Quaternion {
    type Output = Quaternion;

    fn mul(self, s: f64) -> Self::Output {
        self.scale(s)
    }
}

impl Neg for Quaternion {
    type Output = Quaternion;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.6} + i{:.6} + j{:.6} + k{:.6}",
            self.w(),
            self.x(),
            self.y(),
            self.z()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    fn assert_quat_eq(a: Quaternion, b: Quaternion) {
        for (x, y) in a.to_array().iter().zip(b.to_array().iter()) {
            assert_relative_eq!(*x, *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_hamilton_basis() {
        let i = Quaternion::from_vector(1.0, 0.0, 0.0);
        let j = Quaternion::from_vector(0.0, 1.0, 0.0);
        let k = Quaternion::from_vector(0.0, 0.0, 1.0);

        assert_quat_eq(i * j, k);
        assert_quat_eq(j * i, -k);
        assert_quat_eq(j * k, i);
        assert_quat_eq(k * i, j);
        assert_quat_eq(i * i, Quaternion::new(-1.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_product_is_associative() {
        let a = Quaternion::new(0.3, -1.2, 0.7, 2.0);
        let b = Quaternion::new(-0.5, 0.1, 1.5, -0.4);
        let c = Quaternion::new(1.1, 0.9, -0.2, 0.6);

        assert_quat_eq((a * b) * c, a * (b * c));
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::new(1.0, 2.0, -3.0, 0.5);
        let inv = q.inverse().unwrap();

        assert_quat_eq(q * inv, Quaternion::identity());
        assert_quat_eq(inv * q, Quaternion::identity());
    }

    #[test]
    fn test_degenerate_inverse_and_normalize() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);

        assert!(matches!(
            zero.inverse(),
            Err(PhysicsError::DegenerateQuaternion { .. })
        ));
        assert!(matches!(
            zero.normalize(),
            Err(PhysicsError::DegenerateQuaternion { .. })
        ));

        let nan = Quaternion::new(f64::NAN, 0.0, 0.0, 0.0);
        assert!(nan.normalize().is_err());

        let infinite = Quaternion::new(f64::INFINITY, 0.0, 0.0, 0.0);
        assert!(matches!(
            infinite.normalize(),
            Err(PhysicsError::DegenerateQuaternion { .. })
        ));
        assert!(matches!(
            infinite.inverse(),
            Err(PhysicsError::DegenerateQuaternion { .. })
        ));
        assert!(infinite.rotate_vector(&na::Vector3::x()).is_err());
    }

    #[test]
    fn test_normalize() {
        let q = Quaternion::new(3.0, 0.0, 4.0, 0.0).normalize().unwrap();

        assert_relative_eq!(q.norm(), 1.0, epsilon = 1e-15);
        assert_relative_eq!(q.w(), 0.6, epsilon = 1e-15);
        assert_relative_eq!(q.y(), 0.8, epsilon = 1e-15);
    }

    #[test]
    fn test_from_vector_is_pure() {
        let q = Quaternion::from_vector(1.0, 2.0, 3.0);

        assert_eq!(q.w(), 0.0);
        assert_eq!(q.vector(), na::Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(q.conjugate().vector(), na::Vector3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_rotate_vector_quarter_turn() {
        // 90 degrees about z.
        let q = Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin());
        let v = q.rotate_vector(&na::Vector3::x()).unwrap();

        assert_relative_eq!(v, na::Vector3::y(), epsilon = 1e-12);
    }

    #[test]
    fn test_rotate_vector_ignores_scale() {
        let q = Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin()).scale(2.5);
        let v = q.rotate_vector(&na::Vector3::new(0.0, 2.0, 0.0)).unwrap();

        assert_relative_eq!(v, na::Vector3::new(-2.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_derivative() {
        let omega = AngularVelocity::new(0.0, 0.0, 1.0);

        let q_dot = Quaternion::identity().derivative(&omega);
        assert_quat_eq(q_dot, Quaternion::new(0.0, 0.0, 0.0, 0.5));

        let q_dot = Quaternion::identity().derivative(&AngularVelocity::zero());
        assert_eq!(q_dot.norm(), 0.0);
    }

    #[test]
    fn test_derivative_is_tangent() {
        let q = Quaternion::new(0.2, -0.4, 0.1, 0.8).normalize().unwrap();
        let q_dot = q.derivative(&AngularVelocity::new(1.5, -0.3, 2.2));

        let radial: f64 = q
            .to_array()
            .iter()
            .zip(q_dot.to_array().iter())
            .map(|(a, b)| a * b)
            .sum();
        assert_relative_eq!(radial, 0.0, epsilon = 1e-14);
    }

    #[test]
    fn test_display() {
        let q = Quaternion::new(1.0, 0.0, -0.5, 0.25);
        assert_eq!(
            q.to_string(),
            "1.000000 + i0.000000 + j-0.500000 + k0.250000"
        );
    }
}
