//! Body-frame vector quantities.
//!
//! Each quantity wraps a `Vector3<f64>` in its own type so an angular
//! velocity can never be added to a torque by accident. Unless a method says
//! otherwise, components are in the BODY frame.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::Result;
use crate::quaternion::Quaternion;

macro_rules! body_vector {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq)]
        pub struct $name(na::Vector3<f64>);

        impl $name {
            pub fn new(x: f64, y: f64, z: f64) -> Self {
                Self(na::Vector3::new(x, y, z))
            }

            pub fn zero() -> Self {
                Self(na::Vector3::zeros())
            }

            pub fn x(&self) -> f64 {
                self.0.x
            }

            pub fn y(&self) -> f64 {
                self.0.y
            }

            pub fn z(&self) -> f64 {
                self.0.z
            }

            pub fn as_vector(&self) -> &na::Vector3<f64> {
                &self.0
            }

            pub fn norm(&self) -> f64 {
                self.0.norm()
            }

            pub fn scale(&self, s: f64) -> Self {
                Self(self.0 * s)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl From<na::Vector3<f64>> for $name {
            fn from(v: na::Vector3<f64>) -> Self {
                Self(v)
            }
        }

        impl From<$name> for na::Vector3<f64> {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl Add for $name {
            type Output = $name;

            fn add(self, other: Self) -> Self::Output {
                Self(self.0 + other.0)
            }
        }

        impl Sub for $name {
            type Output = $name;

            fn sub(self, other: Self) -> Self::Output {
                Self(self.0 - other.0)
            }
        }

        impl Neg for $name {
            type Output = $name;

            fn neg(self) -> Self::Output {
                Self(-self.0)
            }
        }

        impl Mul<f64> for $name {
            type Output = $name;

            fn mul(self, s: f64) -> Self::Output {
                self.scale(s)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "i{:.6} + j{:.6} + k{:.6}", self.0.x, self.0.y, self.0.z)
            }
        }
    };
}

body_vector!(
    /// Angular velocity ω, rad/s.
    AngularVelocity
);

body_vector!(
    /// Rate of change of an angular velocity, rad/s².
    AngularAcceleration
);

body_vector!(
    /// Angular momentum H, kg·m²/s.
    AngularMomentum
);

body_vector!(
    /// Torque τ, N·m.
    Torque
);

impl AngularVelocity {
    /// `ω + α·dt`
    pub fn advance(&self, rate: &AngularAcceleration, dt: f64) -> Self {
        Self(self.0 + rate.0 * dt)
    }
}

impl AngularMomentum {
    /// Express this body-frame momentum in the inertial frame for the
    /// orientation `q` (body -> inertial).
    pub fn rotate(&self, q: &Quaternion) -> Result<Self> {
        Ok(Self(q.rotate_vector(&self.0)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;

    #[test]
    fn test_arithmetic() {
        let a = Torque::new(1.0, 2.0, 3.0);
        let b = Torque::new(0.5, -1.0, 4.0);

        assert_eq!(a + b, Torque::new(1.5, 1.0, 7.0));
        assert_eq!(a - b, Torque::new(0.5, 3.0, -1.0));
        assert_eq!(-a, Torque::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Torque::new(2.0, 4.0, 6.0));
        assert_eq!(Torque::default(), Torque::zero());
    }

    #[test]
    fn test_advance() {
        let omega = AngularVelocity::new(1.0, 0.0, -1.0);
        let alpha = AngularAcceleration::new(2.0, 4.0, 0.0);

        assert_eq!(omega.advance(&alpha, 0.5), AngularVelocity::new(2.0, 2.0, -1.0));
    }

    #[test]
    fn test_momentum_rotate() {
        // Body rotated 90 degrees about z: body x points along inertial y.
        let q = Quaternion::new(FRAC_PI_4.cos(), 0.0, 0.0, FRAC_PI_4.sin());
        let h = AngularMomentum::new(3.0, 0.0, 1.0).rotate(&q).unwrap();

        assert_relative_eq!(h.x(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(h.y(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(h.z(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            AngularMomentum::new(1.0, -2.0, 0.5).to_string(),
            "i1.000000 + j-2.000000 + k0.500000"
        );
    }
}
