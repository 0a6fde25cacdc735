//! Fundamental vector type shared by positions, forces and moments.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use nalgebra::Vector3 as AlgebraVector;
use serde::{Deserialize, Serialize};

/// Three component vector used for planar statics.
///
/// Depending on context the components are read as a position `(x, y, unused)`
/// in metres or as a load `(force x, force y, moment z)` in kN and kN·m.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector3 {
    /// Component along the X axis.
    pub x: f64,
    /// Component along the Y axis.
    pub y: f64,
    /// Component about (or along) the out-of-plane Z axis.
    pub z: f64,
}

impl Vector3 {
    /// Create a [`Vector3`] with explicit components.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector.
    #[must_use]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Scalar product.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Vector product.
    #[must_use]
    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean norm.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector with the same direction, or `None` for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            None
        } else {
            Some(self * (1.0 / magnitude))
        }
    }

    /// Moment about the origin of a force `self` applied at `position`.
    ///
    /// Only the planar components take part: the result is
    /// `position.x * self.y - position.y * self.x`.
    #[must_use]
    pub fn moment_about_origin(self, position: Self) -> f64 {
        position.x * self.y - position.y * self.x
    }

    /// Move a load resultant `(fx, fy, m)` whose moment is taken about the origin so that
    /// the moment is taken about `point` instead.
    #[must_use]
    pub fn moved_to(self, point: Self) -> Self {
        Self::new(self.x, self.y, self.z - self.moment_about_origin(point))
    }

    /// Convert the vector into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> AlgebraVector<f64> {
        AlgebraVector::new(self.x, self.y, self.z)
    }
}

impl From<AlgebraVector<f64>> for Vector3 {
    fn from(value: AlgebraVector<f64>) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

impl From<Vector3> for AlgebraVector<f64> {
    fn from(value: Vector3) -> Self {
        value.to_vector()
    }
}

impl Add for Vector3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Vector3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl SubAssign for Vector3 {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Mul<f64> for Vector3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl Mul<Vector3> for f64 {
    type Output = Vector3;

    fn mul(self, vector: Vector3) -> Vector3 {
        vector * self
    }
}

impl Neg for Vector3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

/// Convenience helper for creating planar positions.
///
/// # Examples
/// ```
/// use framex::point;
///
/// let corner = point(3.0, 4.0);
/// assert_eq!(corner.magnitude(), 5.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Vector3 {
    Vector3::new(x, y, 0.0)
}

/// Convenience helper for creating load resultants.
///
/// # Examples
/// ```
/// use framex::load;
///
/// let reaction = load(0.0, 10.0, 40.0);
/// assert_eq!(reaction.z, 40.0);
/// ```
#[must_use]
pub const fn load(fx: f64, fy: f64, moment: f64) -> Vector3 {
    Vector3::new(fx, fy, moment)
}
