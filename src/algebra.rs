//! 3×3 matrices, the Cramer's-rule solver and planar rotations.

use std::ops::{Add, Index, IndexMut, Mul, Neg, Sub};

use nalgebra::Matrix3;

use crate::errors::AlgebraError;
use crate::geometry::Vector3;
use crate::trig::{pcos, psin};

/// Relative size below which a determinant is treated as zero.
///
/// The determinant is compared with the product of the row norms (Hadamard's bound),
/// which makes the test independent of the units the rows are expressed in.
const SINGULARITY_TOLERANCE: f64 = 1.0e-12;

/// Dense 3×3 matrix of `f64`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix3x3(Matrix3<f64>);

impl Matrix3x3 {
    /// Matrix with every entry equal to zero.
    #[must_use]
    pub fn zeros() -> Self {
        Self(Matrix3::zeros())
    }

    /// Identity matrix.
    #[must_use]
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Build a matrix from its rows.
    #[must_use]
    pub fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self(Matrix3::new(
            rows[0][0], rows[0][1], rows[0][2], rows[1][0], rows[1][1], rows[1][2], rows[2][0],
            rows[2][1], rows[2][2],
        ))
    }

    /// Determinant by cofactor expansion along the first row.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        let m = &self.0;
        m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(2, 1)] * m[(1, 2)])
            + m[(0, 1)] * (m[(1, 2)] * m[(2, 0)] - m[(2, 2)] * m[(1, 0)])
            + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
    }

    /// Copy of the matrix with column `column` replaced by `values`.
    ///
    /// # Panics
    ///
    /// Panics when `column` is not 0, 1 or 2.
    #[must_use]
    pub fn with_column(&self, column: usize, values: Vector3) -> Self {
        let mut replaced = self.0;
        replaced.set_column(column, &values.to_vector());
        Self(replaced)
    }

    /// Overwrite column `column` with `values`.
    pub fn set_column(&mut self, column: usize, values: Vector3) {
        self.0.set_column(column, &values.to_vector());
    }

    /// Column `column` as a vector.
    #[must_use]
    pub fn column(&self, column: usize) -> Vector3 {
        Vector3::from(self.0.column(column).into_owned())
    }

    /// Upper bound on the determinant's magnitude: the product of the row norms.
    fn hadamard_bound(&self) -> f64 {
        self.0.row_iter().map(|row| row.norm()).product()
    }
}

impl Index<(usize, usize)> for Matrix3x3 {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

impl IndexMut<(usize, usize)> for Matrix3x3 {
    fn index_mut(&mut self, index: (usize, usize)) -> &mut f64 {
        &mut self.0[index]
    }
}

impl Add for Matrix3x3 {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Matrix3x3 {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Matrix3x3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Matrix3x3 {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self {
        Self(self.0 * scalar)
    }
}

impl Mul for Matrix3x3 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        Self(self.0 * other.0)
    }
}

impl Mul<Vector3> for Matrix3x3 {
    type Output = Vector3;

    fn mul(self, vector: Vector3) -> Vector3 {
        Vector3::from(self.0 * vector.to_vector())
    }
}

/// Solve `coefficients · x = rhs` with Cramer's rule.
///
/// # Errors
///
/// Returns [`AlgebraError::SingularMatrix`] when the determinant vanishes relative to
/// the size of the matrix entries.
///
/// # Examples
/// ```
/// use framex::algebra::{solve, Matrix3x3};
/// use framex::Vector3;
///
/// let a = Matrix3x3::from_rows([[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [1.0, 0.0, 1.0]]);
/// let x = solve(&a, Vector3::new(2.0, 8.0, 4.0)).expect("regular system");
/// assert_eq!(x, Vector3::new(1.0, 2.0, 3.0));
/// ```
pub fn solve(coefficients: &Matrix3x3, rhs: Vector3) -> Result<Vector3, AlgebraError> {
    let determinant = coefficients.determinant();
    let bound = coefficients.hadamard_bound();
    if bound == 0.0 || determinant.abs() <= SINGULARITY_TOLERANCE * bound {
        return Err(AlgebraError::SingularMatrix { determinant });
    }
    Ok(Vector3::new(
        coefficients.with_column(0, rhs).determinant() / determinant,
        coefficients.with_column(1, rhs).determinant() / determinant,
        coefficients.with_column(2, rhs).determinant() / determinant,
    ))
}

/// Inverse matrix, one Cramer solve per column.
///
/// # Errors
///
/// Returns [`AlgebraError::SingularMatrix`] when `matrix` has no inverse.
pub fn invert(matrix: &Matrix3x3) -> Result<Matrix3x3, AlgebraError> {
    let mut inverse = Matrix3x3::zeros();
    for column in 0..3 {
        let mut unit = [0.0; 3];
        unit[column] = 1.0;
        let solution = solve(matrix, Vector3::new(unit[0], unit[1], unit[2]))?;
        inverse.set_column(column, solution);
    }
    Ok(inverse)
}

/// Rotate the planar components of `vector` by `angle` degrees counter-clockwise.
///
/// The Z component is a moment (or unused) and is left untouched.
#[must_use]
pub fn rotate(vector: Vector3, angle: f64) -> Vector3 {
    let (sin, cos) = (psin(angle), pcos(angle));
    Vector3::new(
        vector.x * cos - vector.y * sin,
        vector.x * sin + vector.y * cos,
        vector.z,
    )
}
