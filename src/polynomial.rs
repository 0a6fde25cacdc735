//! Single-variable polynomials used for load intensities and internal-force diagrams.

use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Polynomial in one variable with coefficients indexed by power.
///
/// The coefficient at index `i` multiplies `x^i`, so `[1.0, 0.0, 2.0]` is `1 + 2x²`.
/// A polynomial always holds at least one coefficient.
///
/// # Examples
/// ```
/// use framex::Polynomial;
///
/// let triangle = Polynomial::new(vec![0.0, 2.0]);
/// assert_eq!(triangle.evaluate(3.0), 6.0);
/// assert_eq!(triangle.integrate(0.0, 3.0), 9.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct Polynomial {
    /// Coefficients ordered by increasing power.
    coefficients: Vec<f64>,
}

impl Polynomial {
    /// Create a polynomial from coefficients ordered by increasing power.
    ///
    /// An empty list is read as the zero polynomial.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            Self::zero()
        } else {
            Self { coefficients }
        }
    }

    /// The zero polynomial.
    #[must_use]
    pub fn zero() -> Self {
        Self::constant(0.0)
    }

    /// A polynomial of degree zero.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self {
            coefficients: vec![value],
        }
    }

    /// The polynomial `intercept + slope·x`.
    #[must_use]
    pub fn linear(intercept: f64, slope: f64) -> Self {
        Self {
            coefficients: vec![intercept, slope],
        }
    }

    /// Coefficients ordered by increasing power.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Degree, taken as the number of stored coefficients minus one.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluate at `x` with Horner's scheme.
    #[must_use]
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefficients
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * x + coefficient)
    }

    /// Antiderivative whose value at zero is zero.
    #[must_use]
    pub fn primitive(&self) -> Self {
        let mut coefficients = Vec::with_capacity(self.coefficients.len() + 1);
        coefficients.push(0.0);
        coefficients.extend(
            self.coefficients
                .iter()
                .enumerate()
                .map(|(power, coefficient)| coefficient / (power as f64 + 1.0)),
        );
        Self { coefficients }
    }

    /// Definite integral over `[lower, upper]`.
    #[must_use]
    pub fn integrate(&self, lower: f64, upper: f64) -> f64 {
        let primitive = self.primitive();
        primitive.evaluate(upper) - primitive.evaluate(lower)
    }

    /// First derivative.
    #[must_use]
    pub fn derivative(&self) -> Self {
        Self::new(
            self.coefficients
                .iter()
                .enumerate()
                .skip(1)
                .map(|(power, coefficient)| coefficient * power as f64)
                .collect(),
        )
    }

    /// Polynomial `q(x) = p(x + offset)`.
    ///
    /// Used to re-express an intensity defined over a span in the coordinate of a
    /// segment that starts `offset` further along.
    #[must_use]
    pub fn shifted(&self, offset: f64) -> Self {
        // Horner with polynomial arithmetic: p(x + c) = (((a_n)(x + c) + a_{n-1})(x + c) + ...)
        let base = Self::linear(offset, 1.0);
        self.coefficients
            .iter()
            .rev()
            .fold(Self::zero(), |acc, &coefficient| {
                &(&acc * &base) + &Self::constant(coefficient)
            })
            .truncated(self.degree())
    }

    /// Copy with an amount added to the coefficient of `x^power`, padding with zeros if needed.
    #[must_use]
    pub fn with_term_added(&self, power: usize, amount: f64) -> Self {
        let mut coefficients = self.coefficients.clone();
        if coefficients.len() <= power {
            coefficients.resize(power + 1, 0.0);
        }
        coefficients[power] += amount;
        Self { coefficients }
    }

    /// Whether every coefficient is exactly zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|&coefficient| coefficient == 0.0)
    }

    /// Keep at most `degree + 1` coefficients.
    fn truncated(mut self, degree: usize) -> Self {
        self.coefficients.truncate(degree + 1);
        self
    }

    /// Combine two coefficient lists term by term after padding the shorter one with zeros.
    fn zip_padded(&self, other: &Self, combine: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let at = |coefficients: &[f64], index: usize| coefficients.get(index).copied().unwrap_or(0.0);
        Self {
            coefficients: (0..len)
                .map(|index| {
                    combine(
                        at(&self.coefficients, index),
                        at(&other.coefficients, index),
                    )
                })
                .collect(),
        }
    }
}

impl Default for Polynomial {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<f64> for Polynomial {
    fn from(value: f64) -> Self {
        Self::constant(value)
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Self::new(coefficients)
    }
}

impl From<Polynomial> for Vec<f64> {
    fn from(polynomial: Polynomial) -> Self {
        polynomial.coefficients
    }
}

impl Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, other: &Polynomial) -> Polynomial {
        self.zip_padded(other, |a, b| a + b)
    }
}

impl Add for Polynomial {
    type Output = Polynomial;

    fn add(self, other: Polynomial) -> Polynomial {
        &self + &other
    }
}

impl Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, other: &Polynomial) -> Polynomial {
        self.zip_padded(other, |a, b| a - b)
    }
}

impl Sub for Polynomial {
    type Output = Polynomial;

    fn sub(self, other: Polynomial) -> Polynomial {
        &self - &other
    }
}

impl Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, other: &Polynomial) -> Polynomial {
        let len = (self.coefficients.len() + other.coefficients.len()).saturating_sub(1);
        let mut coefficients = vec![0.0; len.max(1)];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                coefficients[i + j] += a * b;
            }
        }
        Polynomial { coefficients }
    }
}

impl Mul for Polynomial {
    type Output = Polynomial;

    fn mul(self, other: Polynomial) -> Polynomial {
        &self * &other
    }
}

impl Mul<f64> for &Polynomial {
    type Output = Polynomial;

    fn mul(self, scalar: f64) -> Polynomial {
        Polynomial {
            coefficients: self.coefficients.iter().map(|c| c * scalar).collect(),
        }
    }
}

impl Mul<f64> for Polynomial {
    type Output = Polynomial;

    fn mul(self, scalar: f64) -> Polynomial {
        &self * scalar
    }
}

impl Mul<Polynomial> for f64 {
    type Output = Polynomial;

    fn mul(self, polynomial: Polynomial) -> Polynomial {
        &polynomial * self
    }
}

impl Neg for Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        &self * -1.0
    }
}

impl Neg for &Polynomial {
    type Output = Polynomial;

    fn neg(self) -> Polynomial {
        self * -1.0
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficients.first().copied().unwrap_or(0.0))?;
        for (power, &coefficient) in self.coefficients.iter().enumerate().skip(1) {
            if coefficient != 0.0 {
                let sign = if coefficient > 0.0 { '+' } else { '-' };
                write!(f, " {sign} {}x^{power}", coefficient.abs())?;
            }
        }
        Ok(())
    }
}
