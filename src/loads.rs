//! Concentrated forces, distributed forces and applied moments.

use serde::{Deserialize, Serialize};

use crate::errors::BeamError;
use crate::geometry::Vector3;
use crate::polynomial::Polynomial;
use crate::trig::{pcos, pcot, psin};

/// A single force with a signed magnitude in kN.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Concentrated {
    /// Signed magnitude in kN.
    pub magnitude: f64,
}

impl Concentrated {
    /// Create a concentrated force.
    #[must_use]
    pub const fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }

    /// Force vector when the load points at `angle` degrees counter-clockwise from +X.
    ///
    /// # Examples
    /// ```
    /// use framex::{Concentrated, Vector3};
    ///
    /// let downward = Concentrated::new(10.0).force_vector(270.0);
    /// assert_eq!(downward, Vector3::new(0.0, -10.0, 0.0));
    /// ```
    #[must_use]
    pub fn force_vector(&self, angle: f64) -> Vector3 {
        Vector3::new(
            self.magnitude * pcos(angle),
            self.magnitude * psin(angle),
            0.0,
        )
    }
}

/// A force spread over a span, with an intensity in kN/m that varies along the span.
///
/// The intensity polynomial is expressed in the span's own coordinate, which is zero
/// where the span begins.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Distributed {
    /// Span length in metres.
    length: f64,
    /// Intensity as a function of the position along the span.
    intensity: Polynomial,
}

impl Distributed {
    /// Create a distributed load.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonPositiveLength`] unless `length` is positive and finite.
    pub fn new(length: f64, intensity: Polynomial) -> Result<Self, BeamError> {
        if !(length.is_finite() && length > 0.0) {
            return Err(BeamError::NonPositiveLength(length));
        }
        Ok(Self { length, intensity })
    }

    /// Uniform intensity over `length`.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonPositiveLength`] unless `length` is positive and finite.
    pub fn uniform(length: f64, intensity: f64) -> Result<Self, BeamError> {
        Self::new(length, Polynomial::constant(intensity))
    }

    /// Span length in metres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Intensity polynomial in kN/m.
    #[must_use]
    pub fn intensity(&self) -> &Polynomial {
        &self.intensity
    }

    /// Resultant magnitude and first moment (about the span origin) over `[lower, upper]`.
    #[must_use]
    pub fn resultant(&self, lower: f64, upper: f64) -> (f64, f64) {
        let first_moment = &self.intensity * &Polynomial::linear(0.0, 1.0);
        (
            self.intensity.integrate(lower, upper),
            first_moment.integrate(lower, upper),
        )
    }

    /// Concentrated force equivalent to the part of the load over `[lower, upper]`,
    /// with its point of application measured from the span origin.
    ///
    /// A zero resultant has no centroid; the offset is then reported as zero.
    ///
    /// # Examples
    /// ```
    /// use framex::{Distributed, Polynomial};
    ///
    /// let triangle = Distributed::new(3.0, Polynomial::linear(0.0, 2.0)).expect("valid span");
    /// let (force, offset) = triangle.equivalent(0.0, 3.0);
    /// assert!((force.magnitude - 9.0).abs() < 1.0e-12);
    /// assert!((offset - 2.0).abs() < 1.0e-12);
    /// ```
    #[must_use]
    pub fn equivalent(&self, lower: f64, upper: f64) -> (Concentrated, f64) {
        let (magnitude, first_moment) = self.resultant(lower, upper);
        if lower == upper || magnitude == 0.0 {
            return (Concentrated::new(0.0), 0.0);
        }
        (Concentrated::new(magnitude), first_moment / magnitude)
    }

    /// Parallel and perpendicular components of the load applied at a non-right `angle`.
    ///
    /// The intensity is corrected by adding `cot(angle)` to its linear term, then scaled
    /// by `cos(angle)` and `sin(angle)`; both components act over the slanted span
    /// `length / sin(angle)`.
    ///
    /// # Errors
    ///
    /// Returns [`BeamError::NonPositiveLength`] when `angle` makes the slanted span
    /// degenerate (a load parallel to the beam, or one pointing backwards).
    pub fn angled_components(&self, angle: f64) -> Result<(Self, Self), BeamError> {
        let sin = psin(angle);
        let corrected = self.intensity.with_term_added(1, pcot(angle));
        let length = self.length / sin;
        Ok((
            Self::new(length, &corrected * pcos(angle))?,
            Self::new(length, &corrected * sin)?,
        ))
    }

    /// Axial and transverse intensities of the load acting at `angle` relative to the beam.
    #[must_use]
    pub fn resolved(&self, angle: f64) -> (Polynomial, Polynomial) {
        (
            &self.intensity * pcos(angle),
            &self.intensity * psin(angle),
        )
    }
}

/// A couple about the out-of-plane axis, counter-clockwise positive, in kN·m.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// Signed magnitude in kN·m.
    pub magnitude: f64,
}

impl Moment {
    /// Create an applied moment.
    #[must_use]
    pub const fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }
}

/// Loads that act along a beam and take part in the position-ordered sweep.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Load {
    /// A force applied at a single point.
    Concentrated(Concentrated),
    /// A force spread over a span starting at the load position.
    Distributed(Distributed),
}

impl Load {
    /// Distance covered along the beam: zero for a point load.
    #[must_use]
    pub fn span(&self) -> f64 {
        match self {
            Load::Concentrated(_) => 0.0,
            Load::Distributed(distributed) => distributed.length(),
        }
    }
}

/// A load placed on a beam.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedLoad {
    /// The load itself.
    pub load: Load,
    /// Position along the beam where the load (or its span) begins, in metres.
    pub position: f64,
    /// Direction in degrees, counter-clockwise from the beam axis.
    pub angle: f64,
}

/// A moment placed on a beam.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedMoment {
    /// The moment itself.
    pub moment: Moment,
    /// Position along the beam in metres.
    pub position: f64,
}
