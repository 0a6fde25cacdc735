//! Trigonometry in degrees with exact values at the angles frames are usually drawn with.
//!
//! `f64::sin(PI)` is `1.22e-16`, not zero, and that noise would leak into every
//! reaction of a vertical member. Multiples of 30° and 45° are therefore looked up
//! from a table of correctly rounded values; every other angle falls back to the
//! standard functions.

/// `sin 60°`, correctly rounded.
const SIN_60: f64 = 0.866_025_403_784_438_6;

/// `(angle in degrees, sine)` for the first quadrant, both ends included.
const FIRST_QUADRANT: [(f64, f64); 5] = [
    (0.0, 0.0),
    (30.0, 0.5),
    (45.0, std::f64::consts::FRAC_1_SQRT_2),
    (60.0, SIN_60),
    (90.0, 1.0),
];

/// Look up the exact sine of `angle` degrees, if it is a multiple of 30° or 45°.
fn exact_sin(angle: f64) -> Option<f64> {
    let reduced = angle.rem_euclid(360.0);
    let (quadrant_angle, sign) = match reduced {
        a if a <= 90.0 => (a, 1.0),
        a if a <= 180.0 => (180.0 - a, 1.0),
        a if a <= 270.0 => (a - 180.0, -1.0),
        a => (360.0 - a, -1.0),
    };
    FIRST_QUADRANT
        .iter()
        .find(|(table_angle, _)| (table_angle - quadrant_angle).abs() < 1.0e-9)
        .map(|&(_, value)| if value == 0.0 { 0.0 } else { sign * value })
}

/// Sine of an angle in degrees.
///
/// # Examples
/// ```
/// use framex::trig::psin;
///
/// assert_eq!(psin(180.0), 0.0);
/// assert_eq!(psin(-90.0), -1.0);
/// assert_eq!(psin(30.0), 0.5);
/// ```
#[must_use]
pub fn psin(angle: f64) -> f64 {
    exact_sin(angle).unwrap_or_else(|| angle.to_radians().sin())
}

/// Cosine of an angle in degrees.
#[must_use]
pub fn pcos(angle: f64) -> f64 {
    exact_sin(angle + 90.0).unwrap_or_else(|| angle.to_radians().cos())
}

/// Tangent of an angle in degrees; a signed infinity where the cosine vanishes.
#[must_use]
pub fn ptan(angle: f64) -> f64 {
    psin(angle) / pcos(angle)
}

/// Cotangent of an angle in degrees; a signed infinity where the sine vanishes.
#[must_use]
pub fn pcot(angle: f64) -> f64 {
    pcos(angle) / psin(angle)
}
