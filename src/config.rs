//! Unit conversion and tolerance settings for an analysis.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::geometry::{point, Vector3};

/// How placement coordinates given by the caller map onto the analysis frame.
///
/// Analysis coordinates are metres with Y pointing up. A drawing surface usually works
/// in pixels with Y pointing down; [`UnitConfig::screen`] covers that case.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitConfig {
    /// Placement units per metre.
    pub scale: f64,
    /// Whether the placement Y axis points down.
    pub flip_y: bool,
}

impl Default for UnitConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            flip_y: false,
        }
    }
}

impl UnitConfig {
    /// Ten pixels per metre with Y pointing down.
    #[must_use]
    pub fn screen() -> Self {
        Self {
            scale: 10.0,
            flip_y: true,
        }
    }

    /// Convert a placement position into metres in the analysis frame.
    ///
    /// # Examples
    /// ```
    /// use framex::{point, UnitConfig};
    ///
    /// let metres = UnitConfig::screen().to_analysis(point(30.0, 20.0));
    /// assert_eq!(metres, point(3.0, -2.0));
    /// ```
    #[must_use]
    pub fn to_analysis(&self, position: Vector3) -> Vector3 {
        let y = position.y / self.scale;
        point(position.x / self.scale, if self.flip_y { -y } else { y })
    }

    /// Convert a placement angle into the analysis frame.
    ///
    /// Flipping the Y axis mirrors the angle.
    #[must_use]
    pub fn angle_to_analysis(&self, angle: f64) -> f64 {
        if self.flip_y {
            -angle
        } else {
            angle
        }
    }
}

/// Settings that steer [`Structure::solve_system`](crate::Structure::solve_system).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Mapping from placement coordinates to metres.
    pub units: UnitConfig,
    /// Largest distance in metres accepted between a placement's end and the end
    /// implied by its start, angle and length, and between two connected ends.
    pub placement_tolerance: f64,
    /// Whether to recompute the global equilibrium residual after solving.
    pub check_statics: bool,
    /// Largest residual accepted by the statics check before a warning is logged.
    pub statics_tolerance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            units: UnitConfig::default(),
            placement_tolerance: 1.0e-6,
            check_statics: true,
            statics_tolerance: 1.0e-6,
        }
    }
}

impl AnalysisConfig {
    /// Read a configuration from JSON; missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and [`ConfigError::Invalid`]
    /// when a value fails [`AnalysisConfig::validate`].
    ///
    /// # Examples
    /// ```
    /// use framex::AnalysisConfig;
    ///
    /// let config = AnalysisConfig::from_json(r#"{ "units": { "scale": 100.0 } }"#)
    ///     .expect("valid configuration");
    /// assert_eq!(config.units.scale, 100.0);
    /// assert!(config.check_statics);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the scale and tolerances are positive and finite.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first rejected field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("units.scale", self.units.scale),
            ("placement_tolerance", self.placement_tolerance),
            ("statics_tolerance", self.statics_tolerance),
        ];
        match fields
            .into_iter()
            .find(|(_, value)| !(value.is_finite() && *value > 0.0))
        {
            Some((field, value)) => Err(ConfigError::Invalid { field, value }),
            None => Ok(()),
        }
    }
}
