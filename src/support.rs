//! Support kinds and the reaction unknowns they introduce.

use serde::{Deserialize, Serialize};

use crate::errors::StructureEditError;
use crate::geometry::Vector3;
use crate::trig::{pcos, psin};

/// The ways a beam end can be held.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SupportKind {
    /// Roller: a single reaction force along a fixed direction.
    Simple {
        /// Direction of the reaction in degrees, counter-clockwise from the global X axis.
        angle: f64,
    },
    /// Hinge: two orthogonal reaction forces.
    Pinned,
    /// Clamp: two reaction forces and a reaction moment.
    Fixed,
}

impl SupportKind {
    /// Parse a support kind from its name.
    ///
    /// `"simple"`/`"roller"`, `"pinned"`/`"hinge"` and `"fixed"`/`"clamped"` are accepted
    /// in any case. Only a simple support uses `angle`, and it requires one.
    ///
    /// # Errors
    ///
    /// Returns [`StructureEditError::InvalidSupport`] for an unknown name and
    /// [`StructureEditError::MissingSupportAngle`] for a simple support without an angle.
    ///
    /// # Examples
    /// ```
    /// use framex::SupportKind;
    ///
    /// let roller = SupportKind::from_name("Simple", Some(90.0)).expect("known kind");
    /// assert_eq!(roller, SupportKind::Simple { angle: 90.0 });
    /// assert_eq!(roller.unknowns(), 1);
    /// ```
    pub fn from_name(name: &str, angle: Option<f64>) -> Result<Self, StructureEditError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simple" | "roller" => angle
                .map(|angle| SupportKind::Simple { angle })
                .ok_or(StructureEditError::MissingSupportAngle),
            "pinned" | "hinge" => Ok(SupportKind::Pinned),
            "fixed" | "clamped" => Ok(SupportKind::Fixed),
            _ => Err(StructureEditError::InvalidSupport(name.to_string())),
        }
    }

    /// Number of unknown reaction scalars.
    #[must_use]
    pub fn unknowns(&self) -> usize {
        match self {
            SupportKind::Simple { .. } => 1,
            SupportKind::Pinned => 2,
            SupportKind::Fixed => 3,
        }
    }
}

/// One unknown reaction scalar and the unit load it scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReactionComponent {
    /// Load produced by a unit value of the unknown: `(force x, force y, moment z)`.
    pub unit: Vector3,
    /// Column of the global equilibrium matrix: the unit load with its moment taken
    /// about the origin.
    pub column: Vector3,
}

impl ReactionComponent {
    /// Unknown force along the unit direction `(dx, dy)` acting at `position`.
    fn force(dx: f64, dy: f64, position: Vector3) -> Self {
        let unit = Vector3::new(dx, dy, 0.0);
        Self {
            unit,
            column: Vector3::new(dx, dy, unit.moment_about_origin(position)),
        }
    }

    /// Unknown moment.
    fn moment() -> Self {
        let unit = Vector3::new(0.0, 0.0, 1.0);
        Self { unit, column: unit }
    }
}

/// A support attached to one end of a beam.
///
/// The reaction stays unknown until the structure is solved.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Support {
    /// Kind of restraint.
    kind: SupportKind,
    /// Solved reaction in the global frame, moment about the supported point.
    #[serde(skip)]
    reaction: Option<Vector3>,
}

impl Support {
    /// Create a support with an unknown reaction.
    #[must_use]
    pub fn new(kind: SupportKind) -> Self {
        Self {
            kind,
            reaction: None,
        }
    }

    /// Kind of restraint.
    #[must_use]
    pub fn kind(&self) -> SupportKind {
        self.kind
    }

    /// Number of unknown reaction scalars.
    #[must_use]
    pub fn unknowns(&self) -> usize {
        self.kind.unknowns()
    }

    /// The unknowns of this support when it sits at `position` (global frame).
    #[must_use]
    pub fn reaction_components(&self, position: Vector3) -> Vec<ReactionComponent> {
        match self.kind {
            SupportKind::Simple { angle } => {
                vec![ReactionComponent::force(pcos(angle), psin(angle), position)]
            }
            SupportKind::Pinned => vec![
                ReactionComponent::force(1.0, 0.0, position),
                ReactionComponent::force(0.0, 1.0, position),
            ],
            SupportKind::Fixed => vec![
                ReactionComponent::force(1.0, 0.0, position),
                ReactionComponent::force(0.0, 1.0, position),
                ReactionComponent::moment(),
            ],
        }
    }

    /// Solved reaction, global frame, or `None` before a solve.
    #[must_use]
    pub fn reaction(&self) -> Option<Vector3> {
        self.reaction
    }

    /// Store the reaction from the unknown magnitudes, in the order of
    /// [`Support::reaction_components`].
    pub(crate) fn set_reaction(&mut self, components: &[ReactionComponent], magnitudes: &[f64]) {
        let reaction = components
            .iter()
            .zip(magnitudes)
            .fold(Vector3::zero(), |acc, (component, &magnitude)| {
                acc + component.unit * magnitude
            });
        self.reaction = Some(reaction);
    }

    /// Forget a previous solution.
    pub(crate) fn clear_reaction(&mut self) {
        self.reaction = None;
    }
}
