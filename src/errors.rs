//! Error types produced while editing or analysing frames.

use petgraph::graph::{EdgeIndex, NodeIndex};
use thiserror::Error;

use crate::beam::End;

/// Error returned by the linear-algebra kernel.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum AlgebraError {
    /// Returned when the coefficient matrix has no inverse.
    #[error("matrix is singular (determinant {determinant:e})")]
    SingularMatrix {
        /// Determinant that failed the singularity test.
        determinant: f64,
    },
}

/// Error returned by a single beam, either while loading it or while querying its diagrams.
#[derive(Clone, Copy, Debug, Error, PartialEq)]
pub enum BeamError {
    /// Returned when a beam or a distributed span is given a zero, negative or non-finite length.
    #[error("length must be positive and finite (received {0})")]
    NonPositiveLength(f64),
    /// Returned when a beam is too short for its two ends to be told apart.
    #[error("length {length} is below the minimum beam length {minimum}")]
    TooShort {
        /// Rejected length in metres.
        length: f64,
        /// Shortest accepted length in metres.
        minimum: f64,
    },
    /// Returned when a position lies outside `[0, length]`.
    #[error("position {position} lies outside the beam [0, {length}]")]
    OutOfRange {
        /// Rejected position in metres.
        position: f64,
        /// Length of the beam in metres.
        length: f64,
    },
    /// Returned when a distributed load would run past the end of the beam.
    #[error("span [{start}, {start} + {span}] does not fit on a beam of length {length}")]
    SpanOutOfRange {
        /// Position where the span begins.
        start: f64,
        /// Length of the span.
        span: f64,
        /// Length of the beam.
        length: f64,
    },
    /// Returned when a boundary condition handed to the solver is not finite.
    #[error("boundary condition {0:?} is not finite")]
    NonFiniteBoundary([f64; 3]),
    /// Returned when diagrams are queried before the beam has been solved.
    #[error("beam has not been solved yet")]
    Unsolved,
}

/// Error returned when editing a [`Structure`](crate::Structure) with invalid input.
///
/// # Examples
///
/// ```
/// use petgraph::graph::{EdgeIndex, NodeIndex};
/// use framex::{Structure, StructureEditError};
///
/// let mut structure = Structure::new();
/// let missing = NodeIndex::new(7);
/// let error = structure
///     .beam_mut(missing)
///     .map(|_| ())
///     .expect_err("unknown beam is rejected");
/// assert_eq!(error, StructureEditError::UnknownBeam(missing));
/// ```
#[derive(Debug, Error, PartialEq)]
pub enum StructureEditError {
    /// Returned when a beam cannot be found in the structure.
    #[error("beam {0:?} does not exist in this structure")]
    UnknownBeam(NodeIndex),
    /// Returned when a connection cannot be found in the structure.
    #[error("connection {0:?} does not exist in this structure")]
    UnknownConnection(EdgeIndex),
    /// Returned when a support kind name is not recognised.
    #[error("unknown support kind '{0}'")]
    InvalidSupport(String),
    /// Returned when a simple support is requested without its direction.
    #[error("a simple support needs an application angle")]
    MissingSupportAngle,
    /// Returned when a beam is connected to itself.
    #[error("beam {0:?} cannot be connected to itself")]
    SelfConnection(NodeIndex),
    /// Returned when a beam rejects a load or query.
    #[error(transparent)]
    Beam(#[from] BeamError),
}

/// Error returned when a structure cannot be analysed.
#[derive(Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when the number of reaction unknowns differs from three.
    #[error("system is not isostatic: {unknowns} reaction unknowns (exactly 3 are required)")]
    NotIsostatic {
        /// Number of unknown reaction scalars found across all supports.
        unknowns: usize,
    },
    /// Returned when the equilibrium matrix is singular although there are three unknowns.
    #[error("structure is unstable; the supports form a mechanism")]
    Unstable(#[source] AlgebraError),
    /// Returned when no beam carries a support to start the traversal from.
    #[error("no beam carries a support")]
    NoSupportedBeam,
    /// Returned when the beam connections form a loop.
    #[error("beam {beam:?} closes a cycle; only tree-shaped frames are supported")]
    Cycle {
        /// Beam reached a second time.
        beam: NodeIndex,
    },
    /// Returned when a beam is not connected to the supported part of the frame.
    #[error("beam {beam:?} is not connected to any supported beam")]
    Unreachable {
        /// Beam left without a boundary condition.
        beam: NodeIndex,
    },
    /// Returned when a placement's end point disagrees with its start, angle and length.
    #[error("beam {beam:?} ends at ({found_x}, {found_y}) but its length and angle put the end at ({expected_x}, {expected_y})")]
    PlacementMismatch {
        /// Misplaced beam.
        beam: NodeIndex,
        /// X coordinate implied by start, angle and length.
        expected_x: f64,
        /// Y coordinate implied by start, angle and length.
        expected_y: f64,
        /// X coordinate given at placement.
        found_x: f64,
        /// Y coordinate given at placement.
        found_y: f64,
    },
    /// Returned when two connected beam ends do not meet.
    #[error("connected ends {first:?} and {second:?} do not coincide")]
    DisjointJoint {
        /// First beam and end of the connection.
        first: (NodeIndex, End),
        /// Second beam and end of the connection.
        second: (NodeIndex, End),
    },
    /// Returned when a beam fails while computing its internal forces.
    #[error("beam {beam:?} failed: {source}")]
    Beam {
        /// Beam being solved.
        beam: NodeIndex,
        /// Underlying beam error.
        #[source]
        source: BeamError,
    },
}

/// Error returned when reading an [`AnalysisConfig`](crate::AnalysisConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration is not valid JSON for the expected layout.
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when a field holds a value that makes no sense for the analysis.
    #[error("invalid configuration value for {field}: {value}")]
    Invalid {
        /// Name of the rejected field.
        field: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Error returned when saving or loading a structure model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Returned when the model cannot be encoded or decoded.
    #[error("invalid structure model: {0}")]
    Json(#[from] serde_json::Error),
    /// Returned when the embedded configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Returned when a stored beam has an invalid length or a load off the beam.
    #[error("beam {beam:?} in the model is invalid: {source}")]
    Beam {
        /// Offending beam.
        beam: NodeIndex,
        /// What is wrong with it.
        #[source]
        source: BeamError,
    },
}
