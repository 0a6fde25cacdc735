#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_doc_code_examples)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

pub mod algebra;
mod beam;
mod config;
mod errors;
mod geometry;
mod loads;
mod polynomial;
mod structure;
mod support;
pub mod trig;

pub use beam::{Beam, End, StressDiagram, StressKind, StressSegment};
pub use config::{AnalysisConfig, UnitConfig};
pub use errors::{
    AlgebraError, AnalysisError, BeamError, ConfigError, ModelError, StructureEditError,
};
pub use geometry::{load, point, Vector3};
pub use loads::{AppliedLoad, AppliedMoment, Concentrated, Distributed, Load, Moment};
pub use polynomial::Polynomial;
pub use structure::{BeamId, BeamSolution, PlacedBeam, Structure};
pub use support::{ReactionComponent, Support, SupportKind};
