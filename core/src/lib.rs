// core holds the lattice, aggregation walk and height-field algorithms
use std::fmt;

pub mod heightfield;
pub mod lattice;
pub mod point;
pub mod simulation;
pub mod utils;
pub mod walk;

pub use heightfield::HeightField2D;
pub use lattice::DlaLattice;
pub use point::{LatticePoint, PointId};
pub use simulation::DlaSimulation;
pub use utils::{flatten2, normalize_sqrt2};
pub use walk::{Attachment, WalkConfig, attach_particle};

// Errors raised by the validated constructors. All other failure modes
// (unbounded walks, degenerate fields) are accepted behavior, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlaError {
    InvalidArgument(&'static str),
}

impl fmt::Display for DlaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DlaError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for DlaError {}
