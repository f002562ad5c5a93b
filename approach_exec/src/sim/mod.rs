//! # Simulation module
//!
//! A kinematic holonomic base and a camera looking at a single fixed tag,
//! enough to close the loop around the approach without any hardware.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod base;
mod camera;
pub mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use base::*;
pub use camera::*;
pub use params::*;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while setting up the simulation.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Could not load the simulation parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Invalid simulation parameter {0}: {1}")]
    InvalidParam(&'static str, f64),

    #[error("Could not create the simulation archives: {0}")]
    ArchiveError(util::archive::ArchiveError),
}
