//! # Vision module
//!
//! Provides the target observations the approach is driven by. The
//! `TargetSensor` trait is what the approach reads, `VisionMonitor` implements
//! it on top of the frames coming out of the camera pipeline and tracks
//! whether the camera is still delivering.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

use comms_if::eqpt::vision::TargetObservation;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A source of target observations.
///
/// All queries are side-effect free, and the yaw, area and id values are only
/// meaningful while `has_target` is true.
pub trait TargetSensor {
    /// True if a target is currently visible.
    fn has_target(&self) -> bool;

    /// Yaw to the target, positive to the right. Units: degrees
    fn yaw_error_deg(&self) -> f64;

    /// Apparent area of the target. Units: percent of the image
    fn area_pct(&self) -> f64;

    /// Identifier of the target, `-1` if there isn't one.
    fn target_id(&self) -> i32;

    /// Take a snapshot of the sensor for one control cycle.
    fn observation(&self) -> TargetObservation {
        if self.has_target() {
            TargetObservation::new(
                self.target_id(),
                self.yaw_error_deg(),
                self.area_pct()
            )
        }
        else {
            TargetObservation::no_target()
        }
    }
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur while setting up the vision monitor.
#[derive(Debug, thiserror::Error)]
pub enum VisionError {
    #[error("Could not load the vision parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Could not create the vision archives: {0}")]
    ArchiveError(util::archive::ArchiveError),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

/// A fixed observation acts as a sensor which always sees the same thing.
impl TargetSensor for TargetObservation {
    fn has_target(&self) -> bool {
        self.target.is_some()
    }

    fn yaw_error_deg(&self) -> f64 {
        self.target.map(|t| t.yaw_error_deg).unwrap_or(0.0)
    }

    fn area_pct(&self) -> f64 {
        self.target.map(|t| t.area_pct).unwrap_or(0.0)
    }

    fn target_id(&self) -> i32 {
        self.target.map(|t| t.id).unwrap_or(-1)
    }

    fn observation(&self) -> TargetObservation {
        *self
    }
}
