//! # Vision Equipment Data
//!
//! Frames produced by the vision pipeline and the per-cycle target observation
//! derived from them.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A single fiducial target detected in a camera frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetDetection {
    /// Identifier of the fiducial.
    pub id: i32,

    /// Horizontal angle from the camera boresight to the target.
    ///
    /// Positive values mean the target is to the right.
    ///
    /// Units: degrees
    pub yaw_deg: f64,

    /// Vertical angle from the camera boresight to the target.
    ///
    /// Positive values mean the target is above the boresight.
    ///
    /// Units: degrees
    pub pitch_deg: f64,

    /// Apparent area of the target as a percentage of the image (0 to 100).
    /// Larger values mean the target is closer.
    ///
    /// Units: percent
    pub area_pct: f64,
}

/// The result of processing one camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisionFrame {
    /// Time at which the frame was captured.
    pub timestamp: DateTime<Utc>,

    /// All targets detected in the frame, in no particular order.
    pub detections: Vec<TargetDetection>,
}

/// The target chosen for this cycle, with the quantities the approach needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetFix {
    /// Identifier of the target. Informational only.
    pub id: i32,

    /// Signed horizontal bearing to the target, positive to the right of the
    /// boresight.
    ///
    /// Units: degrees
    pub yaw_error_deg: f64,

    /// Apparent area of the target.
    ///
    /// Units: percent of the field of view
    pub area_pct: f64,
}

/// A snapshot of the target as seen on one cycle.
///
/// When no target is visible there is no fix, so there are no yaw or area
/// values that could be read by mistake.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TargetObservation {
    pub target: Option<TargetFix>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl VisionFrame {
    /// Create a new frame captured now.
    pub fn now(detections: Vec<TargetDetection>) -> Self {
        Self {
            timestamp: Utc::now(),
            detections,
        }
    }

    /// Return true if at least one target was detected in this frame.
    pub fn has_targets(&self) -> bool {
        !self.detections.is_empty()
    }

    /// Get the best target in the frame, the one with the largest apparent
    /// area (i.e. the closest).
    pub fn best_target(&self) -> Option<&TargetDetection> {
        self.detections
            .iter()
            .fold(None, |best: Option<&TargetDetection>, d| match best {
                Some(b) if b.area_pct >= d.area_pct => Some(b),
                _ => Some(d),
            })
    }
}

impl TargetObservation {
    /// An observation in which no target is visible.
    pub fn no_target() -> Self {
        Self { target: None }
    }

    /// An observation of a visible target.
    pub fn new(id: i32, yaw_error_deg: f64, area_pct: f64) -> Self {
        Self {
            target: Some(TargetFix {
                id,
                yaw_error_deg,
                area_pct,
            }),
        }
    }

    /// Return true if a target is visible.
    pub fn has_target(&self) -> bool {
        self.target.is_some()
    }
}

impl From<&TargetDetection> for TargetFix {
    fn from(d: &TargetDetection) -> Self {
        Self {
            id: d.id,
            yaw_error_deg: d.yaw_deg,
            area_pct: d.area_pct,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn detection(id: i32, area_pct: f64) -> TargetDetection {
        TargetDetection {
            id,
            yaw_deg: 1.0,
            pitch_deg: 0.0,
            area_pct,
        }
    }

    #[test]
    fn test_best_target_is_largest() {
        let frame = VisionFrame::now(vec![detection(1, 2.0), detection(7, 9.5), detection(3, 4.0)]);

        assert!(frame.has_targets());
        assert_eq!(frame.best_target().map(|d| d.id), Some(7));
    }

    #[test]
    fn test_best_target_tie_keeps_first() {
        let frame = VisionFrame::now(vec![detection(4, 3.0), detection(5, 3.0)]);

        assert_eq!(frame.best_target().map(|d| d.id), Some(4));
    }

    #[test]
    fn test_empty_frame() {
        let frame = VisionFrame::now(vec![]);

        assert!(!frame.has_targets());
        assert!(frame.best_target().is_none());
    }

    #[test]
    fn test_observation() {
        assert!(!TargetObservation::default().has_target());
        assert_eq!(TargetObservation::default(), TargetObservation::no_target());

        let obs = TargetObservation::new(3, -4.0, 12.0);
        assert!(obs.has_target());
        assert_eq!(
            obs.target,
            Some(TargetFix { id: 3, yaw_error_deg: -4.0, area_pct: 12.0 })
        );
    }
}
