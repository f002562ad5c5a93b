//! Simulated camera looking at a single fixed tag

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::Vector2;

use super::{CameraParams, SimBase};
use comms_if::eqpt::vision::{TargetDetection, VisionFrame};
use util::maths::wrap_180_deg;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Largest apparent area the tag can have.
const MAX_AREA_PCT: f64 = 100.0;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A camera mounted on the base's origin, looking along the base's heading.
#[derive(Debug, Clone)]
pub struct SimCamera {
    params: CameraParams,

    tag_position_m: Vector2<f64>,

    num_captures: u64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimCamera {
    pub fn new(params: CameraParams) -> Self {
        Self {
            params,
            tag_position_m: Vector2::new(params.tag_position_m[0], params.tag_position_m[1]),
            num_captures: 0,
        }
    }

    /// Capture the frames produced since the last capture.
    ///
    /// Normally this is a single frame, which is empty if the tag is out of
    /// view. On dropout cycles no frame is produced at all.
    pub fn capture(&mut self, base: &SimBase) -> Vec<VisionFrame> {
        self.num_captures += 1;

        let period = self.params.dropout_period as u64;
        if period > 0 && self.num_captures % period == 0 {
            return vec![];
        }

        let detections = self.detect(base).into_iter().collect();

        vec![VisionFrame::now(detections)]
    }

    /// Detect the tag from the base's current pose.
    pub fn detect(&self, base: &SimBase) -> Option<TargetDetection> {
        let rel_m = self.tag_position_m - base.position_m();
        let range_m = rel_m.norm();

        if range_m > self.params.max_range_m {
            return None;
        }

        // Bearing is anticlockwise positive, yaw is positive to the right
        let bearing_deg = rel_m.y.atan2(rel_m.x).to_degrees();
        let yaw_deg = -wrap_180_deg(bearing_deg - base.heading_rad().to_degrees());

        if yaw_deg.abs() > 0.5 * self.params.hfov_deg {
            return None;
        }

        let area_pct = (self.params.area_coeff_pct_m2 / (range_m * range_m)).min(MAX_AREA_PCT);
        let pitch_deg = self.params.tag_height_m.atan2(range_m).to_degrees();

        Some(TargetDetection {
            id: self.params.tag_id,
            yaw_deg,
            pitch_deg,
            area_pct,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::drive::DriveActuator;
    use crate::sim::params::test::ref_params;
    use comms_if::eqpt::drive::DriveDems;

    fn setup() -> (SimBase, SimCamera) {
        let p = ref_params();
        (SimBase::new(p.base), SimCamera::new(p.camera))
    }

    #[test]
    fn test_tag_to_the_left_has_negative_yaw() {
        let (base, cam) = setup();
        let det = cam.detect(&base).unwrap();

        let expected_yaw = -(0.3f64.atan2(4.0).to_degrees());
        assert_eq!(det.id, 4);
        assert!((det.yaw_deg - expected_yaw).abs() < 1e-9);
        assert!(det.yaw_deg < 0.0);
        assert!((det.area_pct - 80.0 / (16.0 + 0.09)).abs() < 1e-9);
    }

    #[test]
    fn test_tag_to_the_right_has_positive_yaw() {
        let mut p = ref_params();
        p.camera.tag_position_m = [4.0, -1.0];
        let base = SimBase::new(p.base);
        let cam = SimCamera::new(p.camera);

        let det = cam.detect(&base).unwrap();
        assert!((det.yaw_deg - 1f64.atan2(4.0).to_degrees()).abs() < 1e-9);

        // Outside the half field of view
        p.camera.tag_position_m = [3.0, -3.0];
        assert!(SimCamera::new(p.camera).detect(&base).is_none());
    }

    #[test]
    fn test_out_of_view() {
        // Behind the base
        let mut p = ref_params();
        p.camera.tag_position_m = [-4.0, 0.0];
        assert!(SimCamera::new(p.camera).detect(&SimBase::new(p.base)).is_none());

        // Too far
        let mut p = ref_params();
        p.camera.tag_position_m = [20.0, 0.0];
        assert!(SimCamera::new(p.camera).detect(&SimBase::new(p.base)).is_none());

        // Out of view frames are still produced, just empty
        let mut cam = SimCamera::new(p.camera);
        let frames = cam.capture(&SimBase::new(p.base));
        assert_eq!(frames.len(), 1);
        assert!(!frames[0].has_targets());
    }

    #[test]
    fn test_area_capped() {
        let mut p = ref_params();
        p.camera.tag_position_m = [0.1, 0.0];
        let det = SimCamera::new(p.camera).detect(&SimBase::new(p.base)).unwrap();
        assert_eq!(det.area_pct, 100.0);
    }

    #[test]
    fn test_yaw_follows_heading() {
        let (mut base, cam) = setup();
        let initial = cam.detect(&base).unwrap().yaw_deg;

        // Turning left towards the tag reduces the yaw error
        base.apply(DriveDems::new(0.0, 0.0, 0.1));
        for _ in 0..20 {
            base.step(0.02);
        }

        let turned = cam.detect(&base).unwrap().yaw_deg;
        assert!(turned > initial);
    }

    #[test]
    fn test_dropout() {
        let mut p = ref_params();
        p.camera.dropout_period = 3;
        let base = SimBase::new(p.base);
        let mut cam = SimCamera::new(p.camera);

        let counts: Vec<usize> = (0..6).map(|_| cam.capture(&base).len()).collect();
        assert_eq!(counts, vec![1, 1, 0, 1, 1, 0]);
    }
}
