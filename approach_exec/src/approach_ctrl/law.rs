//! # Approach control law
//!
//! Two independent proportional controllers, one on the yaw error producing
//! the rotation demand and one on the area error producing the drive demand.
//!
//! Each controller has a dead-band (its tolerance) and a floor. Outside the
//! dead-band a demand smaller than the floor is raised to the floor, as
//! smaller demands don't overcome the base's static friction and the base
//! would stall short of the target. Inside the dead-band the raw proportional
//! demand is passed through, so the base doesn't chatter about the target.
//!
//! The drive controller is additionally gated on the yaw error: while the
//! base is badly misaligned it only rotates, otherwise it would drive past the
//! target laterally.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::vision::TargetFix;
use util::maths::{clamp_sym, floor_magn};

use super::{Params, StatusReport};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Calculate the rotation demand for the given yaw error.
pub fn calc_rot_dem(
    yaw_error_deg: f64,
    params: &Params,
    report: &mut StatusReport
) -> f64 {
    // A positive yaw error (target to the right) needs a negative (rightwards)
    // rotation.
    let mut rot_dem = -yaw_error_deg * params.rot_k_p;

    if yaw_error_deg.abs() > params.angle_tol_deg {
        let floored = floor_magn(rot_dem, params.min_rot_dem);
        report.rot_floor_applied = floored != rot_dem;
        rot_dem = floored;
    }

    let limited = clamp_sym(rot_dem, params.max_rot_dem);
    report.rot_limited = limited != rot_dem;

    limited
}

/// Calculate the drive demand for the given yaw error and apparent area.
pub fn calc_drive_dem(
    yaw_error_deg: f64,
    area_pct: f64,
    params: &Params,
    report: &mut StatusReport
) -> f64 {
    // Positive area error means the target looks too small, i.e. we're too far
    // away and need to drive forwards.
    let area_error_pct = params.target_area_pct - area_pct;
    report.area_error_pct = area_error_pct;

    let mut drive_dem = area_error_pct * params.drive_k_p;

    // Rotate first, then drive
    if yaw_error_deg.abs() > params.max_yaw_error_for_drive_deg {
        drive_dem = 0.0;
        report.drive_gated = true;
    }
    else if area_error_pct.abs() > params.area_tol_pct {
        let floored = floor_magn(drive_dem, params.min_drive_dem);
        report.drive_floor_applied = floored != drive_dem;
        drive_dem = floored;
    }

    let limited = clamp_sym(drive_dem, params.max_drive_dem);
    report.drive_limited = limited != drive_dem;

    limited
}

/// Determine if the base has arrived at the target, i.e. it is both aligned
/// and at the target distance.
pub fn at_target(fix: &TargetFix, params: &Params) -> bool {
    let yaw_ok = fix.yaw_error_deg.abs() < params.angle_tol_deg;
    let area_ok = (params.target_area_pct - fix.area_pct).abs() < params.area_tol_pct;

    yaw_ok && area_ok
}
