//! Simulated holonomic base

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::warn;
use nalgebra::{Rotation2, Vector2};
use serde::Serialize;

// Internal
use super::BaseParams;
use crate::drive::DriveActuator;
use comms_if::eqpt::drive::DriveDems;
use util::maths::{clamp_sym, wrap_180_deg, wrap_pi};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A kinematic holonomic base. The applied demand is held until the next one
/// and integrated over each call to `step`.
#[derive(Debug, Clone)]
pub struct SimBase {
    params: BaseParams,

    /// Position in the sim frame
    position_m: Vector2<f64>,

    /// Heading anticlockwise from the sim frame X axis, in `[-pi, pi)`
    heading_rad: f64,

    dems: DriveDems,
}

/// Flat snapshot of the base, for archiving.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct SimBaseReport {
    pub x_m: f64,
    pub y_m: f64,
    pub heading_deg: f64,
    pub forward_dem: f64,
    pub strafe_dem: f64,
    pub rotation_dem: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimBase {
    /// Create a new base at rest at its configured starting pose.
    pub fn new(params: BaseParams) -> Self {
        Self {
            params,
            position_m: Vector2::new(params.start_position_m[0], params.start_position_m[1]),
            heading_rad: wrap_180_deg(params.start_heading_deg).to_radians(),
            dems: DriveDems::ZERO,
        }
    }

    /// Advance the base by `dt_s` seconds under the current demand.
    pub fn step(&mut self, dt_s: f64) {
        let speed = self.params.max_speed_m_s;
        let rate = self.params.max_rot_rate_rad_s;

        let vel_m_s_body = Vector2::new(
            clamp_sym(self.dems.forward, 1.0) * speed,
            clamp_sym(self.dems.strafe, 1.0) * speed
        );
        let rot_rate_rad_s = clamp_sym(self.dems.rotation, 1.0) * rate;

        // Rotate the body velocity by the mid-step heading so that combined
        // driving and turning follows an arc.
        let mid_heading_rad = self.heading_rad + 0.5 * rot_rate_rad_s * dt_s;
        let vel_m_s = Rotation2::new(mid_heading_rad) * vel_m_s_body;

        self.position_m += vel_m_s * dt_s;
        self.heading_rad = wrap_pi(self.heading_rad + rot_rate_rad_s * dt_s);
    }

    pub fn position_m(&self) -> Vector2<f64> {
        self.position_m
    }

    pub fn heading_rad(&self) -> f64 {
        self.heading_rad
    }

    /// The demand currently being executed.
    pub fn dems(&self) -> DriveDems {
        self.dems
    }

    pub fn report(&self) -> SimBaseReport {
        SimBaseReport {
            x_m: self.position_m.x,
            y_m: self.position_m.y,
            heading_deg: self.heading_rad.to_degrees(),
            forward_dem: self.dems.forward,
            strafe_dem: self.dems.strafe,
            rotation_dem: self.dems.rotation,
        }
    }
}

impl DriveActuator for SimBase {
    fn apply(&mut self, dems: DriveDems) {
        if dems.is_finite() {
            self.dems = dems;
        }
        else {
            warn!("SimBase rejected non-finite demand {:?}, stopping", dems);
            self.dems = DriveDems::ZERO;
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::sim::params::test::ref_params;

    const DT: f64 = 0.02;

    fn run(base: &mut SimBase, seconds: f64) {
        let steps = (seconds / DT).round() as usize;
        for _ in 0..steps {
            base.step(DT);
        }
    }

    #[test]
    fn test_starts_at_rest() {
        let mut base = SimBase::new(ref_params().base);
        run(&mut base, 1.0);

        assert_eq!(base.position_m(), Vector2::new(0.0, 0.0));
        assert_eq!(base.heading_rad(), 0.0);
    }

    #[test]
    fn test_drive_forward() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(1.0, 0.0, 0.0));
        run(&mut base, 2.0);

        assert!((base.position_m().x - 1.0).abs() < 1e-9);
        assert!(base.position_m().y.abs() < 1e-9);
    }

    #[test]
    fn test_demand_clamped() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(5.0, 0.0, 0.0));
        run(&mut base, 2.0);

        assert!((base.position_m().x - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_strafe_left_and_rotate_anticlockwise() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(0.0, 1.0, 0.0));
        run(&mut base, 2.0);
        assert!((base.position_m().y - 1.0).abs() < 1e-9);

        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(0.0, 0.0, 0.5));
        run(&mut base, 1.0);
        assert!((base.heading_rad() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_heading_wraps() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(0.0, 0.0, 1.0));
        run(&mut base, 4.0);

        // 4 rad anticlockwise is 4 - 2 pi
        let expected = 4.0 - 2.0 * std::f64::consts::PI;
        assert!((base.heading_rad() - expected).abs() < 1e-6);
    }

    #[test]
    fn test_zero_holds_position() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(1.0, 0.0, 0.2));
        run(&mut base, 1.0);
        base.apply(DriveDems::ZERO);

        let pos = base.position_m();
        let head = base.heading_rad();
        run(&mut base, 5.0);

        assert_eq!(base.position_m(), pos);
        assert_eq!(base.heading_rad(), head);
    }

    #[test]
    fn test_non_finite_demand_stops() {
        let mut base = SimBase::new(ref_params().base);
        base.apply(DriveDems::new(1.0, 0.0, 0.0));
        base.apply(DriveDems::new(std::f64::NAN, 0.0, 0.0));
        assert!(base.dems().is_zero());
    }
}
