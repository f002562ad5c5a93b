//! Parameters structure for ApproachCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the vision-guided approach controller.
///
/// Gains are tuned for the cycle period the controller is run at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {

    // ---- GAINS ----

    /// Rotation controller proportional gain.
    ///
    /// Units: rotation demand units / degree
    pub rot_k_p: f64,

    /// Drive controller proportional gain.
    ///
    /// Units: drive demand units / percent
    pub drive_k_p: f64,

    // ---- TOLERANCES ----

    /// Yaw error below which the base is considered aligned. Inside this
    /// band no minimum rotation demand is enforced.
    ///
    /// Units: degrees
    pub angle_tol_deg: f64,

    /// Area error below which the base is considered at the target distance.
    /// Inside this band no minimum drive demand is enforced.
    ///
    /// Units: percent
    pub area_tol_pct: f64,

    // ---- DEMAND LIMITS ----

    /// Smallest rotation demand that will actually turn the base.
    pub min_rot_dem: f64,

    /// Largest allowed rotation demand magnitude.
    pub max_rot_dem: f64,

    /// Smallest drive demand that will actually move the base.
    pub min_drive_dem: f64,

    /// Largest allowed drive demand magnitude.
    pub max_drive_dem: f64,

    // ---- SEQUENCING ----

    /// Yaw error above which no forward motion is commanded, so that the base
    /// rotates into alignment before it approaches.
    ///
    /// Units: degrees
    pub max_yaw_error_for_drive_deg: f64,

    /// Apparent target area at which the base has arrived.
    ///
    /// Units: percent
    pub target_area_pct: f64,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Reasons a parameter set is rejected.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("Parameter {0} must be finite, found {1}")]
    NotFinite(&'static str, f64),

    #[error("Parameter {0} must not be negative, found {1}")]
    Negative(&'static str, f64),

    #[error("Parameter {0} must be greater than zero, found {1}")]
    NotPositive(&'static str, f64),

    #[error("Minimum {name} demand ({min}) is greater than the maximum ({max})")]
    MinAboveMax {
        name: &'static str,
        min: f64,
        max: f64
    },

    #[error("Target area must be between 0 and 100 %, found {0}")]
    TargetAreaOutOfRange(f64),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {

    /// Check that the parameters describe a usable controller.
    ///
    /// This is performed once when the parameters are loaded, the control law
    /// itself assumes valid parameters.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let all = [
            ("rot_k_p", self.rot_k_p),
            ("drive_k_p", self.drive_k_p),
            ("angle_tol_deg", self.angle_tol_deg),
            ("area_tol_pct", self.area_tol_pct),
            ("min_rot_dem", self.min_rot_dem),
            ("max_rot_dem", self.max_rot_dem),
            ("min_drive_dem", self.min_drive_dem),
            ("max_drive_dem", self.max_drive_dem),
            ("max_yaw_error_for_drive_deg", self.max_yaw_error_for_drive_deg),
            ("target_area_pct", self.target_area_pct),
        ];

        for &(name, value) in all.iter() {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite(name, value))
            }
            if value < 0.0 {
                return Err(ParamsError::Negative(name, value))
            }
        }

        if self.max_rot_dem <= 0.0 {
            return Err(ParamsError::NotPositive("max_rot_dem", self.max_rot_dem))
        }
        if self.max_drive_dem <= 0.0 {
            return Err(ParamsError::NotPositive("max_drive_dem", self.max_drive_dem))
        }

        if self.min_rot_dem > self.max_rot_dem {
            return Err(ParamsError::MinAboveMax {
                name: "rotation",
                min: self.min_rot_dem,
                max: self.max_rot_dem
            })
        }
        if self.min_drive_dem > self.max_drive_dem {
            return Err(ParamsError::MinAboveMax {
                name: "drive",
                min: self.min_drive_dem,
                max: self.max_drive_dem
            })
        }

        if self.target_area_pct > 100.0 {
            return Err(ParamsError::TargetAreaOutOfRange(self.target_area_pct))
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// The reference tuning used throughout the tests.
    pub(crate) fn ref_params() -> Params {
        Params {
            rot_k_p: 0.05,
            drive_k_p: 0.1,
            angle_tol_deg: 2.0,
            area_tol_pct: 2.0,
            min_rot_dem: 0.05,
            max_rot_dem: 1.0,
            min_drive_dem: 0.05,
            max_drive_dem: 1.0,
            max_yaw_error_for_drive_deg: 5.0,
            target_area_pct: 20.0,
        }
    }

    #[test]
    fn test_ref_params_valid() {
        assert_eq!(ref_params().validate(), Ok(()));
    }

    #[test]
    fn test_params_from_toml() {
        let p: Params = util::params::from_str(
            "
            rot_k_p = 0.05
            drive_k_p = 0.1
            angle_tol_deg = 2.0
            area_tol_pct = 2.0
            min_rot_dem = 0.05
            max_rot_dem = 1.0
            min_drive_dem = 0.05
            max_drive_dem = 1.0
            max_yaw_error_for_drive_deg = 5.0
            target_area_pct = 20.0
            "
        ).unwrap();

        assert_eq!(p, ref_params());
    }

    #[test]
    fn test_shipped_params() {
        let p: Params = util::params::load_from_path(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../params/approach_ctrl.toml")
        ).unwrap();

        assert_eq!(p, ref_params());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let mut p = ref_params();
        p.min_rot_dem = 1.5;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::MinAboveMax { name: "rotation", .. })
        ));

        let mut p = ref_params();
        p.min_drive_dem = 2.0;
        assert!(matches!(
            p.validate(),
            Err(ParamsError::MinAboveMax { name: "drive", .. })
        ));
    }

    #[test]
    fn test_bad_values_rejected() {
        let mut p = ref_params();
        p.rot_k_p = std::f64::NAN;
        assert!(matches!(p.validate(), Err(ParamsError::NotFinite("rot_k_p", _))));

        let mut p = ref_params();
        p.area_tol_pct = -1.0;
        assert_eq!(p.validate(), Err(ParamsError::Negative("area_tol_pct", -1.0)));

        let mut p = ref_params();
        p.max_drive_dem = 0.0;
        p.min_drive_dem = 0.0;
        assert_eq!(p.validate(), Err(ParamsError::NotPositive("max_drive_dem", 0.0)));

        let mut p = ref_params();
        p.target_area_pct = 120.0;
        assert_eq!(p.validate(), Err(ParamsError::TargetAreaOutOfRange(120.0)));
    }
}
