//! Parameters structure for the simulation

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

use super::SimError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    pub base: BaseParams,
    pub camera: CameraParams,
}

/// Simulated base parameters.
///
/// Demands of magnitude 1 drive the base at its maximum rates, larger demands
/// are clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseParams {
    /// Forward and strafe speed at a demand of 1.
    ///
    /// Units: meters/second
    pub max_speed_m_s: f64,

    /// Rotation rate at a demand of 1.
    ///
    /// Units: radians/second
    pub max_rot_rate_rad_s: f64,

    /// Starting position in the sim frame.
    ///
    /// Units: meters
    pub start_position_m: [f64; 2],

    /// Starting heading, anticlockwise from the sim frame's X axis.
    ///
    /// Units: degrees
    pub start_heading_deg: f64,
}

/// Simulated camera and tag parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraParams {
    /// Full horizontal field of view.
    ///
    /// Units: degrees
    pub hfov_deg: f64,

    /// Range beyond which the tag can't be detected.
    ///
    /// Units: meters
    pub max_range_m: f64,

    /// Apparent area of the tag at a range of one meter, the area falls off
    /// with the square of the range.
    ///
    /// Units: percent meters^2
    pub area_coeff_pct_m2: f64,

    /// Every `dropout_period`th capture yields no frame at all. Zero disables
    /// dropouts.
    #[serde(default)]
    pub dropout_period: u32,

    /// Identifier of the tag.
    pub tag_id: i32,

    /// Position of the tag in the sim frame.
    ///
    /// Units: meters
    pub tag_position_m: [f64; 2],

    /// Height of the tag centre above the camera.
    ///
    /// Units: meters
    #[serde(default)]
    pub tag_height_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    pub fn validate(&self) -> Result<(), SimError> {
        let positive = [
            ("base.max_speed_m_s", self.base.max_speed_m_s),
            ("base.max_rot_rate_rad_s", self.base.max_rot_rate_rad_s),
            ("camera.hfov_deg", self.camera.hfov_deg),
            ("camera.max_range_m", self.camera.max_range_m),
            ("camera.area_coeff_pct_m2", self.camera.area_coeff_pct_m2),
        ];

        for &(name, value) in positive.iter() {
            if !(value.is_finite() && value > 0.0) {
                return Err(SimError::InvalidParam(name, value))
            }
        }

        if self.camera.hfov_deg > 360.0 {
            return Err(SimError::InvalidParam("camera.hfov_deg", self.camera.hfov_deg))
        }

        Ok(())
    }
}
