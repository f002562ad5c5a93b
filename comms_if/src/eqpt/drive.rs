//! # Drive Equipment Demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Velocity demands for a holonomic drive base.
///
/// All quantities are in the base's native velocity units. Forward and strafe
/// are expressed in the base body frame, rotation follows the right hand rule
/// about the base's Z+ (upwards) axis, so positive rotation turns the base to
/// the left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriveDems {
    /// Speed along the base's forward axis. Positive is forwards.
    pub forward: f64,

    /// Speed along the base's lateral axis. Positive is to the left.
    pub strafe: f64,

    /// Rotation rate about the base's vertical axis. Positive is to the left.
    pub rotation: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl DriveDems {
    /// The zero demand, which holds the base at rest.
    pub const ZERO: DriveDems = DriveDems {
        forward: 0.0,
        strafe: 0.0,
        rotation: 0.0,
    };

    /// Create a new demand.
    pub fn new(forward: f64, strafe: f64, rotation: f64) -> Self {
        Self {
            forward,
            strafe,
            rotation,
        }
    }

    /// Return true if this demand holds the base at rest.
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.strafe == 0.0 && self.rotation == 0.0
    }

    /// Return true if all components are finite.
    pub fn is_finite(&self) -> bool {
        self.forward.is_finite() && self.strafe.is_finite() && self.rotation.is_finite()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_zero() {
        assert!(DriveDems::ZERO.is_zero());
        assert!(DriveDems::default().is_zero());
        assert!(DriveDems::new(-0.0, 0.0, -0.0).is_zero());
        assert!(!DriveDems::new(0.0, 0.0, 0.1).is_zero());
    }

    #[test]
    fn test_finite() {
        assert!(DriveDems::new(1.0, 0.0, -1.0).is_finite());
        assert!(!DriveDems::new(std::f64::NAN, 0.0, 0.0).is_finite());
        assert!(!DriveDems::new(0.0, 0.0, std::f64::INFINITY).is_finite());
    }
}
