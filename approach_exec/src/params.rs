//! # Approach Executable Parameters
//!
//! This module provide parameters for the approach executable.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ApproachExecParams {
    /// Target period of one cycle, the controller gains are tuned for this
    /// period.
    ///
    /// Units: seconds
    #[serde(default = "default_cycle_period_s")]
    pub cycle_period_s: f64,

    /// The exec stops after running this long, whatever state the approach
    /// is in.
    ///
    /// Units: seconds
    pub max_duration_s: f64,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApproachExecParamsError {
    #[error("The cycle period must be a positive number of seconds, found {0}")]
    InvalidCyclePeriod(f64),

    #[error("The maximum duration must be a positive number of seconds, found {0}")]
    InvalidMaxDuration(f64),
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl ApproachExecParams {
    pub fn validate(&self) -> Result<(), ApproachExecParamsError> {
        if !(self.cycle_period_s.is_finite() && self.cycle_period_s > 0.0) {
            return Err(ApproachExecParamsError::InvalidCyclePeriod(self.cycle_period_s))
        }
        if !(self.max_duration_s.is_finite() && self.max_duration_s > 0.0) {
            return Err(ApproachExecParamsError::InvalidMaxDuration(self.max_duration_s))
        }

        Ok(())
    }

    /// Number of cycles per second.
    pub fn cycle_frequency_hz(&self) -> f64 {
        1.0 / self.cycle_period_s
    }
}

/// 50 Hz
fn default_cycle_period_s() -> f64 {
    0.02
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_period() {
        let p: ApproachExecParams = util::params::from_str("max_duration_s = 30.0").unwrap();

        assert_eq!(p.cycle_period_s, 0.02);
        assert_eq!(p.cycle_frequency_hz(), 50.0);
        assert_eq!(p.validate(), Ok(()));
    }

    #[test]
    fn test_validate() {
        let p = ApproachExecParams { cycle_period_s: 0.0, max_duration_s: 30.0 };
        assert_eq!(p.validate(), Err(ApproachExecParamsError::InvalidCyclePeriod(0.0)));

        let p = ApproachExecParams { cycle_period_s: 0.02, max_duration_s: -1.0 };
        assert_eq!(p.validate(), Err(ApproachExecParamsError::InvalidMaxDuration(-1.0)));
    }
}
