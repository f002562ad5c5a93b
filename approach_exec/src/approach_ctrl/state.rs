//! Approach control module state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{info, trace, warn};
use serde::Serialize;

// Internal
use super::{law, ApproachCtrlError, Params};
use crate::drive::DriveActuator;
use comms_if::eqpt::{
    drive::DriveDems,
    vision::{TargetFix, TargetObservation}
};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    params,
    session::Session
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The approach controller.
pub struct ApproachCtrl {
    params: Params,

    /// True between `on_start` and `on_end`.
    active: bool,

    report: StatusReport,

    /// The last demand produced by `on_tick`, kept for monitoring only.
    output: Option<DriveDems>,

    arch_report: Archiver,
    arch_output: Archiver,
}

/// The status report containing the control errors and the flags raised by
/// the last tick.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct StatusReport {
    /// Set when there was no usable target on this tick.
    pub no_target: bool,

    /// Identifier of the target being approached, if any.
    pub target_id: Option<i32>,

    /// The yaw error to the target
    pub yaw_error_deg: f64,

    /// Target area minus observed area
    pub area_error_pct: f64,

    /// The rotation demand was raised to the minimum rotation demand
    pub rot_floor_applied: bool,

    /// The rotation demand was clamped to the maximum rotation demand
    pub rot_limited: bool,

    /// Forward motion was suppressed because the yaw error is too large
    pub drive_gated: bool,

    /// The drive demand was raised to the minimum drive demand
    pub drive_floor_applied: bool,

    /// The drive demand was clamped to the maximum drive demand
    pub drive_limited: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ApproachCtrl {
    /// Create a new controller from a set of parameters.
    ///
    /// The parameters are validated, the controller doesn't archive anything.
    pub fn new(params: Params) -> Result<Self, ApproachCtrlError> {
        params.validate().map_err(ApproachCtrlError::InvalidParams)?;

        Ok(Self {
            params,
            active: false,
            report: StatusReport::default(),
            output: None,
            arch_report: Archiver::default(),
            arch_output: Archiver::default(),
        })
    }

    /// Initialise the ApproachCtrl module.
    ///
    /// Loads the parameters from the given path (relative to the params
    /// directory) and opens the archives inside the session.
    pub fn init(params_path: &str, session: &Session) -> Result<Self, ApproachCtrlError> {
        let params: Params = params::load(params_path)
            .map_err(ApproachCtrlError::ParamLoadError)?;

        let mut ctrl = Self::new(params)?;

        ctrl.arch_report = Archiver::from_path(session, "approach_ctrl/status_report.csv")
            .map_err(ApproachCtrlError::ArchiveError)?;
        ctrl.arch_output = Archiver::from_path(session, "approach_ctrl/output.csv")
            .map_err(ApproachCtrlError::ArchiveError)?;

        Ok(ctrl)
    }

    /// Prepare for a new approach run.
    pub fn on_start(&mut self) {
        self.output = None;
        self.report = StatusReport::default();
        self.active = true;

        info!("ApproachCtrl started");
    }

    /// Calculate the drive demands for this tick.
    ///
    /// With no target the zero demand is returned, the base never moves
    /// without something to move towards.
    pub fn on_tick(&mut self, observation: &TargetObservation) -> DriveDems {
        self.report = StatusReport::default();

        let dems = match usable_fix(observation) {
            Some(fix) => {
                self.report.target_id = Some(fix.id);
                self.report.yaw_error_deg = fix.yaw_error_deg;

                let rotation = law::calc_rot_dem(
                    fix.yaw_error_deg,
                    &self.params,
                    &mut self.report
                );
                let forward = law::calc_drive_dem(
                    fix.yaw_error_deg,
                    fix.area_pct,
                    &self.params,
                    &mut self.report
                );

                DriveDems::new(forward, 0.0, rotation)
            },
            None => {
                self.report.no_target = true;
                DriveDems::ZERO
            }
        };

        self.output = Some(dems);

        trace!("ApproachCtrl output: {:?}, report: {:?}", dems, self.report);

        dems
    }

    /// Determine whether the approach has finished, i.e. the base is aligned
    /// with the target and at the target distance.
    ///
    /// Without a target the approach is never complete.
    pub fn is_complete(&self, observation: &TargetObservation) -> bool {
        match usable_fix(observation) {
            Some(fix) => law::at_target(&fix, &self.params),
            None => false
        }
    }

    /// Finish the approach run, bringing the base to rest.
    ///
    /// The zero demand is applied whether or not the run was interrupted.
    pub fn on_end<A>(&mut self, interrupted: bool, actuator: &mut A)
    where
        A: DriveActuator + ?Sized
    {
        actuator.apply(DriveDems::ZERO);

        self.output = None;
        self.active = false;

        if interrupted {
            info!("ApproachCtrl interrupted, base stopped");
        }
        else {
            info!("ApproachCtrl finished, base stopped");
        }
    }

    /// Get the parameters in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// True between `on_start` and `on_end`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the status report from the last tick.
    pub fn report(&self) -> &StatusReport {
        &self.report
    }

    /// Get the demand produced by the last tick, if one has been produced
    /// since the run started.
    pub fn last_output(&self) -> Option<DriveDems> {
        self.output
    }
}

impl Archived for ApproachCtrl {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.arch_report.serialise(self.report)?;
        self.arch_output.serialise(self.output.unwrap_or_default())?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the target fix from the observation, rejecting fixes holding
/// non-finite values so that they can't propagate into the demands.
fn usable_fix(observation: &TargetObservation) -> Option<TargetFix> {
    match observation.target {
        Some(fix) if fix.yaw_error_deg.is_finite() && fix.area_pct.is_finite() => Some(fix),
        Some(fix) => {
            warn!("Ignoring target {} with non-finite values: {:?}", fix.id, fix);
            None
        },
        None => None
    }
}
