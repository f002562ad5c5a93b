//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::{eqpt::drive::DriveDems, tc::approach::ApproachCmd};
use log::{info, warn};
use util::archive::{ArchiveError, Archived, Archiver};

use crate::{
    approach_mgr::{ApproachMgr, ApproachStatus},
    drive::DriveActuator,
    sim::{SimBase, SimCamera},
    vision::VisionMonitor,
};

// ---------------------------------------------------------------------------
// ENUMS
// ---------------------------------------------------------------------------

/// Gives the reason the exec has been put into safe mode
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum SafeModeCause {
    MakeSafeTc,
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u64,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Session elapsed time at the start of the cycle
    pub sim_time_s: f64,

    // Safe mode variables
    /// Determines if the exec is in safe mode.
    pub safe: bool,

    /// Gives the reason for the exec being in safe mode.
    pub safe_cause: Option<SafeModeCause>,

    // Approach
    /// Approach command received this cycle, consumed by `proc_approach`
    pub approach_cmd: Option<ApproachCmd>,

    pub approach_mgr: ApproachMgr,

    pub approach_status: ApproachStatus,

    /// Set once an approach has completed
    pub approach_completed: bool,

    // Equipment
    pub vision: VisionMonitor,

    pub sim_base: SimBase,

    pub sim_camera: SimCamera,

    arch_sim_base: Archiver,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    pub fn new(
        approach_mgr: ApproachMgr,
        vision: VisionMonitor,
        sim_base: SimBase,
        sim_camera: SimCamera,
    ) -> Self {
        Self {
            num_cycles: 0,
            is_1_hz_cycle: false,
            sim_time_s: 0.0,
            safe: false,
            safe_cause: None,
            approach_cmd: None,
            approach_mgr,
            approach_status: ApproachStatus::Inactive,
            approach_completed: false,
            vision,
            sim_base,
            sim_camera,
            arch_sim_base: Archiver::default(),
            num_consec_cycle_overruns: 0,
        }
    }

    /// Set the archiver used for the simulated base.
    pub fn set_sim_base_archiver(&mut self, archiver: Archiver) {
        self.arch_sim_base = archiver;
    }

    /// Puts the exec into safe mode with the given cause, aborting any
    /// running approach.
    pub fn make_safe(&mut self, cause: SafeModeCause) {
        if !self.safe {
            warn!("Make safe requested, cause: {:?}", cause);

            self.safe = true;
            self.safe_cause = Some(cause);

            // Stop the base
            self.approach_cmd = None;
            self.approach_mgr.abort(&mut self.sim_base);
            self.sim_base.apply(DriveDems::ZERO);
        }
    }

    /// Attempts to disable the safe mode by clearing the given cause.
    ///
    /// Returns `Ok(())` if this cause was cleared and safe mode was disabled, or `Err(())`
    /// otherwise. To remove safe mode the provided cause must match the initial reason for safe
    /// mode being enabled.
    ///
    /// If safe mode was not enabled `Ok(())` is returned
    pub fn make_unsafe(&mut self, cause: SafeModeCause) -> Result<(), ()> {
        if !self.safe {
            return Ok(());
        }

        match self.safe_cause {
            Some(root_cause) if cause != root_cause => Err(()),
            _ => {
                self.safe = false;
                self.safe_cause = None;

                info!("Make unsafe requested, root cause match, safe mode disabled");

                Ok(())
            }
        }
    }

    /// Perform actions required at the start of a cycle.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        let cycles_per_s = (cycle_frequency_hz.round() as u64).max(1);
        self.is_1_hz_cycle = self.num_cycles % cycles_per_s == 0;

        self.sim_time_s = util::session::get_elapsed_seconds();
    }

    /// Acquire the new camera frames and update the vision monitor with them.
    pub fn proc_vision(&mut self) {
        let frames = self.sim_camera.capture(&self.sim_base);
        self.vision.update(frames);
    }

    /// Execute any pending approach command, then step the approach.
    pub fn proc_approach(&mut self) -> ApproachStatus {
        match self.approach_cmd.take() {
            Some(ApproachCmd::Start) if self.safe => {
                warn!("Cannot start the approach in safe mode")
            },
            Some(ApproachCmd::Start) => self.approach_mgr.start(),
            Some(ApproachCmd::Abort) => self.approach_mgr.abort(&mut self.sim_base),
            None => ()
        }

        self.approach_status = self.approach_mgr.step(&self.vision, &mut self.sim_base);

        if self.approach_status == ApproachStatus::Completed {
            self.approach_completed = true;
        }

        self.approach_status
    }

    /// Stop everything, used on every exit path of the exec.
    pub fn shutdown(&mut self) {
        self.approach_mgr.abort(&mut self.sim_base);
        self.sim_base.apply(DriveDems::ZERO);
    }
}

impl Archived for DataStore {
    fn write(&mut self) -> Result<(), ArchiveError> {
        self.approach_mgr.ctrl_mut().write()?;
        self.vision.write()?;
        self.arch_sim_base.serialise(self.sim_base.report())?;

        Ok(())
    }
}
