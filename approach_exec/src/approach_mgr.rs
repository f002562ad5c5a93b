//! # Approach manager
//!
//! Runs the approach controller as a command with a lifecycle:
//!
//! - `Off` - No approach is running, nothing is sent to the base.
//! - `Approaching` - Each step reads the sensor, calculates the demands and
//!   applies them to the base.
//! - `Complete` - The base arrived at the target and was stopped.
//!
//! Whichever way an approach ends, through completion or an abort, the last
//! demand the base receives is the zero demand. Losing the target never ends
//! an approach, the base just waits for it to reappear.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use log::info;
use serde::Serialize;

use crate::approach_ctrl::ApproachCtrl;
use crate::drive::DriveActuator;
use crate::vision::TargetSensor;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

pub struct ApproachMgr {
    ctrl: ApproachCtrl,

    mode: ApproachMode,

    stats: ApproachStats,
}

/// Counters for the current (or most recent) approach run.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct ApproachStats {
    /// Number of runs started since the manager was created
    pub num_runs: u32,

    /// Ticks executed in this run
    pub num_ticks: u64,

    /// Ticks in this run during which no target was visible
    pub num_ticks_no_target: u64,

    /// Id of the target seen on the last tick which had one
    pub last_target_id: Option<i32>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum ApproachMode {
    Off,
    Approaching,
    Complete,
}

/// Result of a single step of the manager.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ApproachStatus {
    /// No approach is running, nothing was applied.
    Inactive,

    /// The approach is running and a demand was applied.
    Approaching,

    /// The approach completed on this step and the base was stopped.
    Completed,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ApproachMgr {
    pub fn new(ctrl: ApproachCtrl) -> Self {
        Self {
            ctrl,
            mode: ApproachMode::Off,
            stats: ApproachStats::default(),
        }
    }

    /// Start an approach. If one is already running it is restarted.
    pub fn start(&mut self) {
        if self.mode == ApproachMode::Approaching {
            info!("Restarting approach");
        }
        else {
            info!("Starting approach");
        }

        self.ctrl.on_start();
        self.mode = ApproachMode::Approaching;
        self.stats = ApproachStats {
            num_runs: self.stats.num_runs + 1,
            ..ApproachStats::default()
        };
    }

    /// Execute one control cycle.
    pub fn step<S, A>(&mut self, sensor: &S, actuator: &mut A) -> ApproachStatus
    where
        S: TargetSensor + ?Sized,
        A: DriveActuator + ?Sized
    {
        if self.mode != ApproachMode::Approaching {
            return ApproachStatus::Inactive;
        }

        let observation = sensor.observation();

        let dems = self.ctrl.on_tick(&observation);
        actuator.apply(dems);

        self.stats.num_ticks += 1;
        match observation.target {
            Some(fix) => self.stats.last_target_id = Some(fix.id),
            None => self.stats.num_ticks_no_target += 1,
        }

        if self.ctrl.is_complete(&observation) {
            self.ctrl.on_end(false, actuator);
            self.mode = ApproachMode::Complete;

            info!("Approach complete after {} ticks", self.stats.num_ticks);

            ApproachStatus::Completed
        }
        else {
            ApproachStatus::Approaching
        }
    }

    /// Abort a running approach, stopping the base. Does nothing if no
    /// approach is running.
    pub fn abort<A>(&mut self, actuator: &mut A)
    where
        A: DriveActuator + ?Sized
    {
        if self.mode != ApproachMode::Approaching {
            return;
        }

        self.ctrl.on_end(true, actuator);
        self.mode = ApproachMode::Off;

        info!("Approach aborted after {} ticks", self.stats.num_ticks);
    }

    pub fn mode(&self) -> ApproachMode {
        self.mode
    }

    pub fn is_approaching(&self) -> bool {
        self.mode == ApproachMode::Approaching
    }

    pub fn stats(&self) -> &ApproachStats {
        &self.stats
    }

    pub fn ctrl(&self) -> &ApproachCtrl {
        &self.ctrl
    }

    pub fn ctrl_mut(&mut self) -> &mut ApproachCtrl {
        &mut self.ctrl
    }
}
