//! Vision monitor state

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;

// Internal
use super::{Params, TargetSensor, VisionError};
use comms_if::eqpt::vision::{TargetDetection, VisionFrame};
use util::{
    archive::{ArchiveError, Archived, Archiver},
    params,
    session::Session,
    time::duration_to_seconds
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Tracks the frames coming out of the camera pipeline.
///
/// The monitor starts out assuming the camera is connected, and only declares
/// it disconnected once no frames have arrived for more than
/// `disconnect_threshold` consecutive updates, or the camera reports a fault.
pub struct VisionMonitor {
    params: Params,

    /// The most recent frame received.
    latest: Option<VisionFrame>,

    connected: bool,

    /// Number of consecutive updates which brought no new frame.
    num_empty_updates: u32,

    /// Whether a target was visible after the previous update, used to log
    /// acquisition and loss.
    had_target: bool,

    arch_report: Archiver,
}

/// Monitoring quantities of the vision monitor.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize)]
pub struct VisionReport {
    pub connected: bool,
    pub num_empty_updates: u32,
    pub has_target: bool,
    pub target_id: i32,
    pub yaw_deg: f64,
    pub pitch_deg: f64,
    pub area_pct: f64,

    /// Age of the most recent frame, if there is one
    pub frame_age_s: Option<f64>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl VisionMonitor {
    pub fn new(params: Params) -> Self {
        Self {
            params,
            latest: None,
            connected: true,
            num_empty_updates: 0,
            had_target: false,
            arch_report: Archiver::default(),
        }
    }

    /// Initialise the monitor, loading the parameters from the given path
    /// (relative to the params directory) and opening the archive.
    pub fn init(params_path: &str, session: &Session) -> Result<Self, VisionError> {
        let params: Params = params::load(params_path)
            .map_err(VisionError::ParamLoadError)?;

        let mut monitor = Self::new(params);
        monitor.arch_report = Archiver::from_path(session, "vision/report.csv")
            .map_err(VisionError::ArchiveError)?;

        Ok(monitor)
    }

    /// Update the monitor with all frames received since the last update.
    ///
    /// Must be called once per cycle, even if there are no new frames, as the
    /// number of empty updates is what detects a silent camera.
    pub fn update(&mut self, frames: Vec<VisionFrame>) {
        match frames.into_iter().last() {
            Some(frame) => {
                self.latest = Some(frame);
                self.num_empty_updates = 0;

                if !self.connected {
                    info!("Vision camera reconnected");
                }
                self.connected = true;
            },
            None => {
                self.num_empty_updates = self.num_empty_updates.saturating_add(1);

                if self.connected && self.num_empty_updates > self.params.disconnect_threshold {
                    warn!(
                        "No vision frames for {} cycles, camera disconnected",
                        self.num_empty_updates
                    );
                    self.connected = false;
                }
            }
        }

        self.log_target_transition();
    }

    /// Report a camera fault. The camera is considered disconnected until the
    /// next frame arrives.
    pub fn report_error(&mut self, msg: &str) {
        error!("Vision camera error: {}", msg);

        self.connected = false;
        self.num_empty_updates = self.params.disconnect_threshold;

        self.log_target_transition();
    }

    /// True if the camera is delivering frames.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The best target, the one with the largest apparent area, if the camera
    /// is connected and sees one.
    pub fn best_target(&self) -> Option<&TargetDetection> {
        if !self.connected {
            return None;
        }

        self.latest.as_ref().and_then(|f| f.best_target())
    }

    /// Pitch to the best target, positive upwards. Units: degrees
    pub fn pitch_deg(&self) -> f64 {
        self.best_target().map(|t| t.pitch_deg).unwrap_or(0.0)
    }

    /// The most recent frame received, whether or not the camera is still
    /// considered connected.
    pub fn latest_frame(&self) -> Option<&VisionFrame> {
        self.latest.as_ref()
    }

    pub fn report(&self) -> VisionReport {
        VisionReport {
            connected: self.connected,
            num_empty_updates: self.num_empty_updates,
            has_target: self.has_target(),
            target_id: self.target_id(),
            yaw_deg: self.yaw_error_deg(),
            pitch_deg: self.pitch_deg(),
            area_pct: self.area_pct(),
            frame_age_s: self.latest
                .as_ref()
                .and_then(|f| duration_to_seconds(Utc::now() - f.timestamp)),
        }
    }

    fn log_target_transition(&mut self) {
        let has_target = self.has_target();

        if has_target && !self.had_target {
            info!("Target {} acquired", self.target_id());
        }
        else if !has_target && self.had_target {
            info!("Target lost");
        }

        self.had_target = has_target;
    }
}

impl TargetSensor for VisionMonitor {
    fn has_target(&self) -> bool {
        self.best_target().is_some()
    }

    fn yaw_error_deg(&self) -> f64 {
        self.best_target().map(|t| t.yaw_deg).unwrap_or(0.0)
    }

    fn area_pct(&self) -> f64 {
        self.best_target().map(|t| t.area_pct).unwrap_or(0.0)
    }

    fn target_id(&self) -> i32 {
        self.best_target().map(|t| t.id).unwrap_or(-1)
    }
}

impl Archived for VisionMonitor {
    fn write(&mut self) -> Result<(), ArchiveError> {
        let report = self.report();
        self.arch_report.serialise(report)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::eqpt::vision::TargetObservation;

    fn det(id: i32, yaw_deg: f64, area_pct: f64) -> TargetDetection {
        TargetDetection { id, yaw_deg, pitch_deg: 1.5, area_pct }
    }

    fn monitor(disconnect_threshold: u32) -> VisionMonitor {
        VisionMonitor::new(Params { disconnect_threshold })
    }

    #[test]
    fn test_initial_state() {
        let m = monitor(50);
        assert!(m.is_connected());
        assert!(!m.has_target());
        assert_eq!(m.target_id(), -1);
        assert_eq!(m.observation(), TargetObservation::no_target());
    }

    #[test]
    fn test_latest_frame_used() {
        let mut m = monitor(50);
        m.update(vec![
            VisionFrame::now(vec![det(1, 5.0, 10.0)]),
            VisionFrame::now(vec![det(2, -3.0, 4.0), det(3, 8.0, 6.0)]),
        ]);

        assert!(m.has_target());
        assert_eq!(m.target_id(), 3);
        assert_eq!(m.yaw_error_deg(), 8.0);
        assert_eq!(m.area_pct(), 6.0);
        assert_eq!(m.pitch_deg(), 1.5);
        assert_eq!(m.observation(), TargetObservation::new(3, 8.0, 6.0));
    }

    #[test]
    fn test_empty_frame_means_no_target() {
        let mut m = monitor(50);
        m.update(vec![VisionFrame::now(vec![det(1, 5.0, 10.0)])]);
        assert!(m.has_target());

        m.update(vec![VisionFrame::now(vec![])]);
        assert!(m.is_connected());
        assert!(!m.has_target());
    }

    #[test]
    fn test_disconnect_after_threshold() {
        let mut m = monitor(3);
        m.update(vec![VisionFrame::now(vec![det(1, 0.0, 10.0)])]);

        // Stale frames are still used up to the threshold
        for _ in 0..3 {
            m.update(vec![]);
            assert!(m.is_connected());
            assert!(m.has_target());
        }

        m.update(vec![]);
        assert!(!m.is_connected());
        assert!(!m.has_target());
        assert_eq!(m.observation(), TargetObservation::no_target());

        // A new frame reconnects
        m.update(vec![VisionFrame::now(vec![det(1, 0.0, 10.0)])]);
        assert!(m.is_connected());
        assert!(m.has_target());
        let report = m.report();
        assert_eq!(report.num_empty_updates, 0);
        assert!(report.frame_age_s.unwrap() >= 0.0);
    }

    #[test]
    fn test_report_error_disconnects() {
        let mut m = monitor(10);
        m.update(vec![VisionFrame::now(vec![det(7, 2.0, 10.0)])]);

        m.report_error("timeout");
        assert!(!m.is_connected());
        assert!(!m.has_target());
        assert_eq!(m.report().num_empty_updates, 10);

        // The last frame is kept but not used
        assert!(m.latest_frame().is_some());

        m.update(vec![VisionFrame::now(vec![det(7, 2.0, 10.0)])]);
        assert!(m.has_target());
    }

    #[test]
    fn test_archive_without_session() {
        let mut m = monitor(10);
        assert!(m.write().is_ok());
    }
}
