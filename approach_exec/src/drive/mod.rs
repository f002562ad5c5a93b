//! # Drive module
//!
//! The seam between the approach and the base that moves it. Anything which
//! can accept holonomic velocity demands implements `DriveActuator`, the
//! simulated base for example.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::eqpt::drive::DriveDems;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A drive base which can be commanded with velocity demands.
pub trait DriveActuator {
    /// Apply the given demands to the base.
    ///
    /// Demands persist until the next call, so applying `DriveDems::ZERO`
    /// brings the base to rest.
    fn apply(&mut self, dems: DriveDems);
}

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An actuator which records every demand it is given without moving
/// anything.
#[derive(Debug, Default, Clone)]
pub struct RecordingActuator {
    history: Vec<DriveDems>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All demands applied so far, oldest first.
    pub fn history(&self) -> &[DriveDems] {
        &self.history
    }

    /// The most recently applied demand.
    pub fn last(&self) -> Option<DriveDems> {
        self.history.last().copied()
    }

    /// Number of demands applied so far.
    pub fn num_applied(&self) -> usize {
        self.history.len()
    }
}

impl DriveActuator for RecordingActuator {
    fn apply(&mut self, dems: DriveDems) {
        self.history.push(dems);
    }
}

impl<A: DriveActuator + ?Sized> DriveActuator for &mut A {
    fn apply(&mut self, dems: DriveDems) {
        (**self).apply(dems)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn drive_twice<A: DriveActuator>(mut act: A) {
        act.apply(DriveDems::new(0.5, 0.0, 0.1));
        act.apply(DriveDems::ZERO);
    }

    #[test]
    fn test_recording_actuator() {
        let mut act = RecordingActuator::new();
        assert_eq!(act.last(), None);

        drive_twice(&mut act);

        assert_eq!(act.num_applied(), 2);
        assert_eq!(act.history()[0], DriveDems::new(0.5, 0.0, 0.1));
        assert_eq!(act.last(), Some(DriveDems::ZERO));
    }
}
