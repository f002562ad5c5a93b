//! # Telecommand processor module
//!
//! The telecommand processor handles TCs coming from any source.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use comms_if::tc::Tc;
use crate::data_store::{DataStore, SafeModeCause};

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules. In safe mode
/// only the make unsafe TC is executed, everything else is rejected. Returns
/// `true` if the TC was executed.
pub fn exec(ds: &mut DataStore, tc: &Tc) -> bool {
    if ds.safe && *tc != Tc::MakeUnsafe {
        warn!("Cannot execute {:?} in safe mode", tc);
        return false;
    }

    match tc {
        Tc::Heartbeat => {
            debug!("Recieved Heartbeat");
        },
        Tc::MakeSafe => {
            debug!("Recieved MakeSafe command");
            ds.make_safe(SafeModeCause::MakeSafeTc);
        },
        Tc::MakeUnsafe => {
            debug!("Recieved MakeUnsafe command");
            ds.make_unsafe(SafeModeCause::MakeSafeTc).ok();
        },
        Tc::Approach(cmd) => {
            debug!("Recieved Approach command: {:?}", cmd);
            ds.approach_cmd = Some(*cmd);
        }
    }

    true
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::approach_mgr::ApproachMode;
    use crate::data_store::test::data_store;
    use comms_if::tc::approach::ApproachCmd;

    #[test]
    fn test_approach_tc() {
        let mut ds = data_store();

        assert!(exec(&mut ds, &Tc::Approach(ApproachCmd::Start)));
        assert_eq!(ds.approach_cmd, Some(ApproachCmd::Start));
    }

    #[test]
    fn test_demo_script_runs() {
        use util::script_interpreter::{PendingTcs, ScriptInterpreter};

        let mut si = ScriptInterpreter::new(
            concat!(env!("CARGO_MANIFEST_DIR"), "/../scripts/approach_demo.prs")
        ).unwrap();
        let mut ds = data_store();

        let mut executed = 0;
        while let PendingTcs::Some(tcs) = si.get_pending_tcs(1000.0) {
            for tc in tcs.iter() {
                if exec(&mut ds, tc) {
                    executed += 1;
                }
            }
        }

        assert_eq!(executed, 5);
        assert!(!ds.safe);
        assert_eq!(ds.approach_cmd, Some(ApproachCmd::Start));
    }

    #[test]
    fn test_safe_mode_filters_tcs() {
        let mut ds = data_store();

        assert!(exec(&mut ds, &Tc::Approach(ApproachCmd::Start)));
        ds.proc_vision();
        ds.proc_approach();
        assert_eq!(ds.approach_mgr.mode(), ApproachMode::Approaching);

        assert!(exec(&mut ds, &Tc::MakeSafe));
        assert!(ds.safe);
        assert_eq!(ds.approach_mgr.mode(), ApproachMode::Off);

        assert!(!exec(&mut ds, &Tc::Approach(ApproachCmd::Start)));
        assert!(!exec(&mut ds, &Tc::Heartbeat));
        assert_eq!(ds.approach_cmd, None);

        assert!(exec(&mut ds, &Tc::MakeUnsafe));
        assert!(!ds.safe);
        assert!(exec(&mut ds, &Tc::Heartbeat));
    }
}
