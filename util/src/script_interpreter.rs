//! # Script interpreter module
//!
//! This module provides an interpreter for timed telecommand scripts,
//! allowing telecommands to be executed at set times in a session.
//!
//! A script is a text file of `<time_s>: <tc_json>;` entries, for example:
//!
//! ```text
//! 0.5: {"type": "APPROACH", "payload": "Start"};
//! 12.0: {"type": "APPROACH", "payload": "Abort"};
//! ```
//!
//! Anything that doesn't match that form (comments, blank lines) is ignored.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use conquer_once::OnceCell;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};

// ---------------------------------------------------------------------------
// STATICS
// ---------------------------------------------------------------------------

/// Matches one `<time>: <tc json>;` entry per line.
static SCRIPT_REGEX: OnceCell<Regex> = OnceCell::uninit();

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
#[derive(Debug)]
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError),

    #[error("Could not build the script regex: {0}")]
    InvalidRegex(regex::Error)
}

#[derive(Debug)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        let path = PathBuf::from(script_path.as_ref());

        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_str(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = script_regex()?;

        for cap in re.captures_iter(script) {
            // Groups 1 and 3 always participate in a match
            let time_str = &cap[1];
            let tc_str = &cap[3];

            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = Tc::from_json(tc_str)
                .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Scripts are executed in time order regardless of how they're
        // written.
        tc_queue
            .make_contiguous()
            .sort_by(|a, b| a.exec_time_s.total_cmp(&b.exec_time_s));

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: tc_queue
        })
    }

    /// Return a vector of TCs due at `current_time_s`, `None` if no TCs need
    /// executing now, or `EndOfScript` once every TC has been returned.
    pub fn get_pending_tcs(&mut self, current_time_s: f64) -> PendingTcs {

        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop items from the queue while the head's exec time has passed.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s > current_time_s {
                break;
            }

            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        if tc_vec.is_empty() {
            PendingTcs::None
        }
        else {
            PendingTcs::Some(tc_vec)
        }
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }

    /// Get the path the script was loaded from, if any.
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the script regex, building it on first use.
fn script_regex() -> Result<&'static Regex, ScriptError> {
    if let Some(re) = SCRIPT_REGEX.get() {
        return Ok(re);
    }

    let re = RegexBuilder::
        new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
        .multi_line(true)
        .build()
        .map_err(ScriptError::InvalidRegex)?;

    Ok(SCRIPT_REGEX.get_or_init(|| re))
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::approach::ApproachCmd;

    const SCRIPT: &str = "
        # Start the approach, then abort it
        2.5: {\"type\": \"APPROACH\", \"payload\": \"Abort\"};
        0.0: {\"type\": \"UNSAFE\"};
        0.5: {\"type\": \"APPROACH\", \"payload\": \"Start\"};
    ";

    #[test]
    fn test_parse_script() {
        let si = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 3);
        assert_eq!(si.get_duration(), 2.5);
        assert!(si.script_path().is_none());
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_str(SCRIPT).unwrap();

        match si.get_pending_tcs(0.1) {
            PendingTcs::Some(tcs) => assert_eq!(tcs, vec![Tc::MakeUnsafe]),
            p => panic!("Expected one pending TC, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs(0.2), PendingTcs::None));

        match si.get_pending_tcs(3.0) {
            PendingTcs::Some(tcs) => assert_eq!(
                tcs,
                vec![
                    Tc::Approach(ApproachCmd::Start),
                    Tc::Approach(ApproachCmd::Abort)
                ]
            ),
            p => panic!("Expected two pending TCs, got {:?}", p)
        }

        assert!(matches!(si.get_pending_tcs(4.0), PendingTcs::EndOfScript));
    }

    #[test]
    fn test_regex_reused_between_scripts() {
        let first = script_regex().unwrap() as *const Regex;
        let a = ScriptInterpreter::from_str(SCRIPT).unwrap();
        let b = ScriptInterpreter::from_str("1.0: {\"type\": \"UNSAFE\"};")
            .unwrap();

        assert_eq!(a.get_num_tcs(), 3);
        assert_eq!(b.get_num_tcs(), 1);
        assert!(std::ptr::eq(first, script_regex().unwrap()));
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_str("# nothing here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_invalid_tc() {
        assert!(matches!(
            ScriptInterpreter::from_str("1.0: {\"type\": \"WARP_DRIVE\"};"),
            Err(ScriptError::InvalidTc(t, _)) if t == 1.0
        ));
    }

    #[test]
    fn test_missing_script() {
        assert!(matches!(
            ScriptInterpreter::new("no/such/script.prs"),
            Err(ScriptError::ScriptNotFound(_))
        ));
    }
}
