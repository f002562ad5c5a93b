//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface.
//!
//! Telecommands are exchanged as JSON objects with a `type` string and, for
//! those types that need one, a `payload`:
//!
//! ```text
//! {"type": "SAFE"}
//! {"type": "APPROACH", "payload": "Start"}
//! ```

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod approach;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde_json::{self, json, Value};
use thiserror::Error;

// Internal
use approach::ApproachCmd;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the exec by an operator or a
/// script.
#[derive(Debug, Clone, PartialEq)]
pub enum Tc {
    /// Keep-alive, no action.
    Heartbeat,

    /// Put the exec into safe mode, stopping any motion.
    MakeSafe,

    /// Leave safe mode.
    MakeUnsafe,

    /// Command the vision-guided approach.
    Approach(ApproachCmd),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("TC has an invalid type ({0})")]
    InvalidType(String),

    #[error("TC of type {0} is expected to have a payload but it doesn't")]
    MissingPayload(String),

    #[error("TC of type {0} has an invalid payload: {1}")]
    InvalidPayload(String, serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        let val: Value = serde_json::from_str(json_str)
            .map_err(TcParseError::InvalidJson)?;

        let tc_type = match val["type"].as_str() {
            Some(s) => s,
            None => return Err(TcParseError::InvalidType(String::from(
                "Expected \"type\" to be a string"
            )))
        };

        match tc_type {
            "HEARTBEAT" => Ok(Tc::Heartbeat),
            "SAFE" => Ok(Tc::MakeSafe),
            "UNSAFE" => Ok(Tc::MakeUnsafe),
            "APPROACH" => {
                if val["payload"].is_null() {
                    return Err(TcParseError::MissingPayload(tc_type.to_string()))
                }

                serde_json::from_value(val["payload"].clone())
                    .map(Tc::Approach)
                    .map_err(|e| TcParseError::InvalidPayload(tc_type.to_string(), e))
            },
            t => Err(TcParseError::InvalidType(
                format!("{} is not a recognised TC type", t)
            ))
        }
    }

    /// Serialise the TC into its JSON representation.
    pub fn to_json(&self) -> String {
        let val = match self {
            Tc::Heartbeat => json!({ "type": "HEARTBEAT" }),
            Tc::MakeSafe => json!({ "type": "SAFE" }),
            Tc::MakeUnsafe => json!({ "type": "UNSAFE" }),
            Tc::Approach(cmd) => json!({ "type": "APPROACH", "payload": cmd }),
        };

        val.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_simple_tcs() {
        assert_eq!(Tc::from_json(r#"{"type": "HEARTBEAT"}"#).unwrap(), Tc::Heartbeat);
        assert_eq!(Tc::from_json(r#"{"type": "SAFE"}"#).unwrap(), Tc::MakeSafe);
        assert_eq!(Tc::from_json(r#"{"type": "UNSAFE"}"#).unwrap(), Tc::MakeUnsafe);
    }

    #[test]
    fn test_parse_approach_tcs() {
        assert_eq!(
            Tc::from_json(r#"{"type": "APPROACH", "payload": "Start"}"#).unwrap(),
            Tc::Approach(ApproachCmd::Start)
        );
        assert_eq!(
            Tc::from_json(r#"{"type": "APPROACH", "payload": "Abort"}"#).unwrap(),
            Tc::Approach(ApproachCmd::Abort)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Tc::from_json("not json"),
            Err(TcParseError::InvalidJson(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": 4}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "FLY"}"#),
            Err(TcParseError::InvalidType(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "APPROACH"}"#),
            Err(TcParseError::MissingPayload(_))
        ));
        assert!(matches!(
            Tc::from_json(r#"{"type": "APPROACH", "payload": "Dance"}"#),
            Err(TcParseError::InvalidPayload(_, _))
        ));
    }

    #[test]
    fn test_json_is_parseable() {
        for tc in vec![
            Tc::Heartbeat,
            Tc::MakeSafe,
            Tc::MakeUnsafe,
            Tc::Approach(ApproachCmd::Start),
        ] {
            assert_eq!(Tc::from_json(&tc.to_json()).unwrap(), tc);
        }
    }
}
