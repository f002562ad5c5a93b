//! # Approach library.
//!
//! This library allows other crates in the workspace to access items defined inside the approach
//! crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Approach control - calculates the demands which drive the base towards a visual target
pub mod approach_ctrl;
/// Approach manager - runs the approach controller as a command with a start and an end
pub mod approach_mgr;
/// Data store - global data shared between the exec's modules
pub mod data_store;
/// Drive - the interface to anything which can move the base
pub mod drive;
/// Exec parameters
pub mod params;
/// Simulation - a kinematic base and a camera to run the approach without hardware
pub mod sim;
/// Telecommand processor - executes TCs from scripts
pub mod tc_processor;
/// Vision - target observations from the camera pipeline
pub mod vision;
