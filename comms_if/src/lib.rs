//! # Communications interface crate.
//!
//! Provides all common interface types shared between the modules of the
//! software: equipment data (vision frames, drive demands) and telecommands.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

pub mod tc;

/// Data exchanged with equipment (the camera and the drive base)
pub mod eqpt;
