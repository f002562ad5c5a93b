//! # Equipment Interface
//!
//! This module defines the interface structures exchanged with equipment: the
//! vision pipeline on the input side and the drive base on the output side.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod drive;
pub mod vision;
