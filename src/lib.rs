//! stimkit - visual stimulus generation
//!
//! Directory-level drivers around `stim-transform`: configuration, image
//! I/O, natural-order batch processing and run reports.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
