//! Engine test support utilities
//!
//! Shared helpers for the engine's unit, property, and integration tests,
//! currently unified logging initialization.

pub mod test_logging;
