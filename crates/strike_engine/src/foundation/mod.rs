//! Foundation utilities shared across the engine
//!
//! Math aliases, frame timing, and logging setup.

pub mod logging;
pub mod math;
pub mod time;
