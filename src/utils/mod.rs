//! Utility functions for working with A2A types.
//!
//! Helpers for building the messages and tasks the host sends and
//! synthesizes, and for reading content back out of them.

pub mod message;
pub mod parts;
pub mod task;

pub use message::*;
pub use parts::*;
pub use task::*;
