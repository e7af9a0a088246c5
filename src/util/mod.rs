//! Shared utilities.

pub mod timeout;
