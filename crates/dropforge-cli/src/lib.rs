//! Dropforge CLI library.
//!
//! Command implementations behind the `dropforge` binary. They are exposed as
//! a library so integration tests can drive them without spawning a process.

pub mod commands;
