//! Command handlers.
//!
//! Handlers are thin wrappers over the composed `CliContext`:
//! they read what they need from it, call into loopy-core or loopy-api
//! and format the result for the terminal.

pub mod app;
pub mod device;
pub mod hash;
pub mod open;
pub mod reset;
