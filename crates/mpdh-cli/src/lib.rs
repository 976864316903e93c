//! The `mp-dh` front end: file-based generate, send and recover commands.
//!
//! Commands are plain functions over paths so they can be driven from tests
//! without spawning the binary.

pub mod commands;
pub mod files;
