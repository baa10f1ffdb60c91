//! CLI module for the brushing timer.
//!
//! This module provides the command-line interface:
//! - `commands`: Command definitions using clap derive
//! - `input`: Commands typed during a session
//! - `display`: Terminal rendering of the session

pub mod commands;
pub mod display;
pub mod input;

pub use commands::{Cli, Commands, RunArgs};
pub use display::Display;
pub use input::InputCommand;
