//! Session module for the brushing timer.
//!
//! This module contains the session machinery:
//! - `engine`: Applies user actions and ticks to the timer state, with side effects
//! - `ticker`: One-second tick source armed while the countdown runs
//! - `runner`: Interactive loop wiring stdin, ticks and output together

pub mod engine;
pub mod runner;
pub mod ticker;

pub use engine::{AudioChannel, BrushEngine, SessionEvent};
pub use runner::{run, run_with, InputLines};
pub use ticker::{MockTicker, Tick, Ticker, TokioTicker, TICK_PERIOD};
