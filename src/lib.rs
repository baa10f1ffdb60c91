//! Brush Timer Library
//!
//! This library provides the core functionality for the toothbrushing timer.
//! It includes:
//! - The countdown/zone state machine and its view model
//! - A session engine tying the ticker and audio to state transitions
//! - Sound playback for background music and the completion chime
//! - CLI command parsing and terminal display

pub mod cli;
pub mod session;
pub mod sound;
pub mod types;

// Re-export commonly used types for convenience
pub use types::{
    zone_index_for, BrushConfig, BrushPhase, TickOutcome, TimerSnapshot, TimerState, Zone,
    TOTAL_SECONDS, ZONES, ZONE_COUNT, ZONE_SECONDS,
};

// Re-export session types
pub use session::{
    AudioChannel, BrushEngine, MockTicker, SessionEvent, Tick, Ticker, TokioTicker,
};

// Re-export sound types
pub use sound::{
    create_audio_controller, AudioController, MockAudioController, NullAudioController,
    RodioAudioController, SoundError, SoundSource,
};
