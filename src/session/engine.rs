//! Session engine for the brushing timer.
//!
//! This module provides:
//! - The four user/timer operations (start/pause, tick, reset, music)
//! - Ticker arming tied to the active state
//! - Audio side effects with non-fatal failures
//! - Event firing for the view layer

use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use super::ticker::{Tick, Ticker};
use crate::sound::{AudioController, SoundError};
use crate::types::{TickOutcome, TimerSnapshot, TimerState, TOTAL_SECONDS};

// ============================================================================
// SessionEvent
// ============================================================================

/// Audio channel named in playback failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioChannel {
    Music,
    Chime,
}

/// Session events for the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Countdown started from the full session
    Started,
    /// Countdown resumed after a pause
    Resumed,
    /// Countdown paused
    Paused,
    /// One second elapsed
    Tick {
        /// Remaining seconds
        #[serde(rename = "remainingSeconds")]
        remaining_seconds: u32,
    },
    /// The brushing zone changed
    ZoneChanged {
        /// New zone index
        zone: usize,
    },
    /// Countdown reached zero
    Finished,
    /// Session reset to its initial state
    Reset,
    /// Music flag changed
    MusicToggled {
        /// Whether music is now playing
        playing: bool,
    },
    /// A sound could not be played
    PlaybackFailed {
        channel: AudioChannel,
        reason: String,
    },
}

// ============================================================================
// BrushEngine
// ============================================================================

/// Owns the timer state and performs its side effects.
///
/// The ticker is armed exactly while the state is active: every transition
/// of the active flag goes through `activate` or `deactivate`.
pub struct BrushEngine {
    state: TimerState,
    ticker: Box<dyn Ticker>,
    audio: Box<dyn AudioController>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
}

impl BrushEngine {
    /// Creates an engine for a fresh session.
    pub fn new(
        ticker: Box<dyn Ticker>,
        audio: Box<dyn AudioController>,
        event_tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            state: TimerState::new(),
            ticker,
            audio,
            event_tx,
        }
    }

    /// Starts or pauses the countdown. Does nothing once finished.
    pub fn start_or_pause(&mut self) {
        let fresh = self.state.time_remaining() == TOTAL_SECONDS;

        match self.state.toggle_active() {
            None => debug!("Session finished, start/pause ignored"),
            Some(true) => {
                self.activate();
                self.emit(if fresh {
                    SessionEvent::Started
                } else {
                    SessionEvent::Resumed
                });
            }
            Some(false) => {
                self.deactivate();
                self.emit(SessionEvent::Paused);
            }
        }
    }

    /// Handles a tick from the ticker, dropping ticks from a previous arm.
    pub fn handle_tick(&mut self, tick: Tick) {
        if !self.ticker.is_armed() || tick.generation != self.ticker.generation() {
            debug!(
                "Dropping stale tick (generation {}, current {})",
                tick.generation,
                self.ticker.generation()
            );
            return;
        }
        self.tick();
    }

    /// Counts one second.
    pub fn tick(&mut self) {
        let zone_before = self.state.current_zone();

        match self.state.tick() {
            TickOutcome::Ignored => trace!("Tick ignored while not running"),
            TickOutcome::Counted { remaining_seconds } => {
                self.emit(SessionEvent::Tick { remaining_seconds });
                let zone = self.state.current_zone();
                if zone != zone_before {
                    debug!("Zone {} -> {}", zone_before, zone);
                    self.emit(SessionEvent::ZoneChanged { zone });
                }
            }
            TickOutcome::Finished => self.handle_finished(),
        }
    }

    /// Handles the tick that reached zero.
    fn handle_finished(&mut self) {
        debug!("Brushing session finished");
        self.deactivate();
        self.audio.pause_music();

        self.emit(SessionEvent::Tick {
            remaining_seconds: 0,
        });
        self.emit(SessionEvent::Finished);

        if let Err(e) = self.audio.play_chime() {
            self.report_playback_failure(AudioChannel::Chime, &e);
        }
    }

    /// Restores the initial state, stops the ticker and rewinds the music.
    pub fn reset(&mut self) {
        self.state.reset();
        self.deactivate();
        self.audio.stop_music();
        debug!("Session reset");
        self.emit(SessionEvent::Reset);
    }

    /// Starts or pauses the background music.
    ///
    /// If the music cannot start, the music flag falls back to false.
    pub fn toggle_music(&mut self) {
        let playing = if self.state.toggle_music() {
            match self.audio.play_music() {
                Ok(()) => true,
                Err(e) => {
                    self.state.set_music_playing(false);
                    self.report_playback_failure(AudioChannel::Music, &e);
                    false
                }
            }
        } else {
            self.audio.pause_music();
            false
        };

        self.emit(SessionEvent::MusicToggled { playing });
    }

    fn activate(&mut self) {
        self.ticker.arm();
    }

    fn deactivate(&mut self) {
        self.ticker.disarm();
    }

    /// Reports a failed sound. Missing devices only log at debug level.
    fn report_playback_failure(&self, channel: AudioChannel, error: &SoundError) {
        if error.is_device_error() {
            debug!("{:?} not played: {}", channel, error);
        } else {
            warn!("{:?} playback failed: {} ({})", channel, error, error.suggestion());
        }
        self.emit(SessionEvent::PlaybackFailed {
            channel,
            reason: error.to_string(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        if self.event_tx.send(event).is_err() {
            trace!("Event receiver closed");
        }
    }

    /// Returns a reference to the current timer state.
    pub fn state(&self) -> &TimerState {
        &self.state
    }

    /// Index of the zone to brush right now.
    pub fn current_zone(&self) -> usize {
        self.state.current_zone()
    }

    /// Captures the current state for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        self.state.snapshot()
    }
}

impl Drop for BrushEngine {
    fn drop(&mut self) {
        self.ticker.disarm();
        self.audio.stop_music();
    }
}

impl std::fmt::Debug for BrushEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrushEngine")
            .field("state", &self.state)
            .field("ticker_armed", &self.ticker.is_armed())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
