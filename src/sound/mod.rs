//! Sound playback for the brushing timer.
//!
//! Two independent channels:
//!
//! - a looping music channel (play / pause / stop-and-rewind)
//! - a one-shot completion chime
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │ AudioController  │ ← Interface used by the session engine
//! └────────┬─────────┘
//!          │
//!          ▼
//! ┌──────────────────┐     ┌──────────────────┐
//! │   SoundSource    │────▶│  Audio file      │
//! │                  │     │  (--music, ...)  │
//! │                  │     ├──────────────────┤
//! │                  │────▶│ Embedded tunes   │
//! └──────────────────┘     │  (fallback)      │
//!                          └──────────────────┘
//! ```
//!
//! Playback failures are reported as [`SoundError`] and never stop the
//! countdown.

mod embedded;
mod error;
mod player;
mod source;

use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::types::BrushConfig;

pub use embedded::{chime_source, music_source};
pub use error::SoundError;
pub use player::RodioAudioController;
pub use source::{resolve_source, SoundSource, EMBEDDED_CHIME, EMBEDDED_MUSIC};

/// Audio side effects of the brushing session.
pub trait AudioController {
    /// Starts the music loop, or resumes it from where it was paused.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot start.
    fn play_music(&mut self) -> Result<(), SoundError>;

    /// Pauses the music loop, keeping its position.
    fn pause_music(&mut self);

    /// Stops the music loop and rewinds it to the beginning.
    fn stop_music(&mut self);

    /// Plays the completion chime once, without waiting for it to end.
    ///
    /// # Errors
    ///
    /// Returns an error if playback cannot start.
    fn play_chime(&mut self) -> Result<(), SoundError>;
}

// ============================================================================
// NullAudioController
// ============================================================================

/// Controller used when sound is disabled or no device exists.
///
/// Every play request fails with the stored reason so the caller can
/// report it.
#[derive(Debug, Clone)]
pub struct NullAudioController {
    reason: String,
}

impl NullAudioController {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl AudioController for NullAudioController {
    fn play_music(&mut self) -> Result<(), SoundError> {
        Err(SoundError::DeviceNotAvailable(self.reason.clone()))
    }

    fn pause_music(&mut self) {}

    fn stop_music(&mut self) {}

    fn play_chime(&mut self) -> Result<(), SoundError> {
        Err(SoundError::DeviceNotAvailable(self.reason.clone()))
    }
}

/// Creates the audio controller for a session.
///
/// Falls back to a [`NullAudioController`] when sound is disabled or the
/// output device cannot be opened.
#[must_use]
pub fn create_audio_controller(config: &BrushConfig) -> Box<dyn AudioController> {
    if !config.sound_enabled {
        return Box::new(NullAudioController::new("son désactivé"));
    }

    let music = resolve_source(config.music_path.as_deref(), EMBEDDED_MUSIC);
    let chime = resolve_source(config.chime_path.as_deref(), EMBEDDED_CHIME);

    match RodioAudioController::new(music, chime) {
        Ok(controller) => Box::new(controller),
        Err(e) => {
            warn!("Audio not available, sound disabled: {}", e);
            Box::new(NullAudioController::new(e.to_string()))
        }
    }
}

// ============================================================================
// MockAudioController
// ============================================================================

/// Calls recorded by [`MockAudioController`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AudioCalls {
    pub play_music: usize,
    pub pause_music: usize,
    pub stop_music: usize,
    pub play_chime: usize,
}

#[derive(Debug, Default)]
struct MockAudioInner {
    calls: AudioCalls,
    music_playing: bool,
    fail_music: bool,
    fail_chime: bool,
}

/// Mock audio controller for testing.
///
/// Clones share the same recording, so a test can keep one handle while
/// the engine owns another.
#[derive(Debug, Default, Clone)]
pub struct MockAudioController {
    inner: Arc<Mutex<MockAudioInner>>,
}

impl MockAudioController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_music(&self, fail: bool) {
        self.inner.lock().unwrap().fail_music = fail;
    }

    pub fn set_fail_chime(&self, fail: bool) {
        self.inner.lock().unwrap().fail_chime = fail;
    }

    #[must_use]
    pub fn calls(&self) -> AudioCalls {
        self.inner.lock().unwrap().calls.clone()
    }

    #[must_use]
    pub fn chime_count(&self) -> usize {
        self.inner.lock().unwrap().calls.play_chime
    }

    #[must_use]
    pub fn is_music_playing(&self) -> bool {
        self.inner.lock().unwrap().music_playing
    }
}

impl AudioController for MockAudioController {
    fn play_music(&mut self) -> Result<(), SoundError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.play_music += 1;
        if inner.fail_music {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        inner.music_playing = true;
        Ok(())
    }

    fn pause_music(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.pause_music += 1;
        inner.music_playing = false;
    }

    fn stop_music(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.stop_music += 1;
        inner.music_playing = false;
    }

    fn play_chime(&mut self) -> Result<(), SoundError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.play_chime += 1;
        if inner.fail_chime {
            return Err(SoundError::PlaybackError("Mock failure".to_string()));
        }
        Ok(())
    }
}
