//! Core data types for the brushing timer.
//!
//! This module defines:
//! - The fixed session constants (120 seconds, 8 zones of 15 seconds)
//! - The ordered brushing zone table
//! - `TimerState`, the countdown/zone state machine
//! - `TimerSnapshot`, the serializable read model used by the view layer
//! - `BrushConfig`, the audio/output settings of a session

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Length of a brushing session in seconds.
pub const TOTAL_SECONDS: u32 = 120;

/// Number of brushing zones in a session.
pub const ZONE_COUNT: usize = 8;

/// Seconds spent in each zone.
pub const ZONE_SECONDS: u32 = TOTAL_SECONDS / ZONE_COUNT as u32;

const _: () = assert!(TOTAL_SECONDS % ZONE_COUNT as u32 == 0);

// ============================================================================
// Zones
// ============================================================================

/// Upper or lower dental arch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    Upper,
    Lower,
}

/// Side of the mouth, from the child's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Tooth surface being brushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Outer,
    Inner,
}

/// One brushing zone of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Zone {
    /// Position of the zone in the session (0-based)
    pub index: usize,
    pub arch: Arch,
    pub side: Side,
    pub surface: Surface,
    /// Label shown while the zone is active
    pub description: &'static str,
}

/// Brushing zones in session order.
pub const ZONES: [Zone; ZONE_COUNT] = [
    Zone {
        index: 0,
        arch: Arch::Upper,
        side: Side::Right,
        surface: Surface::Outer,
        description: "En haut à droite, à l'extérieur",
    },
    Zone {
        index: 1,
        arch: Arch::Upper,
        side: Side::Left,
        surface: Surface::Outer,
        description: "En haut à gauche, à l'extérieur",
    },
    Zone {
        index: 2,
        arch: Arch::Lower,
        side: Side::Left,
        surface: Surface::Outer,
        description: "En bas à gauche, à l'extérieur",
    },
    Zone {
        index: 3,
        arch: Arch::Lower,
        side: Side::Right,
        surface: Surface::Outer,
        description: "En bas à droite, à l'extérieur",
    },
    Zone {
        index: 4,
        arch: Arch::Upper,
        side: Side::Right,
        surface: Surface::Inner,
        description: "En haut à droite, à l'intérieur",
    },
    Zone {
        index: 5,
        arch: Arch::Upper,
        side: Side::Left,
        surface: Surface::Inner,
        description: "En haut à gauche, à l'intérieur",
    },
    Zone {
        index: 6,
        arch: Arch::Lower,
        side: Side::Left,
        surface: Surface::Inner,
        description: "En bas à gauche, à l'intérieur",
    },
    Zone {
        index: 7,
        arch: Arch::Lower,
        side: Side::Right,
        surface: Surface::Inner,
        description: "En bas à droite, à l'intérieur",
    },
];

/// Maps remaining seconds to a zone index.
///
/// The last zone is returned once the countdown reaches zero so the final
/// instant never produces an out-of-range index.
#[must_use]
pub fn zone_index_for(remaining_seconds: u32) -> usize {
    if remaining_seconds == 0 {
        return ZONE_COUNT - 1;
    }
    let elapsed = TOTAL_SECONDS.saturating_sub(remaining_seconds);
    ((elapsed / ZONE_SECONDS) as usize).min(ZONE_COUNT - 1)
}

// ============================================================================
// BrushPhase
// ============================================================================

/// Display phase derived from the timer flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushPhase {
    /// Full time left, never started since the last reset
    Ready,
    /// Counting down
    Brushing,
    /// Stopped part-way through
    Paused,
    /// Countdown reached zero
    Finished,
}

impl BrushPhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            BrushPhase::Ready => "ready",
            BrushPhase::Brushing => "brushing",
            BrushPhase::Paused => "paused",
            BrushPhase::Finished => "finished",
        }
    }
}

// ============================================================================
// BrushConfig
// ============================================================================

/// Session settings. Only the audio and output can be changed; the timer
/// constants are fixed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrushConfig {
    /// Audio file looped as background music (embedded tune if `None`)
    pub music_path: Option<PathBuf>,
    /// Audio file played on completion (embedded chime if `None`)
    pub chime_path: Option<PathBuf>,
    /// Whether to open an audio device at all
    pub sound_enabled: bool,
    /// Emit JSON lines instead of the text display
    pub json: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            music_path: None,
            chime_path: None,
            sound_enabled: true,
            json: false,
        }
    }
}

// ============================================================================
// TimerState
// ============================================================================

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The timer was not running; nothing changed
    Ignored,
    /// One second was counted
    Counted {
        /// Remaining seconds after the tick
        remaining_seconds: u32,
    },
    /// The tick brought the countdown to zero
    Finished,
}

/// Countdown and zone state for one brushing session.
///
/// Holds no handles; side effects are driven by
/// [`BrushEngine`](crate::session::BrushEngine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerState {
    time_remaining: u32,
    is_active: bool,
    is_finished: bool,
    is_music_playing: bool,
}

impl TimerState {
    /// Creates a state with the full session ahead.
    pub fn new() -> Self {
        Self {
            time_remaining: TOTAL_SECONDS,
            is_active: false,
            is_finished: false,
            is_music_playing: false,
        }
    }

    /// Flips the active flag.
    ///
    /// Returns the new value, or `None` when the session is finished and
    /// nothing changed.
    pub fn toggle_active(&mut self) -> Option<bool> {
        if self.is_finished {
            return None;
        }
        self.is_active = !self.is_active;
        Some(self.is_active)
    }

    /// Counts one second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_active || self.is_finished || self.time_remaining == 0 {
            return TickOutcome::Ignored;
        }

        self.time_remaining -= 1;

        if self.time_remaining == 0 {
            self.is_active = false;
            self.is_finished = true;
            self.is_music_playing = false;
            return TickOutcome::Finished;
        }

        TickOutcome::Counted {
            remaining_seconds: self.time_remaining,
        }
    }

    /// Restores the initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Flips the music flag and returns the new value.
    pub fn toggle_music(&mut self) -> bool {
        self.is_music_playing = !self.is_music_playing;
        self.is_music_playing
    }

    /// Overrides the music flag (used when playback could not start).
    pub fn set_music_playing(&mut self, playing: bool) {
        self.is_music_playing = playing;
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn elapsed(&self) -> u32 {
        TOTAL_SECONDS - self.time_remaining
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    pub fn is_music_playing(&self) -> bool {
        self.is_music_playing
    }

    /// Index of the zone to brush right now.
    pub fn current_zone(&self) -> usize {
        zone_index_for(self.time_remaining)
    }

    /// The zone to brush right now.
    pub fn zone(&self) -> &'static Zone {
        &ZONES[self.current_zone()]
    }

    /// Fraction of the session still ahead, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        f64::from(self.time_remaining) / f64::from(TOTAL_SECONDS)
    }

    /// Returns the display phase.
    pub fn phase(&self) -> BrushPhase {
        if self.is_finished {
            BrushPhase::Finished
        } else if self.is_active {
            BrushPhase::Brushing
        } else if self.time_remaining == TOTAL_SECONDS {
            BrushPhase::Ready
        } else {
            BrushPhase::Paused
        }
    }

    /// Captures the current state for rendering.
    pub fn snapshot(&self) -> TimerSnapshot {
        let zone = self.zone();
        TimerSnapshot {
            phase: self.phase(),
            remaining_seconds: self.time_remaining,
            elapsed_seconds: self.elapsed(),
            is_active: self.is_active,
            is_finished: self.is_finished,
            is_music_playing: self.is_music_playing,
            zone: zone.index,
            zone_description: zone.description.to_string(),
            progress: self.progress(),
        }
    }
}

impl Default for TimerState {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TimerSnapshot
// ============================================================================

/// Read model handed to the view layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub phase: BrushPhase,
    pub remaining_seconds: u32,
    pub elapsed_seconds: u32,
    pub is_active: bool,
    pub is_finished: bool,
    pub is_music_playing: bool,
    pub zone: usize,
    pub zone_description: String,
    /// Remaining fraction shown by the timer ring
    pub progress: f64,
}

// ============================================================================
// Tests
// ============================================================================
