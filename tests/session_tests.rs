//! End-to-end tests for a brushing session.
//!
//! These tests drive the engine the way the run loop does:
//! - Full two-minute session with zone changes and completion
//! - Reset from every phase
//! - Music toggling while counting down
//! - Real tokio ticker with a shortened period

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use brush_timer::session::{BrushEngine, MockTicker, SessionEvent, Ticker, TokioTicker};
use brush_timer::sound::MockAudioController;
use brush_timer::types::{BrushPhase, TimerState, TOTAL_SECONDS, ZONES, ZONE_COUNT};

// ============================================================================
// Test Helpers
// ============================================================================

struct Session {
    engine: BrushEngine,
    ticker: MockTicker,
    audio: MockAudioController,
    events: mpsc::UnboundedReceiver<SessionEvent>,
}

fn create_session() -> Session {
    let (tx, events) = mpsc::unbounded_channel();
    let ticker = MockTicker::new();
    let audio = MockAudioController::new();
    let engine = BrushEngine::new(Box::new(ticker.clone()), Box::new(audio.clone()), tx);
    Session {
        engine,
        ticker,
        audio,
        events,
    }
}

impl Session {
    fn tick(&mut self, count: u32) {
        for _ in 0..count {
            let tick = self.ticker.current_tick();
            self.engine.handle_tick(tick);
        }
    }

    fn drain(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            events.push(event);
        }
        events
    }
}

// ============================================================================
// Full Session
// ============================================================================

#[test]
fn full_session_walks_every_zone_and_finishes_once() {
    let mut s = create_session();

    s.engine.start_or_pause();
    s.tick(15);
    assert_eq!(s.engine.current_zone(), 1);
    assert_eq!(s.engine.state().time_remaining(), 105);

    s.tick(TOTAL_SECONDS - 15);

    let state = s.engine.state();
    assert!(state.is_finished());
    assert!(!state.is_active());
    assert!(!state.is_music_playing());
    assert_eq!(state.time_remaining(), 0);
    assert_eq!(s.audio.chime_count(), 1);
    assert!(!s.ticker.is_armed());

    let events = s.drain();
    let zones: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            SessionEvent::ZoneChanged { zone } => Some(*zone),
            _ => None,
        })
        .collect();
    assert_eq!(zones, (1..ZONE_COUNT).collect::<Vec<_>>());

    let finished = events
        .iter()
        .filter(|e| **e == SessionEvent::Finished)
        .count();
    assert_eq!(finished, 1);
}

#[test]
fn remaining_time_never_goes_negative() {
    let mut s = create_session();
    s.engine.start_or_pause();

    let mut previous = s.engine.state().time_remaining();
    for _ in 0..TOTAL_SECONDS + 10 {
        s.engine.tick();
        let remaining = s.engine.state().time_remaining();
        assert!(remaining <= previous);
        previous = remaining;
    }
    assert_eq!(previous, 0);
    assert_eq!(s.audio.chime_count(), 1);
}

#[test]
fn zone_checkpoints() {
    let mut s = create_session();
    s.engine.start_or_pause();
    assert_eq!(s.engine.current_zone(), 0);

    s.tick(15);
    assert_eq!(s.engine.current_zone(), 1);

    s.tick(TOTAL_SECONDS - 15 - 1);
    assert_eq!(s.engine.state().time_remaining(), 1);
    assert_eq!(s.engine.current_zone(), 7);

    s.tick(1);
    assert_eq!(s.engine.current_zone(), 7);
    assert_eq!(
        s.engine.snapshot().zone_description,
        ZONES[ZONE_COUNT - 1].description
    );
}

#[test]
fn pause_holds_the_countdown() {
    let mut s = create_session();
    s.engine.start_or_pause();
    s.tick(20);
    s.engine.start_or_pause();

    assert_eq!(s.engine.snapshot().phase, BrushPhase::Paused);
    s.engine.tick();
    assert_eq!(s.engine.state().time_remaining(), 100);

    s.engine.start_or_pause();
    s.tick(1);
    assert_eq!(s.engine.state().time_remaining(), 99);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_restores_initial_state_from_every_phase() {
    let setups: [fn(&mut Session); 4] = [
        |_| {},
        |s| {
            s.engine.start_or_pause();
            s.tick(30);
        },
        |s| {
            s.engine.start_or_pause();
            s.tick(30);
            s.engine.toggle_music();
            s.engine.start_or_pause();
        },
        |s| {
            s.engine.start_or_pause();
            s.tick(TOTAL_SECONDS);
        },
    ];

    for setup in setups {
        let mut s = create_session();
        setup(&mut s);

        s.engine.reset();

        assert_eq!(*s.engine.state(), TimerState::new());
        assert_eq!(s.engine.snapshot().phase, BrushPhase::Ready);
        assert!(!s.ticker.is_armed());
        assert!(!s.audio.is_music_playing());
    }
}

#[test]
fn finished_session_only_leaves_via_reset() {
    let mut s = create_session();
    s.engine.start_or_pause();
    s.tick(TOTAL_SECONDS);
    let finished = s.engine.snapshot();

    s.engine.start_or_pause();
    s.engine.tick();
    s.engine.toggle_music();
    s.engine.toggle_music();

    let after = s.engine.snapshot();
    assert_eq!(after.remaining_seconds, finished.remaining_seconds);
    assert!(after.is_finished);
    assert!(!after.is_active);

    s.engine.reset();
    assert!(!s.engine.state().is_finished());
}

// ============================================================================
// Music
// ============================================================================

#[test]
fn music_toggle_leaves_countdown_alone() {
    let mut s = create_session();
    s.engine.start_or_pause();
    s.tick(7);

    for _ in 0..4 {
        let before = s.engine.snapshot();
        s.engine.toggle_music();
        let after = s.engine.snapshot();

        assert_eq!(after.remaining_seconds, before.remaining_seconds);
        assert_eq!(after.is_active, before.is_active);
        assert_eq!(after.is_finished, before.is_finished);
        assert_ne!(after.is_music_playing, before.is_music_playing);
    }
    assert_eq!(s.audio.chime_count(), 0);
}

#[test]
fn reset_rewinds_music() {
    let mut s = create_session();
    s.engine.toggle_music();
    s.engine.reset();

    let calls = s.audio.calls();
    assert_eq!(calls.play_music, 1);
    assert_eq!(calls.stop_music, 1);
    assert!(!s.engine.state().is_music_playing());
}

// ============================================================================
// Real Ticker
// ============================================================================

#[tokio::test]
async fn tokio_ticker_drives_the_engine() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let (event_tx, _events) = mpsc::unbounded_channel();
    let audio = MockAudioController::new();
    let ticker = TokioTicker::with_period(tick_tx, Duration::from_millis(2));
    let mut engine = BrushEngine::new(Box::new(ticker), Box::new(audio.clone()), event_tx);

    engine.start_or_pause();

    let result = timeout(Duration::from_secs(10), async {
        while !engine.state().is_finished() {
            let tick = tick_rx.recv().await.expect("ticker stopped");
            engine.handle_tick(tick);
        }
    })
    .await;

    assert!(result.is_ok(), "session did not finish in time");
    assert_eq!(engine.state().time_remaining(), 0);
    assert_eq!(audio.chime_count(), 1);

    // Leftover ticks queued before the disarm are dropped
    tokio::time::sleep(Duration::from_millis(20)).await;
    while let Ok(tick) = tick_rx.try_recv() {
        engine.handle_tick(tick);
    }
    assert_eq!(audio.chime_count(), 1);
    assert!(tick_rx.try_recv().is_err());
}

#[tokio::test]
async fn paused_session_receives_no_ticks() {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel();
    let (event_tx, _events) = mpsc::unbounded_channel();
    let ticker = TokioTicker::with_period(tick_tx, Duration::from_millis(5));
    let mut engine = BrushEngine::new(
        Box::new(ticker),
        Box::new(MockAudioController::new()),
        event_tx,
    );

    engine.start_or_pause();
    let tick = timeout(Duration::from_secs(1), tick_rx.recv())
        .await
        .unwrap()
        .unwrap();
    engine.handle_tick(tick);
    engine.start_or_pause();

    let remaining = engine.state().time_remaining();
    tokio::time::sleep(Duration::from_millis(30)).await;
    while let Ok(tick) = tick_rx.try_recv() {
        engine.handle_tick(tick);
    }
    assert_eq!(engine.state().time_remaining(), remaining);
}
