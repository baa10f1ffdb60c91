//! Interactive session loop.
//!
//! Everything runs on one task: stdin lines, ticks and Ctrl-C are
//! multiplexed with `tokio::select!` and applied to the engine in order.
//! Stdin is read on its own detached thread so a pending read never holds
//! the process open after the session ends.

use std::io::{self, BufRead};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, trace};

use super::engine::{BrushEngine, SessionEvent};
use super::ticker::{Tick, TokioTicker, TICK_PERIOD};
use crate::cli::{Display, InputCommand};
use crate::sound::{create_audio_controller, AudioController};
use crate::types::{BrushConfig, TimerSnapshot};

/// Lines read from the user, ending when the sender is dropped.
pub type InputLines = mpsc::UnboundedReceiver<io::Result<String>>;

/// Runs a session reading commands from stdin until `q`, EOF or Ctrl-C.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or JSON output fails.
pub async fn run(config: BrushConfig) -> Result<()> {
    let audio = create_audio_controller(&config);
    let input = spawn_stdin_reader().context("Failed to start input reader")?;
    run_with(config, audio, input, TICK_PERIOD).await?;
    Ok(())
}

/// Reads stdin line by line on a detached thread.
///
/// The thread stops at EOF, on a read error, or once the receiver is gone.
fn spawn_stdin_reader() -> io::Result<InputLines> {
    let (tx, rx) = mpsc::unbounded_channel();
    thread::Builder::new()
        .name("stdin-reader".to_string())
        .spawn(move || {
            for line in io::stdin().lock().lines() {
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
            trace!("Stdin reader finished");
        })?;
    Ok(rx)
}

/// Runs a session with the given audio controller, input lines and tick
/// period.
///
/// Returns the last frame shown before the session ended.
///
/// # Errors
///
/// Returns an error if the input cannot be read or JSON output fails.
pub async fn run_with(
    config: BrushConfig,
    audio: Box<dyn AudioController>,
    mut input: InputLines,
    tick_period: Duration,
) -> Result<TimerSnapshot> {
    let (tick_tx, mut tick_rx) = mpsc::unbounded_channel::<Tick>();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let ticker = TokioTicker::with_period(tick_tx, tick_period);
    let mut engine = BrushEngine::new(Box::new(ticker), audio, event_tx);
    let output = Output { json: config.json };

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    info!("Brushing session ready");
    let mut last_frame = output.frame(&engine)?;

    loop {
        tokio::select! {
            line = input.recv() => {
                let Some(line) = line else {
                    debug!("Input closed");
                    break;
                };
                let line = line.context("Failed to read input")?;
                match InputCommand::parse(&line) {
                    Some(InputCommand::Quit) => break,
                    Some(command) => apply(&mut engine, command, &output),
                    None => output.unknown(&line),
                }
            }
            Some(tick) = tick_rx.recv() => engine.handle_tick(tick),
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
        }

        while let Ok(event) = event_rx.try_recv() {
            output.event(&event)?;
        }
        last_frame = output.frame(&engine)?;
    }

    engine.reset();
    info!("Brushing session closed");
    Ok(last_frame)
}

fn apply(engine: &mut BrushEngine, command: InputCommand, output: &Output) {
    match command {
        InputCommand::StartOrPause => engine.start_or_pause(),
        InputCommand::Reset => engine.reset(),
        InputCommand::ToggleMusic => engine.toggle_music(),
        InputCommand::ShowZones => output.zones(),
        InputCommand::Help => output.help(),
        InputCommand::Quit => {}
    }
}

/// Text or JSON-lines output.
struct Output {
    json: bool,
}

impl Output {
    fn frame(&self, engine: &BrushEngine) -> Result<TimerSnapshot> {
        let snapshot = engine.snapshot();
        if self.json {
            print_json(&snapshot)?;
        } else {
            Display::show_frame(&snapshot);
        }
        Ok(snapshot)
    }

    fn event(&self, event: &SessionEvent) -> Result<()> {
        if self.json {
            print_json(event)
        } else {
            Display::show_event(event);
            Ok(())
        }
    }

    fn zones(&self) {
        if !self.json {
            Display::show_zones();
        }
    }

    fn help(&self) {
        if !self.json {
            Display::show_help();
        }
    }

    fn unknown(&self, line: &str) {
        if !self.json {
            Display::show_unknown(line);
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let line = serde_json::to_string(value).context("Failed to encode JSON output")?;
    println!("{}", line);
    Ok(())
}
