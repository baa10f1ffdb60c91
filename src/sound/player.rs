//! Audio controller implementation using rodio.
//!
//! The music channel owns a single `Sink` that is paused and resumed in
//! place; stopping drops it so the next play starts from the beginning.
//! The chime gets a fresh detached sink every time.

use std::fs::File;
use std::io::BufReader;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::embedded::{chime_source, music_source};
use super::error::SoundError;
use super::source::SoundSource;
use super::AudioController;

/// Plays the music loop and the completion chime through the default
/// output device.
///
/// Not `Send`: the output stream must stay on the thread that created it.
pub struct RodioAudioController {
    /// The audio output stream (must be kept alive for playback).
    _stream: OutputStream,
    /// Handle to the output stream for creating sinks.
    stream_handle: OutputStreamHandle,
    music: SoundSource,
    chime: SoundSource,
    /// Present while the music is playing or paused.
    music_sink: Option<Sink>,
}

impl RodioAudioController {
    /// Opens the default output device.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::DeviceNotAvailable` if no audio output device
    /// is available.
    pub fn new(music: SoundSource, chime: SoundSource) -> Result<Self, SoundError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| SoundError::DeviceNotAvailable(e.to_string()))?;

        debug!(
            "Audio output stream initialized (music: {}, chime: {})",
            music.name(),
            chime.name()
        );

        Ok(Self {
            _stream: stream,
            stream_handle,
            music,
            chime,
            music_sink: None,
        })
    }

    fn new_sink(&self) -> Result<Sink, SoundError> {
        Sink::try_new(&self.stream_handle).map_err(|e| SoundError::StreamError(e.to_string()))
    }

    /// Fills a sink with the music loop, falling back to the embedded tune.
    fn load_music(&self, sink: &Sink) {
        if let SoundSource::File { path, name } = &self.music {
            match open_file(path) {
                Ok(reader) => {
                    let decoder = Decoder::new_looped(reader)
                        .map_err(|e| SoundError::DecodeError(e.to_string()));
                    match decoder {
                        Ok(decoder) => {
                            debug!("Looping music file: {}", name);
                            sink.append(decoder);
                            return;
                        }
                        Err(e) => warn!("Cannot loop '{}': {}, using embedded music", name, e),
                    }
                }
                Err(e) => warn!("Cannot open '{}': {}, using embedded music", name, e),
            }
        }

        sink.append(music_source());
    }

    /// Plays the chime file, falling back to the embedded chime.
    fn load_chime(&self, sink: &Sink) {
        if let SoundSource::File { path, name } = &self.chime {
            let decoder = open_file(path).and_then(|reader| {
                Decoder::new(reader).map_err(|e| SoundError::DecodeError(e.to_string()))
            });
            match decoder {
                Ok(decoder) => {
                    debug!("Playing chime file: {}", name);
                    sink.append(decoder);
                    return;
                }
                Err(e) => warn!("Cannot play '{}': {}, using embedded chime", name, e),
            }
        }

        sink.append(chime_source());
    }
}

fn open_file(path: &std::path::Path) -> Result<BufReader<File>, SoundError> {
    let file = File::open(path)
        .map_err(|e| SoundError::FileNotFound(format!("{}: {}", path.display(), e)))?;
    Ok(BufReader::new(file))
}

impl AudioController for RodioAudioController {
    fn play_music(&mut self) -> Result<(), SoundError> {
        if let Some(sink) = &self.music_sink {
            sink.play();
            debug!("Music resumed");
            return Ok(());
        }

        let sink = self.new_sink()?;
        self.load_music(&sink);
        sink.play();
        self.music_sink = Some(sink);
        debug!("Music started");
        Ok(())
    }

    fn pause_music(&mut self) {
        if let Some(sink) = &self.music_sink {
            sink.pause();
            debug!("Music paused");
        }
    }

    fn stop_music(&mut self) {
        if let Some(sink) = self.music_sink.take() {
            sink.stop();
            debug!("Music stopped and rewound");
        }
    }

    fn play_chime(&mut self) -> Result<(), SoundError> {
        let sink = self.new_sink()?;
        self.load_chime(&sink);
        sink.detach(); // Non-blocking: chime continues after function returns

        debug!("Chime playback started (detached)");
        Ok(())
    }
}

impl std::fmt::Debug for RodioAudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RodioAudioController")
            .field("music", &self.music)
            .field("chime", &self.chime)
            .field("music_loaded", &self.music_sink.is_some())
            .finish_non_exhaustive()
    }
}
