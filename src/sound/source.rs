//! Sound source selection.
//!
//! A channel plays either a user-supplied audio file or one of the tunes
//! synthesized in [`embedded`](super::embedded).

use std::path::{Path, PathBuf};

use tracing::warn;

use super::error::SoundError;

/// Represents the source of a sound to be played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoundSource {
    /// An audio file on disk.
    File {
        /// Display name (the file stem).
        name: String,
        /// Full path to the file.
        path: PathBuf,
    },
    /// A tune synthesized at runtime.
    Embedded {
        /// Name of the tune (e.g., "chime").
        name: String,
    },
}

impl SoundSource {
    /// Creates a file source without checking the path.
    #[must_use]
    pub fn file(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Creates a file source after checking that the file exists and has a
    /// supported extension.
    ///
    /// # Errors
    ///
    /// Returns `SoundError::UnsupportedFormat` or `SoundError::FileNotFound`.
    pub fn file_validated(path: impl Into<PathBuf>) -> Result<Self, SoundError> {
        let path = path.into();
        validate_sound_path(&path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::File { name, path })
    }

    /// Creates an embedded sound source.
    #[must_use]
    pub fn embedded(name: impl Into<String>) -> Self {
        Self::Embedded { name: name.into() }
    }

    /// Returns the name of the sound source.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Embedded { name } => name,
        }
    }
}

/// Name of the embedded looping tune.
pub const EMBEDDED_MUSIC: &str = "music";

/// Name of the embedded completion chime.
pub const EMBEDDED_CHIME: &str = "chime";

/// Extensions rodio decodes with its default features.
const SUPPORTED_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac"];

fn validate_sound_path(path: &Path) -> Result<(), SoundError> {
    let supported = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.as_str()));
    if !supported {
        return Err(SoundError::UnsupportedFormat(path.display().to_string()));
    }

    if !path.is_file() {
        return Err(SoundError::FileNotFound(path.display().to_string()));
    }

    Ok(())
}

/// Picks the source for a channel, falling back to the embedded tune when
/// the requested file cannot be used.
#[must_use]
pub fn resolve_source(requested: Option<&Path>, embedded_name: &str) -> SoundSource {
    match requested {
        Some(path) => match SoundSource::file_validated(path) {
            Ok(source) => source,
            Err(e) => {
                warn!("{} ({})", e, e.suggestion());
                SoundSource::embedded(embedded_name)
            }
        },
        None => SoundSource::embedded(embedded_name),
    }
}
