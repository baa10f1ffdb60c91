//! Sound system error types.
//!
//! Every variant is recoverable: the session keeps counting down whatever
//! happens to the audio.

use thiserror::Error;

/// Errors that can occur in the sound playback system.
#[derive(Debug, Error)]
pub enum SoundError {
    /// Audio device is not available (e.g., no speakers connected).
    #[error("aucune sortie audio disponible : {0}")]
    DeviceNotAvailable(String),

    /// Sound file was not found at the specified path.
    #[error("fichier son introuvable : {0}")]
    FileNotFound(String),

    /// The file extension is not one rodio can decode.
    #[error("format de fichier son non pris en charge : {0}")]
    UnsupportedFormat(String),

    /// Failed to decode the audio file.
    #[error("impossible de décoder le fichier son : {0}")]
    DecodeError(String),

    /// Failed to create the audio output stream.
    #[error("impossible de créer le flux audio : {0}")]
    StreamError(String),

    /// Generic sound playback error.
    #[error("erreur de lecture audio : {0}")]
    PlaybackError(String),
}

impl SoundError {
    /// Returns true if this error is related to device availability.
    #[must_use]
    pub fn is_device_error(&self) -> bool {
        matches!(self, Self::DeviceNotAvailable(_) | Self::StreamError(_))
    }

    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::DeviceNotAvailable(_) => "Branche un casque ou des haut-parleurs",
            Self::FileNotFound(_) => "La mélodie intégrée sera utilisée",
            Self::UnsupportedFormat(_) => "Utilise un fichier wav, mp3, ogg ou flac",
            Self::DecodeError(_) => "Le fichier son est peut-être abîmé",
            Self::StreamError(_) => "Vérifie les réglages audio",
            Self::PlaybackError(_) => "Relance le minuteur",
        }
    }
}
