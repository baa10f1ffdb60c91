//! Embedded tunes.
//!
//! Both tunes are synthesized from sine waves so the binary works without
//! any audio file: a short looping melody for the music channel and a
//! rising "level complete" arpeggio for the completion chime.

use std::time::Duration;

use rodio::source::{from_iter, SineWave, Source};

/// Output gain applied to every synthesized note.
const VOLUME: f32 = 0.2;

/// A rest is a zero-frequency note.
const REST: f32 = 0.0;

/// Looping melody as (frequency Hz, duration ms).
const MUSIC_NOTES: &[(f32, u64)] = &[
    (523.25, 250), // C5
    (659.25, 250), // E5
    (783.99, 250), // G5
    (659.25, 250), // E5
    (698.46, 250), // F5
    (880.00, 250), // A5
    (783.99, 500), // G5
    (REST, 125),
    (659.25, 250), // E5
    (587.33, 250), // D5
    (523.25, 250), // C5
    (587.33, 250), // D5
    (659.25, 500), // E5
    (523.25, 500), // C5
    (REST, 250),
];

/// Completion arpeggio as (frequency Hz, duration ms).
const CHIME_NOTES: &[(f32, u64)] = &[
    (523.25, 120),  // C5
    (659.25, 120),  // E5
    (783.99, 120),  // G5
    (1046.50, 450), // C6
];

fn melody(notes: &'static [(f32, u64)]) -> impl Source<Item = f32> + Send + 'static {
    let voices: Vec<_> = notes
        .iter()
        .map(|&(freq, millis)| {
            SineWave::new(freq)
                .take_duration(Duration::from_millis(millis))
                .amplify(VOLUME)
        })
        .collect();
    from_iter(voices)
}

/// Returns the background melody, repeating forever.
#[must_use]
pub fn music_source() -> impl Source<Item = f32> + Send + 'static {
    melody(MUSIC_NOTES).repeat_infinite()
}

/// Returns the one-shot completion chime.
#[must_use]
pub fn chime_source() -> impl Source<Item = f32> + Send + 'static {
    melody(CHIME_NOTES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chime_is_short() {
        let millis: u64 = CHIME_NOTES.iter().map(|&(_, millis)| millis).sum();
        assert_eq!(millis, 810);
    }

    #[test]
    fn test_chime_rises() {
        let freqs: Vec<f32> = CHIME_NOTES.iter().map(|&(f, _)| f).collect();
        assert!(freqs.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_chime_samples_stay_in_range() {
        let samples: Vec<f32> = chime_source().take(2000).collect();
        assert_eq!(samples.len(), 2000);
        assert!(samples.iter().all(|s| s.abs() <= VOLUME + f32::EPSILON));
    }

    #[test]
    fn test_chime_ends() {
        assert!(chime_source().count() > 0);
    }

    #[test]
    fn test_music_keeps_going() {
        assert_eq!(music_source().take(10_000).count(), 10_000);
    }
}
