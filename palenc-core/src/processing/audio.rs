//! Audio track selection.
//!
//! Picks at most one audio stream per preferred language, in preference
//! order. The result is what HandBrake's `--audio` flag wants: 1-based
//! track numbers.

use crate::external::mediainfo::AudioStream;

/// Selects audio tracks by language preference.
///
/// For each language in `preference` (most wanted first), the first stream
/// carrying that language contributes its 1-based index to the result. A
/// language with no matching stream contributes nothing; a language never
/// claims more than one stream. Result order follows `preference`, not
/// stream appearance.
#[must_use]
pub fn select_audio_tracks(streams: &[AudioStream], preference: &[String]) -> Vec<usize> {
    let mut indices = Vec::new();

    for lang in preference {
        let found = streams
            .iter()
            .find(|stream| stream.language.as_deref() == Some(lang.as_str()));
        if let Some(stream) = found {
            indices.push(stream.index + 1);
        }
    }

    indices
}
