//! MediaInfo integration for enumerating audio and subtitle streams.
//!
//! Runs `mediainfo --Output=JSON` against a source file and reduces the
//! answer to the attributes track selection needs: per-kind stream index,
//! language, stream size, the track's share of the total stream size, and
//! its default flag.

use serde::Deserialize;
use std::path::Path;
use std::process::Command;

use crate::error::{command_start_error, CoreError, CoreResult};

/// One audio stream as reported by the metadata tool.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStream {
    /// 0-based position among the file's audio streams
    pub index: usize,
    /// ISO-639-ish language code, if the container carries one
    pub language: Option<String>,
}

/// One text (subtitle) stream as reported by the metadata tool.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleStream {
    /// 0-based position among the file's text streams
    pub index: usize,
    /// ISO-639-ish language code, if the container carries one
    pub language: Option<String>,
    /// Size of this track in bytes
    pub size_bytes: Option<u64>,
    /// Fraction of the file's total stream size this track occupies, in [0, 1]
    pub proportion: f64,
    /// Whether the container flags this track as default
    pub default_flagged: bool,
}

/// Immutable snapshot of a file's selectable streams, produced fresh on
/// each read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaStreams {
    pub audio: Vec<AudioStream>,
    pub text: Vec<SubtitleStream>,
}

/// Trait for reading stream metadata from a media file.
///
/// Allows tests to inject canned metadata instead of shelling out to the
/// mediainfo binary.
pub trait MetadataReader {
    /// Enumerates the audio and text streams of `path`.
    ///
    /// Fails with [`CoreError::MetadataUnavailable`] when the file cannot
    /// be opened or parsed, or [`CoreError::ToolMissing`] when the
    /// mediainfo binary is absent. Callers are expected to degrade either
    /// failure to an empty [`MediaStreams`] and keep going.
    fn read(&self, path: &Path) -> CoreResult<MediaStreams>;
}

// ---- mediainfo JSON shape (all scalar values arrive as strings) ----

#[derive(Debug, Clone, Deserialize)]
struct MediainfoTrack {
    #[serde(rename = "@type")]
    track_type: String,
    #[serde(rename = "Language")]
    language: Option<String>,
    #[serde(rename = "StreamSize")]
    stream_size: Option<String>,
    #[serde(rename = "StreamSize_Proportion")]
    stream_size_proportion: Option<String>,
    #[serde(rename = "Default")]
    default: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct MediainfoMedia {
    #[serde(default)]
    track: Vec<MediainfoTrack>,
}

#[derive(Debug, Clone, Deserialize)]
struct MediainfoResponse {
    media: Option<MediainfoMedia>,
}

/// Concrete [`MetadataReader`] backed by the `mediainfo` CLI.
#[derive(Debug, Clone, Default)]
pub struct MediainfoReader;

impl MediainfoReader {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MetadataReader for MediainfoReader {
    fn read(&self, path: &Path) -> CoreResult<MediaStreams> {
        log::debug!("Running mediainfo on: {}", path.display());

        let output = Command::new("mediainfo")
            .arg("--Output=JSON")
            .arg(path)
            .output()
            .map_err(|e| command_start_error("mediainfo", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(CoreError::MetadataUnavailable(format!(
                "mediainfo exited with {} for {}: {}",
                output.status,
                path.display(),
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let response: MediainfoResponse = serde_json::from_str(&stdout).map_err(|e| {
            CoreError::MetadataUnavailable(format!(
                "Failed to parse mediainfo JSON for {}: {}",
                path.display(),
                e
            ))
        })?;

        let tracks = response.media.map(|m| m.track).unwrap_or_default();
        Ok(streams_from_tracks(&tracks))
    }
}

/// Reduces raw mediainfo tracks to the selectable-stream snapshot.
///
/// Indices count per kind: the third `Text` track has index 2 no matter
/// how many audio or video tracks precede it in the container.
fn streams_from_tracks(tracks: &[MediainfoTrack]) -> MediaStreams {
    let mut streams = MediaStreams::default();

    for track in tracks {
        match track.track_type.as_str() {
            "Audio" => {
                streams.audio.push(AudioStream {
                    index: streams.audio.len(),
                    language: track.language.clone(),
                });
            }
            "Text" => {
                streams.text.push(SubtitleStream {
                    index: streams.text.len(),
                    language: track.language.clone(),
                    size_bytes: track
                        .stream_size
                        .as_deref()
                        .and_then(|s| s.parse::<u64>().ok()),
                    proportion: track
                        .stream_size_proportion
                        .as_deref()
                        .and_then(|s| s.parse::<f64>().ok())
                        .unwrap_or(0.0),
                    default_flagged: track.default.as_deref() == Some("Yes"),
                });
            }
            _ => {}
        }
    }

    streams
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_JSON: &str = r#"{
        "media": {
            "@ref": "movie.mkv",
            "track": [
                { "@type": "General", "Format": "Matroska" },
                { "@type": "Video", "Format": "MPEG Video", "Width": "720", "Height": "576" },
                { "@type": "Audio", "Format": "AC-3", "Language": "de", "Default": "Yes" },
                { "@type": "Audio", "Format": "AC-3", "Language": "en", "Default": "No" },
                { "@type": "Text", "Language": "de", "StreamSize": "5000",
                  "StreamSize_Proportion": "0.00005", "Default": "No" },
                { "@type": "Text", "Language": "en", "StreamSize": "48000",
                  "StreamSize_Proportion": "0.00048", "Default": "No" }
            ]
        }
    }"#;

    #[test]
    fn parses_audio_and_text_tracks() {
        let response: MediainfoResponse = serde_json::from_str(SAMPLE_JSON).unwrap();
        let streams = streams_from_tracks(&response.media.unwrap().track);

        assert_eq!(streams.audio.len(), 2);
        assert_eq!(streams.audio[0].index, 0);
        assert_eq!(streams.audio[0].language.as_deref(), Some("de"));
        assert_eq!(streams.audio[1].index, 1);
        assert_eq!(streams.audio[1].language.as_deref(), Some("en"));

        assert_eq!(streams.text.len(), 2);
        assert_eq!(streams.text[0].index, 0);
        assert_eq!(streams.text[0].size_bytes, Some(5000));
        assert!((streams.text[0].proportion - 0.00005).abs() < 1e-12);
        assert!(!streams.text[0].default_flagged);
        assert_eq!(streams.text[1].language.as_deref(), Some("en"));
    }

    #[test]
    fn text_indices_count_per_kind() {
        // Text tracks are indexed among themselves, ignoring the video and
        // audio tracks that precede them in the container.
        let response: MediainfoResponse = serde_json::from_str(SAMPLE_JSON).unwrap();
        let streams = streams_from_tracks(&response.media.unwrap().track);
        let indices: Vec<usize> = streams.text.iter().map(|t| t.index).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn missing_media_yields_empty_streams() {
        let response: MediainfoResponse =
            serde_json::from_str(r#"{ "media": null }"#).unwrap();
        let tracks = response.media.map(|m| m.track).unwrap_or_default();
        assert_eq!(streams_from_tracks(&tracks), MediaStreams::default());
    }

    #[test]
    fn unparsable_proportion_defaults_to_zero() {
        let json = r#"{
            "media": { "track": [
                { "@type": "Text", "Language": "de", "StreamSize_Proportion": "n/a" }
            ] }
        }"#;
        let response: MediainfoResponse = serde_json::from_str(json).unwrap();
        let streams = streams_from_tracks(&response.media.unwrap().track);
        assert_eq!(streams.text[0].proportion, 0.0);
        assert_eq!(streams.text[0].size_bytes, None);
    }
}
