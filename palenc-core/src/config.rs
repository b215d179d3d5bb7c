//! Configuration structures for the palenc core library.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library
//! (like palenc-cli) and passed to [`crate::processing::batch::process_videos`]
//! to control discovery, selection and encoding behavior. All fields have
//! defaults tuned for PAL-DVD source material.

use std::path::PathBuf;

use crate::error::{CoreError, CoreResult};
use crate::external::handbrake::EncodeProfile;
use crate::processing::subtitles::SubtitleRule;

/// Audio languages picked from the source, in order of preference.
pub const DEFAULT_AUDIO_LANGUAGES: [&str; 2] = ["de", "en"];

/// Display names written into the container, positionally matching
/// [`DEFAULT_AUDIO_LANGUAGES`].
pub const DEFAULT_AUDIO_NAMES: [&str; 2] = ["Deutsch", "English"];

/// Extension given to every encoded output file.
pub const OUTPUT_EXTENSION: &str = "mkv";

/// Main configuration structure for the palenc-core library.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    // ---- Path Configuration ----
    /// Directory watched for new source files
    pub input_dir: PathBuf,

    /// Directory where encoded output files are saved
    pub output_dir: PathBuf,

    /// Line-oriented ledger of already-processed basenames
    pub ledger_path: PathBuf,

    /// Path to the HandBrakeCLI binary
    pub handbrake_path: PathBuf,

    // ---- Track Selection ----
    /// Audio language preference, most wanted first
    pub audio_languages: Vec<String>,

    /// Container display names for the audio tracks, one per entry in
    /// `audio_languages` (fixed mapping, never derived from the stream)
    pub audio_names: Vec<String>,

    /// Ordered subtitle rule table; each rule claims at most one stream
    pub subtitle_rules: Vec<SubtitleRule>,

    // ---- Encoding ----
    /// Fixed baseline HandBrakeCLI profile
    pub profile: EncodeProfile,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("videos/input"),
            output_dir: PathBuf::from("videos/output"),
            ledger_path: PathBuf::from("temp/processed_files.txt"),
            handbrake_path: PathBuf::from("HandBrakeCLI"),
            audio_languages: DEFAULT_AUDIO_LANGUAGES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            audio_names: DEFAULT_AUDIO_NAMES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            subtitle_rules: SubtitleRule::default_rules(),
            profile: EncodeProfile::default(),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with the given directories and defaults for
    /// everything else.
    pub fn new(input_dir: PathBuf, output_dir: PathBuf, ledger_path: PathBuf) -> Self {
        Self {
            input_dir,
            output_dir,
            ledger_path,
            ..Default::default()
        }
    }

    /// Validates configuration consistency.
    ///
    /// The output directory and the ledger's parent are created on demand
    /// by the pipeline, so only the input directory has to exist up front.
    pub fn validate(&self) -> CoreResult<()> {
        if !self.input_dir.is_dir() {
            return Err(CoreError::Config(format!(
                "Input directory not found: {}",
                self.input_dir.display()
            )));
        }

        if self.audio_languages.is_empty() {
            return Err(CoreError::Config(
                "Audio language preference list must not be empty".to_string(),
            ));
        }

        if self.audio_languages.len() != self.audio_names.len() {
            return Err(CoreError::Config(format!(
                "Audio display names ({}) must match the preference list ({})",
                self.audio_names.len(),
                self.audio_languages.len()
            )));
        }

        let mut priorities: Vec<i32> = self.subtitle_rules.iter().map(|r| r.priority).collect();
        priorities.sort_unstable();
        priorities.dedup();
        if priorities.len() != self.subtitle_rules.len() {
            return Err(CoreError::Config(
                "Subtitle rules must have distinct priorities".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_consistent() {
        let config = CoreConfig::default();
        assert_eq!(config.audio_languages.len(), config.audio_names.len());
        assert_eq!(config.subtitle_rules.len(), 3);
    }

    #[test]
    fn validate_rejects_mismatched_audio_names() {
        let dir = std::env::temp_dir();
        let mut config = CoreConfig::new(dir.clone(), dir.clone(), dir.join("ledger.txt"));
        config.audio_names.pop();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_duplicate_rule_priorities() {
        let dir = std::env::temp_dir();
        let mut config = CoreConfig::new(dir.clone(), dir.clone(), dir.join("ledger.txt"));
        config.subtitle_rules[1].priority = config.subtitle_rules[0].priority;
        assert!(config.validate().is_err());
    }
}
