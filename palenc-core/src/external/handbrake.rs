//! HandBrakeCLI argument assembly and process execution.
//!
//! The argument list is built in three ordered segments: the fixed PAL-DVD
//! baseline profile, the audio segment, and the subtitle segment. The audio
//! and subtitle segments are omitted entirely when their selection is empty
//! (no placeholder tokens). Assembly is pure; only [`EncodeExecutor`]
//! touches the outside world.

use std::path::Path;
use std::process::{Command, Stdio};

use serde::{Deserialize, Serialize};

use crate::error::{command_failed_error, command_start_error, CoreResult};
use crate::processing::subtitles::SelectedSubtitle;

/// Fixed baseline HandBrakeCLI profile.
///
/// These values are configuration constants tuned for PAL-DVD source
/// material (720×576, interlaced, analog noise); nothing here is computed
/// from the input file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncodeProfile {
    /// Video encoder identity (`--encoder`)
    pub encoder: String,
    /// Encoder speed/quality preset (`--encoder-preset`)
    pub encoder_preset: String,
    /// Encoder profile (`--encoder-profile`)
    pub encoder_profile: String,
    /// Constant-quality RF value (`--quality`)
    pub quality: f32,
    /// Crop mode handed to HandBrake (`--crop-mode`)
    pub crop_mode: String,
    /// Sharpen filter strength (`--lapsharp=`)
    pub lapsharp: String,
    /// Denoise filter strength (`--hqdn3d=`)
    pub hqdn3d: String,
    /// Audio encoder (`--aencoder`); `copy` passes source tracks through
    pub audio_encoder: String,
    /// Codecs allowed through when the audio encoder is `copy`
    pub audio_copy_mask: String,
    /// Fallback audio encoder when a source codec is not in the copy mask
    pub audio_fallback: String,
    /// Native language hint written into the container (`--native-language`)
    pub native_language: String,
    /// Output container (`--format`)
    pub format: String,
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            encoder: "x265".to_string(),
            encoder_preset: "medium".to_string(),
            encoder_profile: "main10".to_string(),
            quality: 17.5,
            crop_mode: "auto".to_string(),
            lapsharp: "light".to_string(),
            hqdn3d: "light".to_string(),
            audio_encoder: "copy".to_string(),
            audio_copy_mask: "ac3,aac,eac3,truehd,dts,dtshd,flac".to_string(),
            audio_fallback: "av_aac".to_string(),
            native_language: "deu".to_string(),
            format: "av_mkv".to_string(),
        }
    }
}

impl EncodeProfile {
    /// Renders the baseline profile tokens, in their fixed order.
    fn baseline_args(&self) -> Vec<String> {
        vec![
            "--encoder".to_string(),
            self.encoder.clone(),
            "--encoder-preset".to_string(),
            self.encoder_preset.clone(),
            "--encoder-profile".to_string(),
            self.encoder_profile.clone(),
            "--quality".to_string(),
            self.quality.to_string(),
            "--vfr".to_string(),
            "--crop-mode".to_string(),
            self.crop_mode.clone(),
            "--auto-anamorphic".to_string(),
            format!("--lapsharp={}", self.lapsharp),
            format!("--hqdn3d={}", self.hqdn3d),
            "--aencoder".to_string(),
            self.audio_encoder.clone(),
            "--audio-copy-mask".to_string(),
            self.audio_copy_mask.clone(),
            "--audio-fallback".to_string(),
            self.audio_fallback.clone(),
            "--native-language".to_string(),
            self.native_language.clone(),
            "--markers".to_string(),
            "--turbo".to_string(),
            "--format".to_string(),
            self.format.clone(),
        ]
    }
}

/// Builder assembling one complete HandBrakeCLI argument list.
pub struct HandbrakeCommandBuilder<'a> {
    input: &'a Path,
    output: &'a Path,
    profile: &'a EncodeProfile,
    audio_indices: &'a [usize],
    audio_names: &'a [String],
    subtitles: &'a [SelectedSubtitle],
}

impl<'a> HandbrakeCommandBuilder<'a> {
    #[must_use]
    pub fn new(input: &'a Path, output: &'a Path, profile: &'a EncodeProfile) -> Self {
        Self {
            input,
            output,
            profile,
            audio_indices: &[],
            audio_names: &[],
            subtitles: &[],
        }
    }

    /// Sets the selected 1-based audio track indices and the fixed display
    /// names that positionally match the configured language preference.
    #[must_use]
    pub fn with_audio(mut self, indices: &'a [usize], names: &'a [String]) -> Self {
        self.audio_indices = indices;
        self.audio_names = names;
        self
    }

    /// Sets the subtitle selection, already sorted by rule priority.
    #[must_use]
    pub fn with_subtitles(mut self, subtitles: &'a [SelectedSubtitle]) -> Self {
        self.subtitles = subtitles;
        self
    }

    /// Builds the ordered argument list: input/output, baseline profile,
    /// audio segment, subtitle segment.
    #[must_use]
    pub fn build(self) -> Vec<String> {
        let mut args = vec![
            "--input".to_string(),
            self.input.to_string_lossy().into_owned(),
            "--output".to_string(),
            self.output.to_string_lossy().into_owned(),
        ];
        args.extend(self.profile.baseline_args());

        if !self.audio_indices.is_empty() {
            args.push("--audio".to_string());
            args.push(
                self.audio_indices
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(","),
            );
            args.push("--aname".to_string());
            args.push(self.audio_names.join(","));
        }

        if !self.subtitles.is_empty() {
            args.push("--subtitle-burned=none".to_string());
            args.push("--subtitle".to_string());
            args.push(
                self.subtitles
                    .iter()
                    .map(|s| s.track.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            );
            args.push("--subname".to_string());
            args.push(
                self.subtitles
                    .iter()
                    .map(|s| s.rule_name.as_str())
                    .collect::<Vec<_>>()
                    .join(","),
            );
            // The container default is always the highest-priority selected
            // track, independent of each rule's own default flag.
            args.push("--subtitle-default".to_string());
            args.push(self.subtitles[0].track.to_string());
        }

        args
    }
}

/// Trait for running the external encoder.
pub trait EncodeExecutor {
    /// Runs `program` with `args`, blocking until it exits.
    ///
    /// Returns [`crate::error::CoreError::ToolMissing`] when the binary is
    /// absent, [`crate::error::CoreError::CommandFailed`] on a non-zero
    /// exit.
    fn execute(&self, program: &Path, args: &[String]) -> CoreResult<()>;
}

/// [`EncodeExecutor`] that spawns the real HandBrakeCLI process.
///
/// stdout is inherited so HandBrake's own progress output stays visible;
/// stderr is captured for the failure diagnostic.
#[derive(Debug, Clone, Default)]
pub struct SystemEncodeExecutor;

impl SystemEncodeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl EncodeExecutor for SystemEncodeExecutor {
    fn execute(&self, program: &Path, args: &[String]) -> CoreResult<()> {
        let tool = program.to_string_lossy().into_owned();
        log::debug!("Running encoder: {} {}", tool, args.join(" "));

        let child = Command::new(program)
            .args(args)
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| command_start_error(tool.clone(), e))?;

        let output = child
            .wait_with_output()
            .map_err(|e| command_start_error(tool.clone(), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(command_failed_error(tool, output.status, stderr.trim()));
        }

        Ok(())
    }
}
