//! Subtitle track selection.
//!
//! Subtitle streams are classified against an ordered rule table. Each rule
//! describes one semantic category of track (forced foreign-dialogue,
//! native full, secondary full) and fires at most once per file, so noisy
//! source authoring can never multiply the tracks in the output. The
//! proportion heuristic separates "runs the whole movie" subtitles from
//! occasional foreign-dialogue captions.

use serde::{Deserialize, Serialize};

use crate::external::mediainfo::SubtitleStream;

/// Proportions are scaled by this factor before rule comparison, so the
/// thresholds in a rule table stay in a readable range.
pub const PROPORTION_SCALE: f64 = 1000.0;

/// Data predicate of a [`SubtitleRule`]: language equality plus an upper
/// bound on the scaled proportion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleMatch {
    /// Language code the stream must carry
    pub language: String,
    /// Exclusive upper bound on the ×1000-scaled proportion
    pub max_scaled_proportion: f64,
}

impl SubtitleMatch {
    /// Whether the rule accepts this stream.
    #[must_use]
    pub fn matches(&self, stream: &SubtitleStream) -> bool {
        stream.language.as_deref() == Some(self.language.as_str())
            && stream.proportion * PROPORTION_SCALE < self.max_scaled_proportion
    }
}

/// One entry of the subtitle rule table.
///
/// Rules are plain configuration records consumed by a generic matcher
/// loop; extending or reordering the table never touches selection logic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleRule {
    /// Unique label, also written into the container as the track name
    pub name: String,
    /// Lower value = selected and sorted first
    pub priority: i32,
    /// Data predicate evaluated against each stream
    pub matcher: SubtitleMatch,
    /// Whether a track selected by this rule is recommended as default
    pub forced_default: bool,
}

impl SubtitleRule {
    /// The stock rule table for German-dubbed PAL-DVD sources: one forced
    /// foreign-dialogue track, one full German track, one full English
    /// track.
    #[must_use]
    pub fn default_rules() -> Vec<SubtitleRule> {
        vec![
            SubtitleRule {
                name: "Fremdsprache".to_string(),
                priority: 1,
                matcher: SubtitleMatch {
                    language: "de".to_string(),
                    max_scaled_proportion: 0.1,
                },
                forced_default: true,
            },
            SubtitleRule {
                name: "Deutsch".to_string(),
                priority: 2,
                matcher: SubtitleMatch {
                    language: "de".to_string(),
                    max_scaled_proportion: 1.0,
                },
                forced_default: false,
            },
            SubtitleRule {
                name: "English".to_string(),
                priority: 3,
                matcher: SubtitleMatch {
                    language: "en".to_string(),
                    max_scaled_proportion: 1.0,
                },
                forced_default: false,
            },
        ]
    }
}

/// One selected subtitle track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSubtitle {
    /// 1-based track number handed to the encoder
    pub track: usize,
    /// Name of the rule that claimed the stream; emitted as the track name
    pub rule_name: String,
    /// The claiming rule's default recommendation (overrides the stream's
    /// own default flag)
    pub is_default: bool,
    /// The claiming rule's priority
    pub priority: i32,
}

/// Classifies subtitle streams against the rule table.
///
/// Streams are visited in ascending index order. For each stream, the first
/// rule that has not yet fired and whose matcher accepts the stream claims
/// it; a stream is claimed by at most one rule, and a rule fires at most
/// once per file. The result is sorted ascending by rule priority, so the
/// output track order reflects the table, not stream appearance.
#[must_use]
pub fn select_subtitle_tracks(
    streams: &[SubtitleStream],
    rules: &[SubtitleRule],
) -> Vec<SelectedSubtitle> {
    let mut fired = vec![false; rules.len()];
    let mut selected = Vec::new();

    for stream in streams {
        for (rule_pos, rule) in rules.iter().enumerate() {
            if !fired[rule_pos] && rule.matcher.matches(stream) {
                selected.push(SelectedSubtitle {
                    track: stream.index + 1,
                    rule_name: rule.name.clone(),
                    is_default: rule.forced_default,
                    priority: rule.priority,
                });
                fired[rule_pos] = true;
                break;
            }
        }
    }

    selected.sort_by_key(|s| s.priority);
    log::debug!("Selected subtitle tracks: {selected:?}");
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(index: usize, language: &str, proportion: f64) -> SubtitleStream {
        SubtitleStream {
            index,
            language: Some(language.to_string()),
            size_bytes: None,
            // Stored proportions are raw fractions; rule thresholds apply
            // to the ×1000-scaled value.
            proportion: proportion / PROPORTION_SCALE,
            default_flagged: false,
        }
    }

    #[test]
    fn each_rule_fires_once_and_result_is_priority_sorted() {
        let streams = vec![
            stream(0, "de", 0.05),
            stream(1, "de", 0.5),
            stream(2, "en", 0.3),
        ];
        let selected = select_subtitle_tracks(&streams, &SubtitleRule::default_rules());

        assert_eq!(selected.len(), 3);
        assert_eq!(
            (selected[0].track, selected[0].rule_name.as_str()),
            (1, "Fremdsprache")
        );
        assert_eq!(
            (selected[1].track, selected[1].rule_name.as_str()),
            (2, "Deutsch")
        );
        assert_eq!(
            (selected[2].track, selected[2].rule_name.as_str()),
            (3, "English")
        );
        assert!(selected[0].is_default);
        assert!(!selected[1].is_default);
    }

    #[test]
    fn stream_is_claimed_by_at_most_one_rule() {
        // A tiny German track satisfies both German rules; only the first
        // may claim it.
        let streams = vec![stream(0, "de", 0.05)];
        let selected = select_subtitle_tracks(&streams, &SubtitleRule::default_rules());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].rule_name, "Fremdsprache");
    }

    #[test]
    fn extra_streams_in_a_fired_category_are_dropped() {
        let streams = vec![
            stream(0, "en", 0.4),
            stream(1, "en", 0.5),
            stream(2, "en", 0.6),
        ];
        let selected = select_subtitle_tracks(&streams, &SubtitleRule::default_rules());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].track, 1);
    }

    #[test]
    fn sort_is_by_priority_not_stream_order() {
        // English full track appears before the German tracks in the file;
        // the selection still lists it last.
        let streams = vec![
            stream(0, "en", 0.3),
            stream(1, "de", 0.05),
            stream(2, "de", 0.5),
        ];
        let selected = select_subtitle_tracks(&streams, &SubtitleRule::default_rules());
        let order: Vec<&str> = selected.iter().map(|s| s.rule_name.as_str()).collect();
        assert_eq!(order, vec!["Fremdsprache", "Deutsch", "English"]);
        let tracks: Vec<usize> = selected.iter().map(|s| s.track).collect();
        assert_eq!(tracks, vec![2, 3, 1]);
    }

    #[test]
    fn no_text_streams_yield_empty_selection() {
        assert!(select_subtitle_tracks(&[], &SubtitleRule::default_rules()).is_empty());
    }

    #[test]
    fn unmatched_streams_yield_empty_selection() {
        let streams = vec![stream(0, "fr", 0.5), stream(1, "ja", 0.5)];
        assert!(select_subtitle_tracks(&streams, &SubtitleRule::default_rules()).is_empty());
    }

    #[test]
    fn proportion_bound_is_exclusive() {
        // Scaled proportion exactly at the bound must not match.
        let streams = vec![stream(0, "de", 0.1)];
        let rules = vec![SubtitleRule {
            name: "Fremdsprache".to_string(),
            priority: 1,
            matcher: SubtitleMatch {
                language: "de".to_string(),
                max_scaled_proportion: 0.1,
            },
            forced_default: true,
        }];
        assert!(select_subtitle_tracks(&streams, &rules).is_empty());
    }

    #[test]
    fn untagged_streams_never_match() {
        let streams = vec![SubtitleStream {
            index: 0,
            language: None,
            size_bytes: Some(100),
            proportion: 0.0,
            default_flagged: true,
        }];
        assert!(select_subtitle_tracks(&streams, &SubtitleRule::default_rules()).is_empty());
    }
}
