//! Rendering configuration and results
//!
//! Whitespace policy, per-call rendering options and the result envelope
//! returned by every dialect renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// How chords are laid out relative to lyrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChordPlacementMode {
    /// Chords on their own row above the lyric
    Above,
    /// Chords spliced into the lyric text
    Inline,
    /// Use the dialect's default
    #[default]
    Auto,
}

impl FromStr for ChordPlacementMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "above" => Ok(ChordPlacementMode::Above),
            "inline" => Ok(ChordPlacementMode::Inline),
            "auto" => Ok(ChordPlacementMode::Auto),
            _ => Err(format!("Unknown chord placement: {}", s)),
        }
    }
}

impl fmt::Display for ChordPlacementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChordPlacementMode::Above => write!(f, "above"),
            ChordPlacementMode::Inline => write!(f, "inline"),
            ChordPlacementMode::Auto => write!(f, "auto"),
        }
    }
}

/// Blank-line policy of a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitespaceRules {
    /// Extra blank lines after a comment annotation
    pub empty_lines_after_comment: usize,
    /// Blank lines after a section's title line
    pub empty_lines_after_section: usize,
    /// Blank lines separating two rendered sections
    pub empty_lines_between_sections: usize,
    /// Keep runs of 3+ blank lines instead of collapsing them to 2
    pub preserve_multiple_empty_lines: bool,
}

impl WhitespaceRules {
    pub const fn new(
        empty_lines_after_comment: usize,
        empty_lines_after_section: usize,
        empty_lines_between_sections: usize,
        preserve_multiple_empty_lines: bool,
    ) -> Self {
        Self {
            empty_lines_after_comment,
            empty_lines_after_section,
            empty_lines_between_sections,
            preserve_multiple_empty_lines,
        }
    }

    /// Apply per-call overrides on top of these rules (shallow merge)
    pub fn merged(&self, overrides: &WhitespaceOverrides) -> Self {
        Self {
            empty_lines_after_comment: overrides
                .empty_lines_after_comment
                .unwrap_or(self.empty_lines_after_comment),
            empty_lines_after_section: overrides
                .empty_lines_after_section
                .unwrap_or(self.empty_lines_after_section),
            empty_lines_between_sections: overrides
                .empty_lines_between_sections
                .unwrap_or(self.empty_lines_between_sections),
            preserve_multiple_empty_lines: overrides
                .preserve_multiple_empty_lines
                .unwrap_or(self.preserve_multiple_empty_lines),
        }
    }

    /// Number of blank lines actually emitted for a run of `count`
    pub fn effective_empty_count(&self, count: usize) -> usize {
        if self.preserve_multiple_empty_lines {
            count
        } else {
            count.min(2)
        }
    }
}

impl Default for WhitespaceRules {
    fn default() -> Self {
        Self::new(0, 0, 1, false)
    }
}

/// Optional per-call replacements for individual whitespace rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WhitespaceOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_lines_after_comment: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_lines_after_section: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub empty_lines_between_sections: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preserve_multiple_empty_lines: Option<bool>,
}

impl WhitespaceOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Options for a single render call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingOptions {
    /// Emit the captured chord token instead of the canonical value
    #[serde(default)]
    pub preserve_original_text: bool,
    /// Placement override; `None` and `Auto` both mean "dialect default"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_placement: Option<ChordPlacementMode>,
    /// Emit the title/artist/key block
    #[serde(default = "default_include_metadata")]
    pub include_metadata: bool,
    #[serde(default)]
    pub whitespace: WhitespaceOverrides,
}

fn default_include_metadata() -> bool {
    true
}

impl Default for RenderingOptions {
    fn default() -> Self {
        Self {
            preserve_original_text: false,
            chord_placement: None,
            include_metadata: true,
            whitespace: WhitespaceOverrides::default(),
        }
    }
}

impl RenderingOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_placement(mut self, placement: ChordPlacementMode) -> Self {
        self.chord_placement = Some(placement);
        self
    }

    pub fn with_original_text(mut self, preserve: bool) -> Self {
        self.preserve_original_text = preserve;
        self
    }

    pub fn with_metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }

    pub fn with_whitespace(mut self, overrides: WhitespaceOverrides) -> Self {
        self.whitespace = overrides;
        self
    }
}

/// Counters collected while rendering
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingMetadata {
    pub lines_rendered: usize,
    pub sections_rendered: usize,
    pub chords_rendered: usize,
    pub rendering_time: Duration,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// Output of a dialect renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderingResult {
    pub content: String,
    pub format: String,
    pub metadata: RenderingMetadata,
}
