//! Core type definitions for chord sheet processing
//!
//! This module contains the format-agnostic song model shared by the
//! classifier and every dialect renderer: chord placements, typed lines,
//! sections and the chordsheet itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::error::{ChordsheetError, Result};

/// Placement hint carried by an individual chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlacementHint {
    /// Chord sits on a row above the lyric
    Above,
    /// Chord is spliced into the lyric
    Inline,
    /// Chord falls between two syllables
    Between,
}

impl fmt::Display for PlacementHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementHint::Above => write!(f, "above"),
            PlacementHint::Inline => write!(f, "inline"),
            PlacementHint::Between => write!(f, "between"),
        }
    }
}

/// A chord anchored to a character span of its owning line
///
/// Indices count characters (not bytes) into the token-free lyric text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChordPlacement {
    /// Canonical chord spelling, e.g. `F#m7`
    pub value: String,
    /// The literal token as captured from the source, e.g. `[F#m7]`
    pub original_text: String,
    /// Inclusive start offset
    pub start_index: usize,
    /// Exclusive end offset
    pub end_index: usize,
    /// Optional placement hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<PlacementHint>,
}

impl ChordPlacement {
    /// Create a validated chord placement
    ///
    /// Rejects empty `value`/`original_text` and `end_index < start_index`.
    pub fn new(
        value: impl Into<String>,
        original_text: impl Into<String>,
        start_index: usize,
        end_index: usize,
    ) -> Result<Self> {
        let value = value.into();
        let original_text = original_text.into();

        if value.trim().is_empty() {
            return Err(ChordsheetError::validation("chord value must not be empty"));
        }
        if original_text.is_empty() {
            return Err(ChordsheetError::validation(
                "chord original text must not be empty",
            ));
        }
        if end_index < start_index {
            return Err(ChordsheetError::validation(format!(
                "chord end index {} is before start index {}",
                end_index, start_index
            )));
        }

        Ok(Self {
            value,
            original_text,
            start_index,
            end_index,
            placement: None,
        })
    }

    /// Create a placement for a bracketed token such as `[C]` at `start_index`
    pub fn bracketed(value: impl Into<String>, start_index: usize) -> Result<Self> {
        let value = value.into();
        let original_text = format!("[{}]", value);
        let end_index = start_index + value.chars().count();
        Self::new(value, original_text, start_index, end_index)
    }

    /// Attach a placement hint
    pub fn with_placement(mut self, placement: PlacementHint) -> Self {
        self.placement = Some(placement);
        self
    }
}

/// A lyric (or chord-only) line with its chords
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLine {
    pub text: String,
    #[serde(default)]
    pub chords: Vec<ChordPlacement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl TextLine {
    pub fn new(text: impl Into<String>, chords: Vec<ChordPlacement>) -> Self {
        Self {
            text: text.into(),
            chords,
            line_number: None,
        }
    }

    /// A line without chords
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Vec::new())
    }
}

/// One or more consecutive blank lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmptyLine {
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl EmptyLine {
    /// Create a run of `count` blank lines; `count` must be at least 1
    pub fn new(count: usize) -> Result<Self> {
        if count < 1 {
            return Err(ChordsheetError::validation(
                "empty line count must be at least 1",
            ));
        }
        Ok(Self {
            count,
            line_number: None,
        })
    }

    /// A single blank line
    pub fn single() -> Self {
        Self {
            count: 1,
            line_number: None,
        }
    }
}

/// Classification of a non-lyric remark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationType {
    #[default]
    Comment,
    Instruction,
    Tempo,
    Dynamics,
    Section,
}

impl fmt::Display for AnnotationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotationType::Comment => write!(f, "comment"),
            AnnotationType::Instruction => write!(f, "instruction"),
            AnnotationType::Tempo => write!(f, "tempo"),
            AnnotationType::Dynamics => write!(f, "dynamics"),
            AnnotationType::Section => write!(f, "section"),
        }
    }
}

/// A non-lyric line: comment, performance instruction, tempo, dynamics or section marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationLine {
    pub value: String,
    pub annotation_type: AnnotationType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_number: Option<usize>,
}

impl AnnotationLine {
    /// Create an annotation; the value must contain non-whitespace text
    pub fn new(value: impl Into<String>, annotation_type: AnnotationType) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ChordsheetError::validation(
                "annotation value must not be empty",
            ));
        }
        Ok(Self {
            value,
            annotation_type,
            line_number: None,
        })
    }
}

/// A typed line of a chord sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Line {
    Text(TextLine),
    Empty(EmptyLine),
    Annotation(AnnotationLine),
}

impl Line {
    /// Discriminant name as used in serialized documents
    pub fn line_type(&self) -> &'static str {
        match self {
            Line::Text(_) => "text",
            Line::Empty(_) => "empty",
            Line::Annotation(_) => "annotation",
        }
    }

    /// Source line number, if known
    pub fn line_number(&self) -> Option<usize> {
        match self {
            Line::Text(line) => line.line_number,
            Line::Empty(line) => line.line_number,
            Line::Annotation(line) => line.line_number,
        }
    }

    /// Set the source line number
    pub fn with_line_number(mut self, number: usize) -> Self {
        match &mut self {
            Line::Text(line) => line.line_number = Some(number),
            Line::Empty(line) => line.line_number = Some(number),
            Line::Annotation(line) => line.line_number = Some(number),
        }
        self
    }

    /// Number of chords carried by this line (zero for non-text lines)
    pub fn chord_count(&self) -> usize {
        match self {
            Line::Text(line) => line.chords.len(),
            _ => 0,
        }
    }
}

impl From<TextLine> for Line {
    fn from(line: TextLine) -> Self {
        Line::Text(line)
    }
}

impl From<EmptyLine> for Line {
    fn from(line: EmptyLine) -> Self {
        Line::Empty(line)
    }
}

impl From<AnnotationLine> for Line {
    fn from(line: AnnotationLine) -> Self {
        Line::Annotation(line)
    }
}

/// Kind of song section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionType {
    Verse,
    Chorus,
    Bridge,
    PreChorus,
    Intro,
    Outro,
    Instrumental,
    Solo,
    Coda,
    Tag,
    Note,
    #[default]
    Unknown,
}

impl SectionType {
    /// Every section type, in declaration order
    pub const ALL: [SectionType; 12] = [
        SectionType::Verse,
        SectionType::Chorus,
        SectionType::Bridge,
        SectionType::PreChorus,
        SectionType::Intro,
        SectionType::Outro,
        SectionType::Instrumental,
        SectionType::Solo,
        SectionType::Coda,
        SectionType::Tag,
        SectionType::Note,
        SectionType::Unknown,
    ];

    /// Canonical keyword spelling
    pub fn keyword(&self) -> &'static str {
        match self {
            SectionType::Verse => "verse",
            SectionType::Chorus => "chorus",
            SectionType::Bridge => "bridge",
            SectionType::PreChorus => "pre-chorus",
            SectionType::Intro => "intro",
            SectionType::Outro => "outro",
            SectionType::Instrumental => "instrumental",
            SectionType::Solo => "solo",
            SectionType::Coda => "coda",
            SectionType::Tag => "tag",
            SectionType::Note => "note",
            SectionType::Unknown => "unknown",
        }
    }

    /// Human-readable label used when a section has no explicit title
    pub fn label(&self) -> &'static str {
        match self {
            SectionType::Verse => "Verse",
            SectionType::Chorus => "Chorus",
            SectionType::Bridge => "Bridge",
            SectionType::PreChorus => "Pre-Chorus",
            SectionType::Intro => "Intro",
            SectionType::Outro => "Outro",
            SectionType::Instrumental => "Instrumental",
            SectionType::Solo => "Solo",
            SectionType::Coda => "Coda",
            SectionType::Tag => "Tag",
            SectionType::Note => "Note",
            SectionType::Unknown => "",
        }
    }

    /// Look up a section type from a keyword or one of its aliases
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let normalized = keyword.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "verse" => Some(SectionType::Verse),
            "chorus" | "refrain" => Some(SectionType::Chorus),
            "bridge" => Some(SectionType::Bridge),
            "pre-chorus" | "prechorus" => Some(SectionType::PreChorus),
            "intro" => Some(SectionType::Intro),
            "outro" | "ending" => Some(SectionType::Outro),
            "instrumental" | "interlude" => Some(SectionType::Instrumental),
            "solo" => Some(SectionType::Solo),
            "coda" => Some(SectionType::Coda),
            "tag" => Some(SectionType::Tag),
            "note" => Some(SectionType::Note),
            "unknown" => Some(SectionType::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A titled group of lines
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub lines: Vec<Line>,
}

impl Section {
    pub fn new(section_type: SectionType) -> Self {
        Self {
            section_type,
            title: None,
            lines: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_lines(mut self, lines: Vec<Line>) -> Self {
        self.lines = lines;
        self
    }

    /// Title to display: the explicit title, else the type's default label
    pub fn display_title(&self) -> Option<String> {
        match &self.title {
            Some(title) if !title.trim().is_empty() => Some(title.trim().to_string()),
            _ if self.section_type == SectionType::Unknown => None,
            _ => Some(self.section_type.label().to_string()),
        }
    }

    /// Total chord count across the section's text lines
    pub fn chord_count(&self) -> usize {
        self.lines.iter().map(Line::chord_count).sum()
    }
}

/// Optional song-level metadata
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tempo: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capo: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ccli: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuning: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom: BTreeMap<String, String>,
}

impl SongMetadata {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A complete song
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chordsheet {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_key: Option<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SongMetadata>,
}

impl Chordsheet {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_artist(mut self, artist: impl Into<String>) -> Self {
        self.artist = Some(artist.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.original_key = Some(key.into());
        self
    }

    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_metadata(mut self, metadata: SongMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Iterate over every text line in document order
    pub fn text_lines(&self) -> impl Iterator<Item = &TextLine> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter())
            .filter_map(|line| match line {
                Line::Text(text) => Some(text),
                _ => None,
            })
    }

    /// True if any text line carries at least one chord
    pub fn has_chords(&self) -> bool {
        self.text_lines().any(|line| !line.chords.is_empty())
    }

    /// Total chord count across the document
    pub fn chord_count(&self) -> usize {
        self.sections.iter().map(Section::chord_count).sum()
    }

    /// Total line count across the document
    pub fn line_count(&self) -> usize {
        self.sections.iter().map(|section| section.lines.len()).sum()
    }
}
