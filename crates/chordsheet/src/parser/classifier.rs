//! Line classifier
//!
//! Turns one raw text line into a typed [`Line`]. Processors are evaluated in
//! a fixed order and the first one that accepts the line wins:
//!
//! 1. [`EmptyLineProcessor`] - blank lines
//! 2. [`AnnotationProcessor`] - section headers, then generic annotations
//! 3. [`TextLineProcessor`] - everything else, with chord extraction
//!
//! Inside the annotation processor the order is also fixed: section-header
//! patterns are tried before annotation patterns because a line like
//! `[Chorus]` fits both shapes. Annotation types are picked by keyword search
//! with priority tempo, dynamics, instruction, then comment.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{span, trace, Level};

use super::chords::extract_chords;
use crate::core::{
    AnnotationLine, AnnotationType, EmptyLine, Line, LineProcessor, SectionType, TextLine,
};

const SECTION_KEYWORDS: &str = r"verse|chorus|refrain|bridge|pre[- ]?chorus|intro|outro|ending|instrumental|interlude|solo|coda|tag|note";

static BRACKETED_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^\[\s*(?P<keyword>{})(?:\s*(?P<number>\d+))?\s*\]$",
        SECTION_KEYWORDS
    ))
    .expect("bracketed header pattern is valid")
});

static BARE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^(?P<keyword>{})(?:\s*(?P<number>\d+))?\s*:?$",
        SECTION_KEYWORDS
    ))
    .expect("bare header pattern is valid")
});

static DIRECTIVE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\{\s*(?P<marker>start_of_|end_of_)(?P<keyword>verse|chorus|bridge|pre_?chorus|intro|outro|instrumental|solo|coda|tag|tab|grid)\s*(?::\s*(?P<label>[^}]*?))?\s*\}$",
    )
    .expect("directive header pattern is valid")
});

static SHORT_DIRECTIVE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\{\s*(?P<marker>so|eo)(?P<keyword>[cvbtg])\s*(?::\s*(?P<label>[^}]*?))?\s*\}$")
        .expect("short directive header pattern is valid")
});

static STAR_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*(?P<value>[^*].*?)\*?$").expect("star pattern is valid"));

static PAREN_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\((?P<value>[^()]*)\)$").expect("paren pattern is valid"));

static COMMENT_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\{\s*(?:comment|c|comment_italic|ci|comment_box|cb)\s*:\s*(?P<value>.*?)\s*\}$")
        .expect("comment directive pattern is valid")
});

static BOLD_ANNOTATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\*\*(?P<stars>.+)\*\*|__(?P<underscores>.+)__|(?i:<b>)(?P<tag>.+)(?i:</b>))$")
        .expect("bold pattern is valid")
});

static TEMPO_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:tempo|bpm|allegro|andante|adagio|moderato|largo|lento|presto|vivace|rit|ritard|ritardando|rall|rallentando|accel|accelerando|double time|half time)\b|\d+\s*bpm\b)",
    )
    .expect("tempo terms pattern is valid")
});

static DYNAMICS_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:forte|fortissimo|pianissimo|mezzo|mf|mp|ff|fff|pp|ppp|sfz|crescendo|cresc|decrescendo|decresc|diminuendo|dim|soft|softly|softer|loud|louder|quiet|quietly|build|builds|building|swell)\b",
    )
    .expect("dynamics terms pattern is valid")
});

static INSTRUCTION_TERMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:repeat|play|sing|all|men|women|ladies|guys|tacet|hold|stop|vamp|fine|coda|segno|modulate|key change|band|drums|guitar|piano|keys|bass|a cappella|unison|harmony|harmonies|only|twice|x\d+|\d+x)\b|\bd\.[sc]\.)",
    )
    .expect("instruction terms pattern is valid")
});

/// Whether a section header opens or closes a section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionMarker {
    Start,
    End,
}

/// A recognised section header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader {
    pub section_type: SectionType,
    /// Display title as written (`Verse 2`), if the header carries one
    pub title: Option<String>,
    pub marker: SectionMarker,
}

/// Match `line` against the section-header patterns, in order
pub fn parse_section_header(line: &str) -> Option<SectionHeader> {
    let trimmed = line.trim();

    for pattern in [&*BRACKETED_HEADER, &*BARE_HEADER] {
        if let Some(caps) = pattern.captures(trimmed) {
            let section_type = SectionType::from_keyword(&caps["keyword"])?;
            let title = trimmed
                .trim_start_matches('[')
                .trim_end_matches(']')
                .trim_end_matches(':')
                .trim()
                .to_string();
            return Some(SectionHeader {
                section_type,
                title: Some(title),
                marker: SectionMarker::Start,
            });
        }
    }

    for pattern in [&*DIRECTIVE_HEADER, &*SHORT_DIRECTIVE_HEADER] {
        if let Some(caps) = pattern.captures(trimmed) {
            let marker = match caps["marker"].to_lowercase().as_str() {
                "start_of_" | "so" => SectionMarker::Start,
                _ => SectionMarker::End,
            };
            let section_type = directive_section_type(&caps["keyword"]);
            let title = caps
                .name("label")
                .map(|label| label.as_str().trim().to_string())
                .filter(|label| !label.is_empty());
            return Some(SectionHeader {
                section_type,
                title,
                marker,
            });
        }
    }

    None
}

fn directive_section_type(keyword: &str) -> SectionType {
    match keyword.to_lowercase().as_str() {
        "c" | "chorus" => SectionType::Chorus,
        "v" | "verse" => SectionType::Verse,
        "b" | "bridge" => SectionType::Bridge,
        "t" | "g" | "tab" | "grid" => SectionType::Instrumental,
        other => SectionType::from_keyword(other).unwrap_or(SectionType::Unknown),
    }
}

/// Match `line` against the generic annotation patterns, returning the
/// stripped value
pub fn match_annotation(line: &str) -> Option<String> {
    let trimmed = line.trim();

    let value = if let Some(caps) = STAR_ANNOTATION.captures(trimmed) {
        caps["value"].to_string()
    } else if let Some(caps) = PAREN_ANNOTATION.captures(trimmed) {
        caps["value"].to_string()
    } else if let Some(caps) = COMMENT_DIRECTIVE.captures(trimmed) {
        caps["value"].to_string()
    } else if let Some(caps) = BOLD_ANNOTATION.captures(trimmed) {
        caps.name("stars")
            .or_else(|| caps.name("underscores"))
            .or_else(|| caps.name("tag"))
            .map(|m| m.as_str().to_string())?
    } else {
        return None;
    };

    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Classify an annotation value by keyword; first matching set wins
pub fn classify_annotation(value: &str) -> AnnotationType {
    if TEMPO_TERMS.is_match(value) {
        AnnotationType::Tempo
    } else if DYNAMICS_TERMS.is_match(value) {
        AnnotationType::Dynamics
    } else if INSTRUCTION_TERMS.is_match(value) {
        AnnotationType::Instruction
    } else {
        AnnotationType::Comment
    }
}

/// Recognises blank lines
pub struct EmptyLineProcessor;

impl EmptyLineProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmptyLineProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineProcessor for EmptyLineProcessor {
    fn can_process(&self, line: &str) -> bool {
        line.trim().is_empty()
    }

    fn process(&self, _line: &str, line_number: usize) -> Line {
        Line::Empty(EmptyLine::single()).with_line_number(line_number)
    }

    fn name(&self) -> &'static str {
        "empty"
    }
}

/// Recognises section headers and annotations
pub struct AnnotationProcessor;

impl AnnotationProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for AnnotationProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineProcessor for AnnotationProcessor {
    fn can_process(&self, line: &str) -> bool {
        parse_section_header(line).is_some() || match_annotation(line).is_some()
    }

    fn process(&self, line: &str, line_number: usize) -> Line {
        let trimmed = line.trim();

        let annotation = if parse_section_header(trimmed).is_some() {
            AnnotationLine::new(trimmed, AnnotationType::Section).ok()
        } else {
            match_annotation(trimmed).and_then(|value| {
                let annotation_type = classify_annotation(&value);
                AnnotationLine::new(value, annotation_type).ok()
            })
        };

        match annotation {
            Some(annotation) => Line::Annotation(annotation).with_line_number(line_number),
            None => TextLineProcessor.process(line, line_number),
        }
    }

    fn name(&self) -> &'static str {
        "annotation"
    }
}

/// Fallback: lyric text with inline chords
pub struct TextLineProcessor;

impl TextLineProcessor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextLineProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl LineProcessor for TextLineProcessor {
    fn can_process(&self, _line: &str) -> bool {
        true
    }

    fn process(&self, line: &str, line_number: usize) -> Line {
        let extracted = extract_chords(line.trim_end_matches(['\r', '\n']));
        Line::Text(TextLine::new(extracted.text, extracted.chords)).with_line_number(line_number)
    }

    fn name(&self) -> &'static str {
        "text"
    }
}

/// Ordered, first-match-wins line classifier
pub struct LineClassifier {
    processors: Vec<Box<dyn LineProcessor>>,
}

impl LineClassifier {
    /// Classifier with the standard empty / annotation / text processors
    pub fn new() -> Self {
        Self {
            processors: vec![
                Box::new(EmptyLineProcessor::new()),
                Box::new(AnnotationProcessor::new()),
                Box::new(TextLineProcessor::new()),
            ],
        }
    }

    /// Insert a processor ahead of the text fallback
    pub fn with_processor(mut self, processor: Box<dyn LineProcessor>) -> Self {
        let position = self.processors.len().saturating_sub(1);
        self.processors.insert(position, processor);
        self
    }

    /// Names of the registered processors, in evaluation order
    pub fn processor_names(&self) -> Vec<&'static str> {
        self.processors.iter().map(|p| p.name()).collect()
    }

    /// Classify one raw line; `line_number` is 1-based
    pub fn classify(&self, line: &str, line_number: usize) -> Line {
        for processor in &self.processors {
            if processor.can_process(line) {
                trace!(line_number, processor = processor.name(), "Classified line");
                return processor.process(line, line_number);
            }
        }
        TextLineProcessor.process(line, line_number)
    }

    /// Classify every line of `input`
    pub fn classify_all(&self, input: &str) -> Vec<Line> {
        let classify_span = span!(Level::DEBUG, "classify_lines", input_len = input.len());
        let _enter = classify_span.enter();

        input
            .lines()
            .enumerate()
            .map(|(index, line)| self.classify(line, index + 1))
            .collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
