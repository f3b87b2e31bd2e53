//! Document parser
//!
//! Builds a [`Chordsheet`] from raw sheet text. Lines are classified one at a
//! time and folded into sections; metadata directives fill the song header
//! and chord-only rows are paired with the lyric beneath them.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, span, trace, Level};

use super::chords::chord_row;
use super::classifier::{parse_section_header, LineClassifier, SectionMarker};
use crate::core::{
    AnnotationLine, AnnotationType, ChordPlacement, Chordsheet, Line, Section, SectionType,
    SongMetadata, TextLine,
};

static METADATA_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\{\s*(?P<name>title|t|artist|subtitle|st|key|album|year|tempo|time|capo|ccli|tuning|copyright|composer|lyricist|arranger|meta)\s*:\s*(?P<value>.*?)\s*\}$",
    )
    .expect("metadata directive pattern is valid")
});

static METADATA_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<name>title|artist|key|capo|tempo|time|ccli)\s*:\s*(?P<value>\S.*?)\s*$")
        .expect("metadata label pattern is valid")
});

// `{verse: Verse 1}` style titles, as written by the ChordPro renderer
static SECTION_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\{\s*(?P<keyword>verse|chorus|bridge|intro|outro)\s*(?::\s*(?P<label>[^}]*?))?\s*\}$")
        .expect("section directive pattern is valid")
});

/// Parses chord sheet text into the format-agnostic model
pub struct ChordsheetParser {
    classifier: LineClassifier,
}

impl ChordsheetParser {
    pub fn new() -> Self {
        Self {
            classifier: LineClassifier::new(),
        }
    }

    /// Use a custom line classifier
    pub fn with_classifier(classifier: LineClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &LineClassifier {
        &self.classifier
    }

    /// Parse sheet text; never fails, unrecognised lines become plain text
    pub fn parse(&self, input: &str) -> Chordsheet {
        let parse_span = span!(Level::INFO, "parse_chordsheet", input_len = input.len());
        let _enter = parse_span.enter();

        let mut builder = DocumentBuilder::default();
        let mut in_header = true;

        for (index, raw) in input.lines().enumerate() {
            let line_number = index + 1;
            let raw = raw.trim_end_matches('\r');
            let trimmed = raw.trim();

            if let Some(caps) = METADATA_DIRECTIVE.captures(trimmed) {
                builder.flush_pending();
                builder.apply_directive(&caps["name"], &caps["value"], line_number);
                continue;
            }

            if in_header {
                if let Some(caps) = METADATA_LABEL.captures(trimmed) {
                    builder.apply_directive(&caps["name"], &caps["value"], line_number);
                    continue;
                }
            }
            if !trimmed.is_empty() {
                in_header = false;
            }

            if let Some(caps) = SECTION_DIRECTIVE.captures(trimmed) {
                builder.flush_pending();
                let section_type =
                    SectionType::from_keyword(&caps["keyword"]).unwrap_or(SectionType::Unknown);
                let title = caps
                    .name("label")
                    .map(|label| label.as_str().trim().to_string())
                    .filter(|label| !label.is_empty());
                builder.open_section(section_type, title);
                continue;
            }

            if let Some(chords) = chord_row(raw) {
                builder.flush_pending();
                trace!(line_number, chords = chords.len(), "Chord row");
                builder.pending = Some(PendingRow {
                    raw: raw.to_string(),
                    chords,
                    line_number,
                });
                continue;
            }

            let line = self.classifier.classify(raw, line_number);
            match line {
                Line::Annotation(ref annotation)
                    if annotation.annotation_type == AnnotationType::Section =>
                {
                    builder.flush_pending();
                    match parse_section_header(&annotation.value) {
                        Some(header) if header.marker == SectionMarker::End => {
                            builder.close_section();
                        }
                        Some(header) => builder.open_section(header.section_type, header.title),
                        None => builder.push(line),
                    }
                }
                Line::Text(text) if text.chords.is_empty() && builder.pending.is_some() => {
                    builder.pair_with_pending(text);
                }
                line => {
                    builder.flush_pending();
                    builder.push(line);
                }
            }
        }

        builder.flush_pending();
        let chordsheet = builder.finish();
        debug!(
            id = %chordsheet.id,
            sections = chordsheet.sections.len(),
            lines = chordsheet.line_count(),
            chords = chordsheet.chord_count(),
            "Parsed chordsheet"
        );
        chordsheet
    }
}

impl Default for ChordsheetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Chord-only row waiting for a lyric underneath
struct PendingRow {
    raw: String,
    chords: Vec<ChordPlacement>,
    line_number: usize,
}

#[derive(Default)]
struct DocumentBuilder {
    title: Option<String>,
    artist: Option<String>,
    key: Option<String>,
    metadata: SongMetadata,
    sections: Vec<Section>,
    current: Section,
    pending: Option<PendingRow>,
}

impl DocumentBuilder {
    fn apply_directive(&mut self, name: &str, value: &str, line_number: usize) {
        let value = value.trim();
        if value.is_empty() {
            return;
        }

        match name.to_lowercase().as_str() {
            "title" | "t" => self.title = Some(value.to_string()),
            "artist" | "subtitle" | "st" => self.artist = Some(value.to_string()),
            "key" => self.key = Some(value.to_string()),
            "album" => self.metadata.album = Some(value.to_string()),
            "time" => self.metadata.time_signature = Some(value.to_string()),
            "ccli" => self.metadata.ccli = Some(value.to_string()),
            "tuning" => self.metadata.tuning = Some(value.to_string()),
            "year" => match value.parse() {
                Ok(year) => self.metadata.year = Some(year),
                Err(_) => self.custom("year", value),
            },
            "capo" => match value.parse() {
                Ok(capo) => self.metadata.capo = Some(capo),
                Err(_) => self.custom("capo", value),
            },
            "tempo" => match value.trim_end_matches("bpm").trim().parse() {
                Ok(tempo) => self.metadata.tempo = Some(tempo),
                // A non-numeric tempo is a performance marking, keep it in the body
                Err(_) => {
                    if let Ok(annotation) = AnnotationLine::new(value, AnnotationType::Tempo) {
                        self.push(Line::Annotation(annotation).with_line_number(line_number));
                    }
                }
            },
            "meta" => {
                let mut parts = value.splitn(2, char::is_whitespace);
                let key = parts.next().unwrap_or_default();
                let rest = parts.next().unwrap_or_default().trim();
                self.custom(key, rest);
            }
            other => self.custom(other, value),
        }
    }

    fn custom(&mut self, key: &str, value: &str) {
        if !key.is_empty() {
            self.metadata
                .custom
                .insert(key.to_string(), value.to_string());
        }
    }

    fn push(&mut self, line: Line) {
        if let (Line::Empty(next), Some(Line::Empty(last))) = (&line, self.current.lines.last_mut())
        {
            last.count += next.count;
            return;
        }
        self.current.lines.push(line);
    }

    fn pair_with_pending(&mut self, lyric: TextLine) {
        if let Some(row) = self.pending.take() {
            let mut line = TextLine::new(lyric.text, row.chords);
            line.line_number = Some(row.line_number);
            self.current.lines.push(Line::Text(line));
        }
    }

    /// A chord row with nothing to sit on stays as literal text
    fn flush_pending(&mut self) {
        if let Some(row) = self.pending.take() {
            let line = Line::Text(TextLine::plain(row.raw)).with_line_number(row.line_number);
            self.push(line);
        }
    }

    fn open_section(&mut self, section_type: SectionType, title: Option<String>) {
        self.close_section();
        self.current = Section::new(section_type);
        self.current.title = title;
    }

    fn close_section(&mut self) {
        let mut section = std::mem::take(&mut self.current);

        while matches!(section.lines.last(), Some(Line::Empty(_))) {
            section.lines.pop();
        }
        let leading = section
            .lines
            .iter()
            .take_while(|line| matches!(line, Line::Empty(_)))
            .count();
        section.lines.drain(..leading);

        if section.lines.is_empty() && section.display_title().is_none() {
            return;
        }
        self.sections.push(section);
    }

    fn finish(mut self) -> Chordsheet {
        self.close_section();

        let id = self
            .title
            .as_deref()
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| "untitled".to_string());

        Chordsheet {
            id,
            title: self.title,
            artist: self.artist,
            original_key: self.key,
            sections: self.sections,
            metadata: (!self.metadata.is_empty()).then_some(self.metadata),
        }
    }
}

/// Lowercase ASCII slug: `Amazing Grace!` becomes `amazing-grace`
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Chordsheet {
        ChordsheetParser::new().parse(input)
    }

    #[test]
    fn test_parse_chordpro_document() {
        let sheet = parse(
            "{title: Amazing Grace}\n{artist: John Newton}\n{key: G}\n\n[Verse 1]\n[G]Amazing [C]grace\nHow sweet the sound\n\n[Chorus]\n[D]I once was lost\n",
        );

        assert_eq!(sheet.id, "amazing-grace");
        assert_eq!(sheet.title.as_deref(), Some("Amazing Grace"));
        assert_eq!(sheet.artist.as_deref(), Some("John Newton"));
        assert_eq!(sheet.original_key.as_deref(), Some("G"));
        assert_eq!(sheet.sections.len(), 2);

        let verse = &sheet.sections[0];
        assert_eq!(verse.section_type, SectionType::Verse);
        assert_eq!(verse.title.as_deref(), Some("Verse 1"));
        assert_eq!(verse.lines.len(), 2);
        assert_eq!(verse.chord_count(), 2);

        let chorus = &sheet.sections[1];
        assert_eq!(chorus.section_type, SectionType::Chorus);
        assert_eq!(chorus.lines.len(), 1);
    }

    #[test]
    fn test_label_metadata_only_in_header() {
        let sheet = parse("Title: Be Thou My Vision\nKey: D\nTempo: 80\n\nVerse 1\nTitle: not metadata\n");
        assert_eq!(sheet.title.as_deref(), Some("Be Thou My Vision"));
        assert_eq!(sheet.original_key.as_deref(), Some("D"));
        assert_eq!(sheet.metadata.as_ref().and_then(|m| m.tempo), Some(80));

        let verse = &sheet.sections[0];
        match &verse.lines[0] {
            Line::Text(text) => assert_eq!(text.text, "Title: not metadata"),
            other => panic!("Expected text line, got {:?}", other),
        }
    }

    #[test]
    fn test_metadata_directives() {
        let sheet = parse("{t: Song}\n{capo: 2}\n{year: 1779}\n{meta: arranger Jo Smith}\n{tempo: slowly}\nla\n");
        let metadata = sheet.metadata.unwrap();
        assert_eq!(metadata.capo, Some(2));
        assert_eq!(metadata.year, Some(1779));
        assert_eq!(metadata.custom.get("arranger").map(String::as_str), Some("Jo Smith"));
        assert!(metadata.tempo.is_none());

        match &sheet.sections[0].lines[0] {
            Line::Annotation(annotation) => {
                assert_eq!(annotation.value, "slowly");
                assert_eq!(annotation.annotation_type, AnnotationType::Tempo);
            }
            other => panic!("Expected tempo annotation, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_runs_merge_and_trim() {
        let sheet = parse("[Verse]\n\nline one\n\n\n\nline two\n\n\n[Chorus]\nchorus\n");
        let verse = &sheet.sections[0];
        assert_eq!(verse.lines.len(), 3);
        match &verse.lines[1] {
            Line::Empty(empty) => assert_eq!(empty.count, 3),
            other => panic!("Expected merged empty line, got {:?}", other),
        }
    }

    #[test]
    fn test_directive_sections_and_end_markers() {
        let sheet = parse("{start_of_chorus}\n[C]Sing\n{end_of_chorus}\n\n{sov: Verse 2}\nWords\n{eov}\n");
        assert_eq!(sheet.sections.len(), 2);
        assert_eq!(sheet.sections[0].section_type, SectionType::Chorus);
        assert!(sheet.sections[0].title.is_none());
        assert_eq!(sheet.sections[1].title.as_deref(), Some("Verse 2"));
    }

    #[test]
    fn test_chordpro_section_directive_titles() {
        let sheet = parse("{verse: Verse 1}\n[C]Hello\n{chorus: Chorus}\n[G]World\n");
        assert_eq!(sheet.sections.len(), 2);
        assert_eq!(sheet.sections[0].section_type, SectionType::Verse);
        assert_eq!(sheet.sections[0].title.as_deref(), Some("Verse 1"));
        assert_eq!(sheet.sections[1].section_type, SectionType::Chorus);
    }

    #[test]
    fn test_chord_row_pairs_with_lyric() {
        let sheet = parse("Verse\nC       F\nAmazing grace how sweet the sound\n");
        let verse = &sheet.sections[0];
        assert_eq!(verse.lines.len(), 1);
        match &verse.lines[0] {
            Line::Text(text) => {
                assert_eq!(text.text, "Amazing grace how sweet the sound");
                assert_eq!(text.chords.len(), 2);
                assert_eq!(text.chords[1].start_index, 8);
                assert_eq!(text.line_number, Some(2));
            }
            other => panic!("Expected paired text line, got {:?}", other),
        }
    }

    #[test]
    fn test_lonely_chord_row_stays_literal() {
        let sheet = parse("[Intro]\nG   C   D\n\n[Verse]\nwords\n");
        let intro = &sheet.sections[0];
        match &intro.lines[0] {
            Line::Text(text) => {
                assert_eq!(text.text, "G   C   D");
                assert!(text.chords.is_empty());
            }
            other => panic!("Expected literal row, got {:?}", other),
        }
    }

    #[test]
    fn test_content_before_first_header_is_untitled_section() {
        let sheet = parse("Just some words\n[Chorus]\nla la\n");
        assert_eq!(sheet.sections.len(), 2);
        assert_eq!(sheet.sections[0].section_type, SectionType::Unknown);
        assert!(sheet.sections[0].display_title().is_none());
    }

    #[test]
    fn test_empty_input() {
        let sheet = parse("");
        assert_eq!(sheet.id, "untitled");
        assert!(sheet.sections.is_empty());
        assert!(sheet.metadata.is_none());
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Amazing Grace"), "amazing-grace");
        assert_eq!(slugify("  It Is Well (With My Soul)! "), "it-is-well-with-my-soul");
        assert_eq!(slugify("???"), "");
    }
}
