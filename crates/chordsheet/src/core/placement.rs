//! Chord placement renderer
//!
//! Turns a single typed line into dialect text. Text lines are rendered
//! either with chords spliced inline or with a chord row above the lyric;
//! empty and annotation lines are rendered from the dialect's line style.
//!
//! Chord data is trusted only loosely here: empty tokens are skipped and
//! out-of-range indices are clipped to the lyric, so a malformed placement
//! never aborts a render.

use tracing::trace;

use super::options::{ChordPlacementMode, RenderingOptions, WhitespaceRules};
use super::overlay::OverlayRow;
use super::types::{AnnotationLine, AnnotationType, ChordPlacement, EmptyLine, Line, TextLine};

/// How a chord is written when spliced inline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineWrap {
    /// `[C]`
    Bracketed,
    /// `C`
    Bare,
}

impl InlineWrap {
    pub fn wrap(&self, value: &str) -> String {
        match self {
            InlineWrap::Bracketed => format!("[{}]", value),
            InlineWrap::Bare => value.to_string(),
        }
    }
}

/// Prefix/suffix pair placed around an annotation value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl Wrap {
    pub const fn new(prefix: &'static str, suffix: &'static str) -> Self {
        Self { prefix, suffix }
    }

    pub fn apply(&self, value: &str) -> String {
        format!("{}{}{}", self.prefix, value, self.suffix)
    }
}

/// Annotation wrapping per annotation type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnotationWraps {
    pub comment: Wrap,
    pub instruction: Wrap,
    pub tempo: Wrap,
    pub dynamics: Wrap,
    pub section: Wrap,
}

impl AnnotationWraps {
    pub fn for_type(&self, annotation_type: AnnotationType) -> Wrap {
        match annotation_type {
            AnnotationType::Comment => self.comment,
            AnnotationType::Instruction => self.instruction,
            AnnotationType::Tempo => self.tempo,
            AnnotationType::Dynamics => self.dynamics,
            AnnotationType::Section => self.section,
        }
    }
}

/// Everything the line renderer needs to know about a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Placement used when the caller asks for `auto` or nothing
    pub default_placement: ChordPlacementMode,
    pub inline_wrap: InlineWrap,
    pub annotations: AnnotationWraps,
}

/// Renders individual lines for one dialect
#[derive(Debug, Clone, Copy)]
pub struct ChordPlacementRenderer {
    style: LineStyle,
}

impl ChordPlacementRenderer {
    pub fn new(style: LineStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &LineStyle {
        &self.style
    }

    /// Resolve the placement mode for a call: explicit non-auto wins
    pub fn resolve_placement(&self, options: &RenderingOptions) -> ChordPlacementMode {
        match options.chord_placement {
            Some(ChordPlacementMode::Above) => ChordPlacementMode::Above,
            Some(ChordPlacementMode::Inline) => ChordPlacementMode::Inline,
            Some(ChordPlacementMode::Auto) | None => match self.style.default_placement {
                ChordPlacementMode::Auto => ChordPlacementMode::Inline,
                placement => placement,
            },
        }
    }

    /// Render any line variant
    pub fn render_line(
        &self,
        line: &Line,
        options: &RenderingOptions,
        rules: &WhitespaceRules,
    ) -> String {
        match line {
            Line::Text(text) => self.render_text_line(text, options),
            Line::Empty(empty) => {
                let count = rules.effective_empty_count(empty.count);
                "\n".repeat(count)
            }
            Line::Annotation(annotation) => self.render_annotation_line(annotation, rules),
        }
    }

    /// Render a text line; the result always ends in exactly one newline
    pub fn render_text_line(&self, line: &TextLine, options: &RenderingOptions) -> String {
        if line.chords.is_empty() {
            return format!("{}\n", line.text);
        }

        match self.resolve_placement(options) {
            ChordPlacementMode::Above => self.render_above(line, options),
            _ => self.render_inline(line, options),
        }
    }

    /// Exactly `count` newline characters
    pub fn render_empty_line(&self, line: &EmptyLine) -> String {
        "\n".repeat(line.count)
    }

    /// Wrapped annotation, a newline, then any dialect-specific padding
    pub fn render_annotation_line(&self, line: &AnnotationLine, rules: &WhitespaceRules) -> String {
        let wrap = self.style.annotations.for_type(line.annotation_type);
        let mut output = wrap.apply(line.value.trim());
        output.push('\n');

        if line.annotation_type == AnnotationType::Comment {
            output.push_str(&"\n".repeat(rules.empty_lines_after_comment));
        }
        output
    }

    fn render_above(&self, line: &TextLine, options: &RenderingOptions) -> String {
        let mut chords: Vec<&ChordPlacement> = line.chords.iter().collect();
        chords.sort_by_key(|chord| chord.start_index);

        let mut row = OverlayRow::new(line.text.chars().count());
        let mut drawn = 0;
        for chord in chords {
            let token = above_token(chord, options.preserve_original_text);
            if token.is_empty() {
                continue;
            }
            let written = row.draw_text(chord.start_index, &token);
            drawn += written;
            if written < token.chars().count() {
                trace!(
                    chord = %chord.value,
                    start = chord.start_index,
                    width = row.width(),
                    "Chord clipped at end of line"
                );
            }
        }

        // No chord row at all rather than a blank one
        if drawn == 0 {
            return format!("{}\n", line.text);
        }
        format!("{}\n{}\n", row, line.text)
    }

    fn render_inline(&self, line: &TextLine, options: &RenderingOptions) -> String {
        let mut chords: Vec<(usize, &ChordPlacement)> = line.chords.iter().enumerate().collect();
        // Right to left; among equal offsets the later chord goes in first so
        // the finished line keeps construction order.
        chords.sort_by(|(a_pos, a), (b_pos, b)| {
            b.start_index
                .cmp(&a.start_index)
                .then_with(|| b_pos.cmp(a_pos))
        });

        let mut chars: Vec<char> = line.text.chars().collect();
        for (_, chord) in chords {
            let token = self.inline_token(chord, options.preserve_original_text);
            if token.is_empty() {
                continue;
            }
            let at = chord.start_index.min(chars.len());
            chars.splice(at..at, token.chars());
        }

        let mut output: String = chars.into_iter().collect();
        output.push('\n');
        output
    }

    fn inline_token(&self, chord: &ChordPlacement, preserve_original: bool) -> String {
        if preserve_original && !chord.original_text.is_empty() {
            return chord.original_text.clone();
        }
        let value = chord.value.trim();
        if value.is_empty() {
            return String::new();
        }
        self.style.inline_wrap.wrap(value)
    }
}

/// Token written on the chord row
fn above_token(chord: &ChordPlacement, preserve_original: bool) -> String {
    if preserve_original {
        let cleaned = clean_original_text(&chord.original_text);
        if !cleaned.is_empty() {
            return cleaned.to_string();
        }
    }
    chord.value.trim().to_string()
}

/// Strip surrounding brackets, parentheses and braces from a captured token
pub fn clean_original_text(original: &str) -> &str {
    original
        .trim()
        .trim_matches(|c| matches!(c, '[' | ']' | '(' | ')' | '{' | '}'))
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bracket_style(default_placement: ChordPlacementMode) -> LineStyle {
        let plain = Wrap::new("", "");
        LineStyle {
            default_placement,
            inline_wrap: InlineWrap::Bracketed,
            annotations: AnnotationWraps {
                comment: Wrap::new("(", ")"),
                instruction: plain,
                tempo: Wrap::new("Tempo: ", ""),
                dynamics: plain,
                section: Wrap::new("", ":"),
            },
        }
    }

    fn amazing_grace() -> TextLine {
        TextLine::new(
            "Amazing grace how sweet the sound",
            vec![
                ChordPlacement::bracketed("C", 0).unwrap(),
                ChordPlacement::bracketed("F", 8).unwrap(),
            ],
        )
    }

    #[test]
    fn test_plain_text_line() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        let line = TextLine::plain("no chords here");
        assert_eq!(
            renderer.render_text_line(&line, &RenderingOptions::default()),
            "no chords here\n"
        );
    }

    #[test]
    fn test_inline_splice() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        assert_eq!(
            renderer.render_text_line(&amazing_grace(), &RenderingOptions::default()),
            "[C]Amazing [F]grace how sweet the sound\n"
        );
    }

    #[test]
    fn test_above_overlay() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Above));
        assert_eq!(
            renderer.render_text_line(&amazing_grace(), &RenderingOptions::default()),
            "C       F\nAmazing grace how sweet the sound\n"
        );
    }

    #[test]
    fn test_explicit_placement_overrides_default() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Above));
        let inline = RenderingOptions::default().with_placement(ChordPlacementMode::Inline);
        assert_eq!(
            renderer.render_text_line(&amazing_grace(), &inline),
            "[C]Amazing [F]grace how sweet the sound\n"
        );

        let auto = RenderingOptions::default().with_placement(ChordPlacementMode::Auto);
        assert_eq!(renderer.resolve_placement(&auto), ChordPlacementMode::Above);
    }

    #[test]
    fn test_inline_preserves_original_token() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        let line = TextLine::new(
            "Hallelujah",
            vec![ChordPlacement::new("Am", "(am)", 0, 2).unwrap()],
        );
        let options = RenderingOptions::default().with_original_text(true);
        assert_eq!(renderer.render_text_line(&line, &options), "(am)Hallelujah\n");
    }

    #[test]
    fn test_above_cleans_original_token() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Above));
        let line = TextLine::new(
            "Hallelujah",
            vec![ChordPlacement::new("Am", "{am}", 4, 6).unwrap()],
        );
        let options = RenderingOptions::default().with_original_text(true);
        assert_eq!(renderer.render_text_line(&line, &options), "    am\nHallelujah\n");
    }

    #[test]
    fn test_inline_same_offset_keeps_order() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        let line = TextLine::new(
            "Go",
            vec![
                ChordPlacement::bracketed("G", 0).unwrap(),
                ChordPlacement::bracketed("D", 0).unwrap(),
            ],
        );
        assert_eq!(
            renderer.render_text_line(&line, &RenderingOptions::default()),
            "[G][D]Go\n"
        );
    }

    #[test]
    fn test_malformed_chords_are_tolerated() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        let line = TextLine::new(
            "Short",
            vec![
                ChordPlacement {
                    value: String::new(),
                    original_text: String::new(),
                    start_index: 1,
                    end_index: 0,
                    placement: None,
                },
                ChordPlacement {
                    value: "G".to_string(),
                    original_text: "[G]".to_string(),
                    start_index: 40,
                    end_index: 41,
                    placement: None,
                },
            ],
        );
        assert_eq!(
            renderer.render_text_line(&line, &RenderingOptions::default()),
            "Short[G]\n"
        );

        let above = RenderingOptions::default().with_placement(ChordPlacementMode::Above);
        assert_eq!(renderer.render_text_line(&line, &above), "Short\n");
    }

    #[test]
    fn test_above_with_partly_drawn_row_keeps_row() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Above));
        let line = TextLine::new(
            "Go",
            vec![
                ChordPlacement::bracketed("G", 0).unwrap(),
                ChordPlacement::bracketed("D", 9).unwrap(),
            ],
        );
        assert_eq!(
            renderer.render_text_line(&line, &RenderingOptions::default()),
            "G\nGo\n"
        );
    }

    #[test]
    fn test_render_empty_line() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        assert_eq!(renderer.render_empty_line(&EmptyLine::new(3).unwrap()), "\n\n\n");
    }

    #[test]
    fn test_render_annotation_with_padding() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Above));
        let rules = WhitespaceRules::new(3, 0, 2, true);

        let comment = AnnotationLine::new("Play slowly", AnnotationType::Comment).unwrap();
        assert_eq!(
            renderer.render_annotation_line(&comment, &rules),
            "(Play slowly)\n\n\n\n"
        );

        let tempo = AnnotationLine::new("72 bpm", AnnotationType::Tempo).unwrap();
        assert_eq!(renderer.render_annotation_line(&tempo, &rules), "Tempo: 72 bpm\n");
    }

    #[test]
    fn test_render_line_collapses_blank_runs() {
        let renderer = ChordPlacementRenderer::new(bracket_style(ChordPlacementMode::Inline));
        let line = Line::Empty(EmptyLine::new(5).unwrap());
        let options = RenderingOptions::default();

        let collapsing = WhitespaceRules::new(0, 0, 1, false);
        assert_eq!(renderer.render_line(&line, &options, &collapsing), "\n\n");

        let preserving = WhitespaceRules::new(0, 0, 1, true);
        assert_eq!(renderer.render_line(&line, &options, &preserving), "\n\n\n\n\n");
    }

    #[test]
    fn test_clean_original_text() {
        assert_eq!(clean_original_text("[C]"), "C");
        assert_eq!(clean_original_text(" (Am7) "), "Am7");
        assert_eq!(clean_original_text("{G/B}"), "G/B");
        assert_eq!(clean_original_text("[]"), "");
    }
}
