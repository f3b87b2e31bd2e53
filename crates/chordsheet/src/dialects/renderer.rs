//! Generic dialect renderer
//!
//! One [`FormatRenderer`] implementation for every dialect. Output layout:
//!
//! ```text
//! <metadata block>        only when include_metadata and non-empty
//! <blank line>
//! <section title>         when the section has one
//! <after-section blanks>
//! <section lines>
//! <between-section blanks>
//! ...
//! ```

use std::time::Instant;
use tracing::{debug, info, span, warn, Level};

use super::descriptor::{Dialect, DialectDescriptor};
use crate::core::{
    ChordPlacementRenderer, Chordsheet, ChordsheetError, FormatRenderer, Line, RenderingMetadata,
    RenderingOptions, RenderingResult, Result, Section, WhitespaceRules,
};

/// Renders a chordsheet in the dialect described by its descriptor
#[derive(Debug, Clone, Copy)]
pub struct DialectRenderer {
    descriptor: &'static DialectDescriptor,
    lines: ChordPlacementRenderer,
}

impl DialectRenderer {
    pub fn new(descriptor: &'static DialectDescriptor) -> Self {
        Self {
            descriptor,
            lines: ChordPlacementRenderer::new(descriptor.line_style),
        }
    }

    /// Renderer for one of the built-in dialects
    pub fn for_dialect(dialect: Dialect) -> Self {
        Self::new(dialect.descriptor())
    }

    pub fn descriptor(&self) -> &'static DialectDescriptor {
        self.descriptor
    }

    /// Line renderer configured for this dialect
    pub fn line_renderer(&self) -> &ChordPlacementRenderer {
        &self.lines
    }

    /// Render one section: title line, padding, then its lines
    pub fn render_section(
        &self,
        section: &Section,
        options: &RenderingOptions,
        rules: &WhitespaceRules,
    ) -> String {
        let mut output = String::new();

        if let Some(title) = self.descriptor.section_titles.render(section) {
            output.push_str(&title);
            output.push('\n');
            output.push_str(&"\n".repeat(rules.empty_lines_after_section));
        }

        // Adjacent empty lines form one blank run, collapsed as a whole
        let mut blank_run = 0;
        for line in &section.lines {
            if let Line::Empty(empty) = line {
                blank_run += empty.count;
                continue;
            }
            output.push_str(&"\n".repeat(rules.effective_empty_count(blank_run)));
            blank_run = 0;
            output.push_str(&self.lines.render_line(line, options, rules));
        }
        output.push_str(&"\n".repeat(rules.effective_empty_count(blank_run)));
        output
    }
}

/// Chord data the line renderer will have to clip or skip
fn chord_warnings(section: &Section) -> Vec<String> {
    let mut warnings = Vec::new();
    for line in &section.lines {
        let Line::Text(text) = line else { continue };
        let width = text.text.chars().count();
        for chord in &text.chords {
            if chord.value.trim().is_empty() {
                warnings.push(format!("skipped empty chord at index {}", chord.start_index));
            } else if chord.start_index > width {
                warnings.push(format!(
                    "chord {} at index {} is past the end of \"{}\"",
                    chord.value, chord.start_index, text.text
                ));
            }
        }
    }
    warnings
}

impl FormatRenderer for DialectRenderer {
    fn format(&self) -> &str {
        self.descriptor.id
    }

    fn name(&self) -> &str {
        self.descriptor.name
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn default_whitespace(&self) -> WhitespaceRules {
        self.descriptor.whitespace
    }

    fn can_render(&self, chordsheet: &Chordsheet) -> bool {
        self.descriptor.requirement.check(chordsheet).is_ok()
    }

    fn render(&self, chordsheet: &Chordsheet, options: &RenderingOptions) -> Result<RenderingResult> {
        let render_span = span!(
            Level::INFO,
            "render_chordsheet",
            format = self.descriptor.id,
            sections = chordsheet.sections.len()
        );
        let _enter = render_span.enter();
        let started = Instant::now();

        if let Err(reason) = self.descriptor.requirement.check(chordsheet) {
            warn!(format = self.descriptor.id, reason, "Chordsheet cannot be rendered");
            return Err(ChordsheetError::cannot_render(self.descriptor.id, reason));
        }

        let rules = self.descriptor.whitespace.merged(&options.whitespace);
        let mut content = String::new();
        let mut metadata = RenderingMetadata::default();

        if options.include_metadata {
            let block = self.descriptor.metadata.render(chordsheet);
            if !block.is_empty() {
                content.push_str(&block);
                content.push('\n');
            }
        }

        let mut rendered = Vec::with_capacity(chordsheet.sections.len());
        for section in &chordsheet.sections {
            let text = self.render_section(section, options, &rules);
            if text.trim().is_empty() {
                debug!(section_type = %section.section_type, "Skipping blank section");
                continue;
            }

            metadata.sections_rendered += 1;
            metadata.lines_rendered += section.lines.len();
            metadata.chords_rendered += section.chord_count();
            metadata.warnings.extend(chord_warnings(section));
            rendered.push(text);
        }

        content.push_str(&rendered.join(&"\n".repeat(rules.empty_lines_between_sections)));
        metadata.rendering_time = started.elapsed();

        info!(
            sections = metadata.sections_rendered,
            lines = metadata.lines_rendered,
            chords = metadata.chords_rendered,
            warnings = metadata.warnings.len(),
            "Rendering completed"
        );

        Ok(RenderingResult {
            content,
            format: self.descriptor.id.to_string(),
            metadata,
        })
    }
}
