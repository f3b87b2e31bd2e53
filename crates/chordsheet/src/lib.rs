//! Chordsheet - classify chord sheets and render them in other dialects
//!
//! A library for turning raw chord sheet text into a format-agnostic song
//! model and rendering that model as ChordPro, OnSong, Songbook, Guitar Tabs
//! or Nashville text.
//!
//! # Quick Start
//!
//! ```rust
//! use chordsheet::convert;
//!
//! let input = "{title: Amazing Grace}\n[Verse 1]\n[C]Amazing [F]grace how sweet the sound";
//! let songbook = convert(input, "songbook").unwrap();
//! assert!(songbook.contains("C       F\nAmazing grace how sweet the sound\n"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use chordsheet::prelude::*;
//!
//! let sheet = ChordsheetParser::new().parse("[Chorus]\n[G]Hallelujah\n(Softly)");
//! assert_eq!(sheet.sections[0].section_type, SectionType::Chorus);
//!
//! let registry = RendererRegistry::with_default_renderers();
//! let options = RenderingOptions::default().with_placement(ChordPlacementMode::Above);
//! let result = registry.render("onsong", &sheet, &options).unwrap();
//! assert_eq!(result.content, "Chorus:\nG\nHallelujah\n*Softly\n");
//! assert_eq!(result.metadata.chords_rendered, 1);
//! ```

pub mod core;
pub mod dialects;
pub mod parser;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AnnotationLine, AnnotationType, ChordPlacement, ChordPlacementMode, Chordsheet,
        ChordsheetError, EmptyLine, FormatRenderer, Line, LineProcessor, RenderingOptions,
        RenderingResult, Section, SectionType, SongMetadata, TextLine, WhitespaceOverrides,
        WhitespaceRules,
    };
    pub use crate::dialects::{Dialect, DialectRenderer, RendererRegistry};
    pub use crate::parser::{ChordsheetParser, LineClassifier};
}

/// Parse chord sheet text into a [`Chordsheet`]
///
/// Parsing never fails; lines that are not recognised become plain text.
///
/// # Example
/// ```rust
/// let sheet = chordsheet::parse("{title: Be Still}\n[Verse]\n[D]Be still");
/// assert_eq!(sheet.id, "be-still");
/// assert_eq!(sheet.chord_count(), 1);
/// ```
pub fn parse(input: &str) -> Chordsheet {
    parser::ChordsheetParser::new().parse(input)
}

/// Render a chordsheet in a dialect with default options
///
/// # Arguments
/// * `chordsheet` - The song to render
/// * `dialect` - A dialect identifier such as `chordpro` or `guitar_tabs`
///
/// # Returns
/// * `Ok(String)` - The rendered text
/// * `Err` - If the dialect is unknown or cannot represent the song
pub fn render(chordsheet: &Chordsheet, dialect: &str) -> anyhow::Result<String> {
    Ok(render_with_options(chordsheet, dialect, &RenderingOptions::default())?.content)
}

/// Render a chordsheet with explicit options, returning the full result
///
/// # Example
/// ```rust
/// use chordsheet::{parse, render_with_options, RenderingOptions};
///
/// let sheet = parse("[C]Amazing [F]grace");
/// let options = RenderingOptions::default().with_original_text(true);
/// let result = render_with_options(&sheet, "nashville", &options);
/// // Nashville charts need a key
/// assert!(result.is_err());
/// ```
pub fn render_with_options(
    chordsheet: &Chordsheet,
    dialect: &str,
    options: &RenderingOptions,
) -> anyhow::Result<RenderingResult> {
    let registry = dialects::RendererRegistry::with_default_renderers();
    Ok(registry.render(dialect, chordsheet, options)?)
}

/// Parse chord sheet text and render it in another dialect
pub fn convert(input: &str, dialect: &str) -> anyhow::Result<String> {
    render(&parse(input), dialect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_chordpro_to_onsong() {
        let output = convert(
            "{title: Amazing Grace}\n{key: G}\n\n[Verse 1]\n[G]Amazing [C]grace\n",
            "onsong",
        )
        .unwrap();
        assert_eq!(
            output,
            "Title: Amazing Grace\nKey: G\n\nVerse 1:\n[G]Amazing [C]grace\n"
        );
    }

    #[test]
    fn test_convert_unknown_dialect() {
        let err = convert("[C]la", "musicxml").unwrap_err();
        assert!(err.to_string().contains("musicxml"));
    }

    #[test]
    fn test_render_matches_registry() {
        let sheet = parse("[Chorus]\n[D]Sing");
        assert_eq!(render(&sheet, "chordpro").unwrap(), "{chorus: Chorus}\n[D]Sing\n");
    }

    #[test]
    fn test_songbook_requires_chords() {
        let err = convert("Just words", "songbook").unwrap_err();
        assert!(err.to_string().contains("cannot render in dialect songbook"));
    }
}
