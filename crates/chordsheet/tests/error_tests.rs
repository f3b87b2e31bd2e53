//! Tests for core error types

use chordsheet::core::ChordsheetError;
use chordsheet::prelude::*;

#[test]
fn test_cannot_render_error() {
    let error = ChordsheetError::cannot_render("nashville", "an original key is required");
    assert_eq!(
        error.to_string(),
        "cannot render in dialect nashville: an original key is required"
    );
}

#[test]
fn test_unsupported_format_error() {
    let error = ChordsheetError::unsupported_format("abc");
    assert_eq!(error.to_string(), "no renderer available for format: abc");
}

#[test]
fn test_import_error() {
    let error = ChordsheetError::import("bad payload");
    assert!(error.to_string().contains("Import error"));
}

#[test]
fn test_json_error_conversion() {
    let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: ChordsheetError = source.into();
    assert!(matches!(error, ChordsheetError::Json { .. }));
    assert!(error.to_string().starts_with("JSON error"));
}

#[test]
fn test_constructors_reject_bad_data() {
    assert!(matches!(
        ChordPlacement::new("C", "[C]", 3, 2),
        Err(ChordsheetError::Validation { .. })
    ));
    assert!(matches!(
        ChordPlacement::new(" ", "[ ]", 0, 0),
        Err(ChordsheetError::Validation { .. })
    ));
    assert!(matches!(EmptyLine::new(0), Err(ChordsheetError::Validation { .. })));
    assert!(matches!(
        AnnotationLine::new("", AnnotationType::Comment),
        Err(ChordsheetError::Validation { .. })
    ));
}

#[test]
fn test_renderer_tolerates_what_constructors_reject() {
    // Struct literals bypass validation; rendering must still succeed
    let bad = ChordPlacement {
        value: String::new(),
        original_text: String::new(),
        start_index: 4,
        end_index: 1,
        placement: None,
    };
    let good = ChordPlacement::bracketed("G", 0).unwrap();
    let sheet = Chordsheet::new("x").with_section(
        Section::new(SectionType::Verse)
            .with_lines(vec![TextLine::new("la la", vec![bad, good]).into()]),
    );

    let result = chordsheet::render_with_options(&sheet, "chordpro", &RenderingOptions::default())
        .unwrap();
    assert_eq!(result.content, "{verse: Verse}\n[G]la la\n");
    assert_eq!(result.metadata.warnings.len(), 1);
}
