//! Import of externally supplied songs
//!
//! Accepts either a serialized [`Chordsheet`] document (JSON) or plain sheet
//! text. JSON goes through structural checks before typed deserialisation so
//! that a wrong shape produces a readable error instead of a serde path.

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::document::{slugify, ChordsheetParser};
use crate::core::{AnnotationLine, Chordsheet, ChordsheetError, EmptyLine, Line, Result};

/// Where an imported chordsheet came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportSource {
    Json,
    Text,
}

/// An imported chordsheet plus anything worth telling the user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub chordsheet: Chordsheet,
    pub source: ImportSource,
    pub warnings: Vec<String>,
}

/// Import raw bytes, stripping a UTF-8 byte order mark
pub fn import_bytes(bytes: &[u8]) -> Result<ImportResult> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ChordsheetError::import(format!(
            "input is not valid UTF-8 (invalid byte at offset {})",
            e.valid_up_to()
        ))
    })?;
    import_text(text)
}

/// Import text: a JSON object is read as a chordsheet document, anything
/// else is parsed as sheet text
pub fn import_text(input: &str) -> Result<ImportResult> {
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    if let Ok(Value::Object(_)) = serde_json::from_str::<Value>(input) {
        let chordsheet = chordsheet_from_json(input)?;
        let warnings = diagnostics(&chordsheet);
        debug!(id = %chordsheet.id, warnings = warnings.len(), "Imported JSON chordsheet");
        return Ok(ImportResult {
            chordsheet,
            source: ImportSource::Json,
            warnings,
        });
    }

    let chordsheet = ChordsheetParser::new().parse(input);
    let warnings = diagnostics(&chordsheet);
    Ok(ImportResult {
        chordsheet,
        source: ImportSource::Text,
        warnings,
    })
}

/// Deserialize a JSON chordsheet after checking its shape
pub fn chordsheet_from_json(input: &str) -> Result<Chordsheet> {
    let value: Value = serde_json::from_str(input)?;
    check_structure(&value)?;

    let mut chordsheet: Chordsheet = serde_json::from_value(value)?;
    validate_lines(&chordsheet)?;
    if chordsheet.id.trim().is_empty() {
        chordsheet.id = chordsheet
            .title
            .as_deref()
            .map(slugify)
            .filter(|slug| !slug.is_empty())
            .unwrap_or_else(|| "untitled".to_string());
    }
    Ok(chordsheet)
}

/// Run empty and annotation lines through their constructors
///
/// Deserialisation fills struct fields directly, so a zero count or a blank
/// annotation value would otherwise reach the renderers.
fn validate_lines(chordsheet: &Chordsheet) -> Result<()> {
    for (section_index, section) in chordsheet.sections.iter().enumerate() {
        for (line_index, line) in section.lines.iter().enumerate() {
            let checked = match line {
                Line::Empty(empty) => EmptyLine::new(empty.count).map(|_| ()),
                Line::Annotation(annotation) => {
                    AnnotationLine::new(annotation.value.as_str(), annotation.annotation_type)
                        .map(|_| ())
                }
                Line::Text(_) => Ok(()),
            };
            checked.map_err(|e| {
                ChordsheetError::validation(format!(
                    "line {} of section {}: {}",
                    line_index, section_index, e
                ))
            })?;
        }
    }
    Ok(())
}

fn check_structure(value: &Value) -> Result<()> {
    let root = value
        .as_object()
        .ok_or_else(|| ChordsheetError::import("chordsheet must be a JSON object"))?;

    let sections = match root.get("sections") {
        None => return Ok(()),
        Some(Value::Array(sections)) => sections,
        Some(_) => return Err(ChordsheetError::import("`sections` must be an array")),
    };

    for (section_index, section) in sections.iter().enumerate() {
        let section = section.as_object().ok_or_else(|| {
            ChordsheetError::import(format!("section {} must be an object", section_index))
        })?;

        let lines = match section.get("lines") {
            Some(Value::Array(lines)) => lines,
            _ => {
                return Err(ChordsheetError::import(format!(
                    "section {} must have a `lines` array",
                    section_index
                )))
            }
        };

        for (line_index, line) in lines.iter().enumerate() {
            let line_type = line.get("type").and_then(Value::as_str).ok_or_else(|| {
                ChordsheetError::import(format!(
                    "line {} of section {} has no `type`",
                    line_index, section_index
                ))
            })?;
            if !matches!(line_type, "text" | "empty" | "annotation") {
                return Err(ChordsheetError::UnknownLineType {
                    line_type: line_type.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Chord data the renderers will tolerate but probably should not have to
pub fn diagnostics(chordsheet: &Chordsheet) -> Vec<String> {
    let mut warnings = Vec::new();

    for (section_index, section) in chordsheet.sections.iter().enumerate() {
        for line in &section.lines {
            let Line::Text(text) = line else { continue };
            let width = text.text.chars().count();

            for chord in &text.chords {
                let location = match text.line_number {
                    Some(number) => format!("line {}", number),
                    None => format!("section {}", section_index + 1),
                };
                if chord.value.trim().is_empty() {
                    warnings.push(format!("{}: chord with empty value", location));
                } else if chord.start_index > width {
                    warnings.push(format!(
                        "{}: chord {} starts at {} past the end of the text ({} characters)",
                        location, chord.value, chord.start_index, width
                    ));
                }
                if chord.end_index < chord.start_index {
                    warnings.push(format!(
                        "{}: chord {} ends before it starts",
                        location, chord.value
                    ));
                }
            }
        }
    }

    for warning in &warnings {
        warn!("{}", warning);
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SectionType;

    const JSON_SHEET: &str = r#"{
        "title": "Amazing Grace",
        "originalKey": "G",
        "sections": [
            {
                "type": "verse",
                "title": "Verse 1",
                "lines": [
                    {"type": "text", "text": "Amazing grace", "chords": [
                        {"value": "G", "originalText": "[G]", "startIndex": 0, "endIndex": 1}
                    ]},
                    {"type": "empty", "count": 1},
                    {"type": "annotation", "value": "Repeat", "annotationType": "instruction"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_import_json_document() {
        let result = import_text(JSON_SHEET).unwrap();
        assert_eq!(result.source, ImportSource::Json);
        assert!(result.warnings.is_empty());

        let sheet = result.chordsheet;
        assert_eq!(sheet.id, "amazing-grace");
        assert_eq!(sheet.original_key.as_deref(), Some("G"));
        assert_eq!(sheet.sections[0].section_type, SectionType::Verse);
        assert_eq!(sheet.sections[0].lines.len(), 3);
        assert_eq!(sheet.chord_count(), 1);
    }

    #[test]
    fn test_import_plain_text() {
        let result = import_text("{title: Hello}\n[C]World\n").unwrap();
        assert_eq!(result.source, ImportSource::Text);
        assert_eq!(result.chordsheet.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_unknown_line_type() {
        let json = r#"{"sections": [{"type": "verse", "lines": [{"type": "tab", "value": "e|---"}]}]}"#;
        let err = chordsheet_from_json(json).unwrap_err();
        assert!(matches!(err, ChordsheetError::UnknownLineType { ref line_type } if line_type == "tab"));
        assert_eq!(err.to_string(), "unknown line type: tab");
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            chordsheet_from_json("[1, 2]"),
            Err(ChordsheetError::Import { .. })
        ));
        assert!(matches!(
            chordsheet_from_json(r#"{"sections": "verse"}"#),
            Err(ChordsheetError::Import { .. })
        ));
        assert!(matches!(
            chordsheet_from_json(r#"{"sections": [{"type": "verse"}]}"#),
            Err(ChordsheetError::Import { .. })
        ));
        assert!(matches!(
            chordsheet_from_json("{not json"),
            Err(ChordsheetError::Json { .. })
        ));
    }

    #[test]
    fn test_negative_index_rejected_by_deserialisation() {
        let json = r#"{"sections": [{"type": "verse", "lines": [
            {"type": "text", "text": "la", "chords": [
                {"value": "C", "originalText": "[C]", "startIndex": -1, "endIndex": 0}
            ]}
        ]}]}"#;
        assert!(matches!(
            chordsheet_from_json(json),
            Err(ChordsheetError::Json { .. })
        ));
    }

    #[test]
    fn test_lines_go_through_constructor_checks() {
        let zero_count = r#"{"sections": [{"type": "verse", "lines": [
            {"type": "text", "text": "la"},
            {"type": "empty", "count": 0}
        ]}]}"#;
        let err = chordsheet_from_json(zero_count).unwrap_err();
        assert!(matches!(err, ChordsheetError::Validation { .. }));
        assert!(err.to_string().contains("line 1 of section 0"));
        assert!(err.to_string().contains("count must be at least 1"));

        let blank_value = r#"{"sections": [{"type": "verse", "lines": [
            {"type": "annotation", "value": "  ", "annotationType": "comment"}
        ]}]}"#;
        let err = chordsheet_from_json(blank_value).unwrap_err();
        assert!(matches!(err, ChordsheetError::Validation { .. }));
        assert!(err.to_string().contains("annotation value must not be empty"));
    }

    #[test]
    fn test_diagnostics_for_out_of_range_chords() {
        let json = r#"{"id": "x", "sections": [{"type": "verse", "lines": [
            {"type": "text", "text": "la", "chords": [
                {"value": "C", "originalText": "[C]", "startIndex": 10, "endIndex": 11},
                {"value": "", "originalText": "[]", "startIndex": 0, "endIndex": 0}
            ]}
        ]}]}"#;
        let result = import_text(json).unwrap();
        assert_eq!(result.warnings.len(), 2);
        assert!(result.warnings[0].contains("past the end"));
        assert!(result.warnings[1].contains("empty value"));
    }

    #[test]
    fn test_import_bytes() {
        let mut bytes = b"\xEF\xBB\xBF".to_vec();
        bytes.extend_from_slice(b"[Verse]\n[C]Hi\n");
        let result = import_bytes(&bytes).unwrap();
        assert_eq!(result.chordsheet.sections.len(), 1);

        let err = import_bytes(&[0x66, 0xff, 0xfe]).unwrap_err();
        assert!(err.to_string().contains("UTF-8"));
    }
}
