//! Property tests for the line renderer and dialect output

use chordsheet::prelude::*;
use proptest::prelude::*;

const CHORD_NAMES: [&str; 6] = ["G", "Am", "F#m7", "C/E", "Bbsus4", "D"];

/// Lyric text plus chords whose offsets fall inside it
fn lyric_with_chords() -> impl Strategy<Value = TextLine> {
    "[a-z ]{1,40}".prop_flat_map(|text| {
        let width = text.chars().count();
        let chords = prop::collection::vec((0..=width, 0..CHORD_NAMES.len()), 0..6);
        (Just(text), chords).prop_map(|(text, chords)| {
            let chords = chords
                .into_iter()
                .map(|(start, name)| ChordPlacement::bracketed(CHORD_NAMES[name], start).unwrap())
                .collect();
            TextLine::new(text, chords)
        })
    })
}

fn inline_options() -> RenderingOptions {
    RenderingOptions::default().with_placement(ChordPlacementMode::Inline)
}

fn above_options() -> RenderingOptions {
    RenderingOptions::default().with_placement(ChordPlacementMode::Above)
}

proptest! {
    #[test]
    fn empty_line_renders_exact_newlines(count in 1usize..64) {
        let renderer = DialectRenderer::for_dialect(Dialect::Songbook);
        let line = EmptyLine::new(count).unwrap();
        prop_assert_eq!(renderer.line_renderer().render_empty_line(&line), "\n".repeat(count));
    }

    #[test]
    fn inline_tokens_splice_into_text(line in lyric_with_chords()) {
        let renderer = DialectRenderer::for_dialect(Dialect::ChordPro);
        let output = renderer.line_renderer().render_text_line(&line, &inline_options());

        prop_assert!(output.ends_with('\n'));
        prop_assert_eq!(output.matches('[').count(), line.chords.len());

        let mut stripped = output.clone();
        for name in CHORD_NAMES {
            stripped = stripped.replace(&format!("[{}]", name), "");
        }
        prop_assert_eq!(stripped, format!("{}\n", line.text));
    }

    #[test]
    fn above_chord_row_fits_the_lyric(line in lyric_with_chords()) {
        let width = line.text.chars().count();
        // A chord starting at the line end has nowhere to draw
        prop_assume!(line.chords.iter().any(|chord| chord.start_index < width));
        let renderer = DialectRenderer::for_dialect(Dialect::OnSong);
        let output = renderer.line_renderer().render_text_line(&line, &above_options());

        let rows: Vec<&str> = output.split('\n').collect();
        prop_assert_eq!(rows.len(), 3);
        prop_assert_eq!(rows[1], line.text.as_str());
        prop_assert_eq!(rows[2], "");
        prop_assert!(rows[0].chars().count() <= width);
        prop_assert_eq!(rows[0], rows[0].trim_end());
    }

    #[test]
    fn above_without_drawable_chords_is_just_the_lyric(text in "[a-z ]{1,40}") {
        let width = text.chars().count();
        let line = TextLine::new(text.clone(), vec![ChordPlacement::bracketed("G", width).unwrap()]);
        let renderer = DialectRenderer::for_dialect(Dialect::OnSong);
        prop_assert_eq!(
            renderer.line_renderer().render_text_line(&line, &above_options()),
            format!("{}\n", text)
        );
    }

    #[test]
    fn blank_sections_are_not_counted(layout in prop::collection::vec(any::<bool>(), 1..8)) {
        // Songbook needs at least one chord somewhere
        prop_assume!(layout.iter().any(|has_lyrics| *has_lyrics));
        let mut sheet = Chordsheet::new("props").with_key("C");
        for has_lyrics in &layout {
            let section = if *has_lyrics {
                Section::new(SectionType::Verse).with_lines(vec![
                    TextLine::new("la la", vec![ChordPlacement::bracketed("C", 0).unwrap()]).into(),
                ])
            } else {
                Section::new(SectionType::Unknown).with_lines(vec![EmptyLine::new(2).unwrap().into()])
            };
            sheet = sheet.with_section(section);
        }
        let expected = layout.iter().filter(|has_lyrics| **has_lyrics).count();

        for dialect in Dialect::ALL {
            let renderer = DialectRenderer::for_dialect(dialect);
            let result = renderer.render(&sheet, &RenderingOptions::default()).unwrap();
            prop_assert_eq!(result.metadata.sections_rendered, expected);
            prop_assert_eq!(result.metadata.chords_rendered, expected);
        }
    }

    #[test]
    fn chorded_sheet_with_key_renders_everywhere(line in lyric_with_chords()) {
        prop_assume!(!line.chords.is_empty());
        let sheet = Chordsheet::new("any")
            .with_key("G")
            .with_section(Section::new(SectionType::Chorus).with_lines(vec![line.into()]));

        for dialect in Dialect::ALL {
            prop_assert!(DialectRenderer::for_dialect(dialect).can_render(&sheet));
        }
    }
}
