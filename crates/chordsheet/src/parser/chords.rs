//! Chord token extraction
//!
//! Bracketed chords (`[G]Amazing [C]grace`) are lexed out of a lyric line
//! with chumsky, leaving the token-free text and the chords anchored at
//! their character offsets in that text. Bracketed text that is not a chord
//! name stays in the lyric untouched.
//!
//! Chord-only rows (`G     C    D`), as used by above-placement sheets, are
//! recognised separately so the document parser can pair them with the lyric
//! underneath.

use chumsky::prelude::*;
use regex::Regex;
use std::sync::LazyLock;

use crate::core::{ChordPlacement, PlacementHint};

static CHORD_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:N\.?C\.?|(?:[A-G][#b♯♭]?|[#b]?[1-7])(?:maj|min|m|M|dim|aug|sus|add|Δ|°|ø|\+|\d|#|b|\(|\)|-)*(?:/(?:[A-G][#b♯♭]?|[#b]?[1-7]))?)$",
    )
    .expect("chord name pattern is valid")
});

/// Lexed piece of a lyric line
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Inner text of a `[...]` token
    Bracket(String),
    /// Anything else
    Literal(String),
}

fn segments_parser<'src>(
) -> impl Parser<'src, &'src str, Vec<Segment>, extra::Err<Rich<'src, char>>> + Clone {
    let bracket = just('[')
        .ignore_then(none_of("[]").repeated().collect::<String>())
        .then_ignore(just(']'))
        .map(Segment::Bracket);

    let literal = none_of('[')
        .repeated()
        .at_least(1)
        .collect::<String>()
        .map(Segment::Literal);

    // An unmatched `[` is plain text
    let stray = just('[').to(Segment::Literal("[".to_string()));

    choice((bracket, literal, stray))
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// A lyric line with its chord tokens removed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedLine {
    pub text: String,
    pub chords: Vec<ChordPlacement>,
}

/// Check whether a token spells a chord (letter names or Nashville numbers)
pub fn is_chord_name(token: &str) -> bool {
    !token.is_empty() && CHORD_NAME.is_match(token)
}

/// Remove bracketed chords from `line`, recording where each one sat
///
/// Never fails: if the line cannot be lexed it is returned as plain text.
pub fn extract_chords(line: &str) -> ExtractedLine {
    let segments = match segments_parser().parse(line).into_result() {
        Ok(segments) => segments,
        Err(_) => {
            return ExtractedLine {
                text: line.to_string(),
                chords: Vec::new(),
            }
        }
    };

    let mut extracted = ExtractedLine::default();
    let mut position = 0;

    for segment in segments {
        match segment {
            Segment::Bracket(inner) => {
                let name = inner.trim();
                let chord = is_chord_name(name)
                    .then(|| {
                        ChordPlacement::new(
                            name,
                            format!("[{}]", inner),
                            position,
                            position + name.chars().count(),
                        )
                        .ok()
                    })
                    .flatten();

                match chord {
                    Some(chord) => extracted.chords.push(chord),
                    None => {
                        let literal = format!("[{}]", inner);
                        position += literal.chars().count();
                        extracted.text.push_str(&literal);
                    }
                }
            }
            Segment::Literal(text) => {
                position += text.chars().count();
                extracted.text.push_str(&text);
            }
        }
    }

    extracted
}

/// Recognise a row made only of chord names, returning them at their columns
///
/// Bar lines (`|`) are allowed between chords. Rows containing brackets are
/// never chord rows.
pub fn chord_row(line: &str) -> Option<Vec<ChordPlacement>> {
    if line.contains('[') || line.contains(']') {
        return None;
    }

    let mut chords = Vec::new();
    let mut token = String::new();
    let mut token_start = 0;

    // Trailing sentinel space flushes the last token
    for (index, c) in line.chars().chain(std::iter::once(' ')).enumerate() {
        if c.is_whitespace() {
            if !token.is_empty() {
                if token != "|" {
                    if !is_chord_name(&token) {
                        return None;
                    }
                    let end = token_start + token.chars().count();
                    let chord = ChordPlacement::new(token.as_str(), token.as_str(), token_start, end)
                        .ok()?
                        .with_placement(PlacementHint::Above);
                    chords.push(chord);
                }
                token.clear();
            }
        } else {
            if token.is_empty() {
                token_start = index;
            }
            token.push(c);
        }
    }

    if chords.is_empty() {
        None
    } else {
        Some(chords)
    }
}
