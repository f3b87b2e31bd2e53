//! Data-driven dialect descriptions
//!
//! Every dialect is a static [`DialectDescriptor`]; the generic
//! [`DialectRenderer`](super::DialectRenderer) reads it to produce exact
//! output. Adding a dialect means adding a table, not a renderer.

use std::fmt;
use std::str::FromStr;

use crate::core::{Chordsheet, LineStyle, Section, SectionType, WhitespaceRules, Wrap};

/// Song-level field that can appear in a metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataField {
    Title,
    Artist,
    Key,
    Album,
    Year,
    Tempo,
    Time,
    Capo,
    Ccli,
    Tuning,
}

impl MetadataField {
    /// Value of this field in the chordsheet, if set and non-blank
    pub fn value(&self, chordsheet: &Chordsheet) -> Option<String> {
        let metadata = chordsheet.metadata.as_ref();
        let value = match self {
            MetadataField::Title => chordsheet.title.clone(),
            MetadataField::Artist => chordsheet.artist.clone(),
            MetadataField::Key => chordsheet.original_key.clone(),
            MetadataField::Album => metadata.and_then(|m| m.album.clone()),
            MetadataField::Year => metadata.and_then(|m| m.year).map(|y| y.to_string()),
            MetadataField::Tempo => metadata.and_then(|m| m.tempo).map(|t| t.to_string()),
            MetadataField::Time => metadata.and_then(|m| m.time_signature.clone()),
            MetadataField::Capo => metadata.and_then(|m| m.capo).map(|c| c.to_string()),
            MetadataField::Ccli => metadata.and_then(|m| m.ccli.clone()),
            MetadataField::Tuning => metadata.and_then(|m| m.tuning.clone()),
        }?;

        let value = value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// One line of a metadata block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataEntry {
    pub field: MetadataField,
    pub wrap: Wrap,
    pub uppercase: bool,
}

impl MetadataEntry {
    pub const fn new(field: MetadataField, prefix: &'static str, suffix: &'static str) -> Self {
        Self {
            field,
            wrap: Wrap::new(prefix, suffix),
            uppercase: false,
        }
    }

    pub const fn uppercased(mut self) -> Self {
        self.uppercase = true;
        self
    }
}

/// How free-form `custom` metadata is written: `prefix key separator value suffix`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CustomMetadataStyle {
    pub prefix: &'static str,
    pub separator: &'static str,
    pub suffix: &'static str,
}

/// Metadata block layout of a dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetadataStyle {
    pub entries: &'static [MetadataEntry],
    pub custom: Option<CustomMetadataStyle>,
}

impl MetadataStyle {
    /// Render the block, one line per present field; empty when nothing is set
    pub fn render(&self, chordsheet: &Chordsheet) -> String {
        let mut block = String::new();

        for entry in self.entries {
            if let Some(value) = entry.field.value(chordsheet) {
                let value = if entry.uppercase {
                    value.to_uppercase()
                } else {
                    value
                };
                block.push_str(&entry.wrap.apply(&value));
                block.push('\n');
            }
        }

        if let (Some(custom), Some(metadata)) = (self.custom, chordsheet.metadata.as_ref()) {
            for (key, value) in &metadata.custom {
                if key.trim().is_empty() || value.trim().is_empty() {
                    continue;
                }
                block.push_str(&format!(
                    "{}{}{}{}{}\n",
                    custom.prefix,
                    key.trim(),
                    custom.separator,
                    value.trim(),
                    custom.suffix
                ));
            }
        }

        block
    }
}

/// How a section's title line is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTitleStyle {
    /// Per-type directive, with a fallback wrap for types not in the table
    Directive {
        directives: &'static [(SectionType, Wrap)],
        fallback: Wrap,
    },
    /// The same wrap for every type
    Wrapped(Wrap),
    /// Uppercase for the listed types, capitalised otherwise
    Cased { uppercase: &'static [SectionType] },
}

impl SectionTitleStyle {
    /// Title line for a section (without newline), or `None` if untitled
    pub fn render(&self, section: &Section) -> Option<String> {
        let name = section.display_title()?;

        let line = match self {
            SectionTitleStyle::Directive {
                directives,
                fallback,
            } => directives
                .iter()
                .find(|(section_type, _)| *section_type == section.section_type)
                .map(|(_, wrap)| *wrap)
                .unwrap_or(*fallback)
                .apply(&name),
            SectionTitleStyle::Wrapped(wrap) => wrap.apply(&name),
            SectionTitleStyle::Cased { uppercase } => {
                if uppercase.contains(&section.section_type) {
                    name.to_uppercase()
                } else {
                    capitalize(&name)
                }
            }
        };
        Some(line)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Extra precondition a dialect places on its input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderRequirement {
    None,
    /// At least one text line must carry a chord
    Chords,
    /// `original_key` must be set and non-blank
    OriginalKey,
}

impl RenderRequirement {
    /// `Err(reason)` when the chordsheet does not satisfy the requirement
    pub fn check(&self, chordsheet: &Chordsheet) -> Result<(), &'static str> {
        match self {
            RenderRequirement::None => Ok(()),
            RenderRequirement::Chords if !chordsheet.has_chords() => {
                Err("at least one chord is required")
            }
            RenderRequirement::OriginalKey
                if chordsheet
                    .original_key
                    .as_deref()
                    .map_or(true, |key| key.trim().is_empty()) =>
            {
                Err("an original key is required")
            }
            _ => Ok(()),
        }
    }
}

/// Everything that distinguishes one dialect from another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectDescriptor {
    /// Registry identifier, e.g. `guitar_tabs`
    pub id: &'static str,
    pub name: &'static str,
    /// Conventional file extensions, most common first
    pub extensions: &'static [&'static str],
    pub line_style: LineStyle,
    pub whitespace: WhitespaceRules,
    pub metadata: MetadataStyle,
    pub section_titles: SectionTitleStyle,
    pub requirement: RenderRequirement,
}

/// The built-in dialects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    ChordPro,
    OnSong,
    Songbook,
    GuitarTabs,
    Nashville,
}

impl Dialect {
    pub const ALL: [Dialect; 5] = [
        Dialect::ChordPro,
        Dialect::OnSong,
        Dialect::Songbook,
        Dialect::GuitarTabs,
        Dialect::Nashville,
    ];

    pub fn descriptor(&self) -> &'static DialectDescriptor {
        match self {
            Dialect::ChordPro => &super::CHORDPRO,
            Dialect::OnSong => &super::ONSONG,
            Dialect::Songbook => &super::SONGBOOK,
            Dialect::GuitarTabs => &super::GUITAR_TABS,
            Dialect::Nashville => &super::NASHVILLE,
        }
    }

    /// Registry identifier
    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chordpro" | "cho" => Ok(Dialect::ChordPro),
            "onsong" => Ok(Dialect::OnSong),
            "songbook" => Ok(Dialect::Songbook),
            "guitar_tabs" | "guitar-tabs" | "tabs" => Ok(Dialect::GuitarTabs),
            "nashville" | "nns" => Ok(Dialect::Nashville),
            _ => Err(format!("Unknown dialect: {}", s)),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}
