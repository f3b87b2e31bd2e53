//! Nashville number system charts; a key is mandatory

use super::descriptor::{
    DialectDescriptor, MetadataEntry, MetadataField, MetadataStyle, RenderRequirement,
    SectionTitleStyle,
};
use crate::core::{AnnotationWraps, ChordPlacementMode, InlineWrap, LineStyle, WhitespaceRules, Wrap};

const METADATA: &[MetadataEntry] = &[
    MetadataEntry::new(MetadataField::Title, "Title: ", ""),
    MetadataEntry::new(MetadataField::Key, "Key: ", ""),
    MetadataEntry::new(MetadataField::Tempo, "Tempo: ", ""),
    MetadataEntry::new(MetadataField::Time, "Time: ", ""),
];

pub static NASHVILLE: DialectDescriptor = DialectDescriptor {
    id: "nashville",
    name: "Nashville Number System",
    extensions: &["nns", "txt"],
    line_style: LineStyle {
        default_placement: ChordPlacementMode::Inline,
        inline_wrap: InlineWrap::Bracketed,
        annotations: AnnotationWraps {
            comment: Wrap::new("(", ")"),
            instruction: Wrap::new("(", ")"),
            tempo: Wrap::new("Tempo: ", ""),
            dynamics: Wrap::new("(", ")"),
            section: Wrap::new("", ":"),
        },
    },
    whitespace: WhitespaceRules::new(0, 0, 1, false),
    metadata: MetadataStyle {
        entries: METADATA,
        custom: None,
    },
    section_titles: SectionTitleStyle::Wrapped(Wrap::new("", ":")),
    requirement: RenderRequirement::OriginalKey,
};
