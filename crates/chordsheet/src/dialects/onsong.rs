//! OnSong: `Label: value` metadata, `Name:` section titles

use super::descriptor::{
    CustomMetadataStyle, DialectDescriptor, MetadataEntry, MetadataField, MetadataStyle,
    RenderRequirement, SectionTitleStyle,
};
use crate::core::{AnnotationWraps, ChordPlacementMode, InlineWrap, LineStyle, WhitespaceRules, Wrap};

const METADATA: &[MetadataEntry] = &[
    MetadataEntry::new(MetadataField::Title, "Title: ", ""),
    MetadataEntry::new(MetadataField::Artist, "Artist: ", ""),
    MetadataEntry::new(MetadataField::Key, "Key: ", ""),
    MetadataEntry::new(MetadataField::Album, "Album: ", ""),
    MetadataEntry::new(MetadataField::Year, "Year: ", ""),
    MetadataEntry::new(MetadataField::Tempo, "Tempo: ", ""),
    MetadataEntry::new(MetadataField::Time, "Time: ", ""),
    MetadataEntry::new(MetadataField::Capo, "Capo: ", ""),
    MetadataEntry::new(MetadataField::Ccli, "CCLI: ", ""),
    MetadataEntry::new(MetadataField::Tuning, "Tuning: ", ""),
];

pub static ONSONG: DialectDescriptor = DialectDescriptor {
    id: "onsong",
    name: "OnSong",
    extensions: &["onsong", "txt"],
    line_style: LineStyle {
        default_placement: ChordPlacementMode::Inline,
        inline_wrap: InlineWrap::Bracketed,
        annotations: AnnotationWraps {
            comment: Wrap::new("*", ""),
            instruction: Wrap::new("*", ""),
            tempo: Wrap::new("Tempo: ", ""),
            dynamics: Wrap::new("*", ""),
            section: Wrap::new("", ":"),
        },
    },
    whitespace: WhitespaceRules::new(0, 0, 1, false),
    metadata: MetadataStyle {
        entries: METADATA,
        custom: Some(CustomMetadataStyle {
            prefix: "",
            separator: ": ",
            suffix: "",
        }),
    },
    section_titles: SectionTitleStyle::Wrapped(Wrap::new("", ":")),
    requirement: RenderRequirement::None,
};
