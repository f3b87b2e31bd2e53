//! ChordPro: `{directive: value}` metadata, chords in brackets inline

use super::descriptor::{
    CustomMetadataStyle, DialectDescriptor, MetadataEntry, MetadataField, MetadataStyle,
    RenderRequirement, SectionTitleStyle,
};
use crate::core::{
    AnnotationWraps, ChordPlacementMode, InlineWrap, LineStyle, SectionType, WhitespaceRules, Wrap,
};

const METADATA: &[MetadataEntry] = &[
    MetadataEntry::new(MetadataField::Title, "{title: ", "}"),
    MetadataEntry::new(MetadataField::Artist, "{artist: ", "}"),
    MetadataEntry::new(MetadataField::Key, "{key: ", "}"),
    MetadataEntry::new(MetadataField::Album, "{album: ", "}"),
    MetadataEntry::new(MetadataField::Year, "{year: ", "}"),
    MetadataEntry::new(MetadataField::Tempo, "{tempo: ", "}"),
    MetadataEntry::new(MetadataField::Time, "{time: ", "}"),
    MetadataEntry::new(MetadataField::Capo, "{capo: ", "}"),
    MetadataEntry::new(MetadataField::Ccli, "{ccli: ", "}"),
    MetadataEntry::new(MetadataField::Tuning, "{tuning: ", "}"),
];

const SECTION_DIRECTIVES: &[(SectionType, Wrap)] = &[
    (SectionType::Verse, Wrap::new("{verse: ", "}")),
    (SectionType::Chorus, Wrap::new("{chorus: ", "}")),
    (SectionType::Bridge, Wrap::new("{bridge: ", "}")),
    (SectionType::Intro, Wrap::new("{intro: ", "}")),
    (SectionType::Outro, Wrap::new("{outro: ", "}")),
];

pub static CHORDPRO: DialectDescriptor = DialectDescriptor {
    id: "chordpro",
    name: "ChordPro",
    extensions: &["cho", "chordpro", "chopro", "crd"],
    line_style: LineStyle {
        default_placement: ChordPlacementMode::Inline,
        inline_wrap: InlineWrap::Bracketed,
        annotations: AnnotationWraps {
            comment: Wrap::new("{comment: ", "}"),
            instruction: Wrap::new("{comment_italic: ", "}"),
            tempo: Wrap::new("{tempo: ", "}"),
            dynamics: Wrap::new("{comment: ", "}"),
            section: Wrap::new("{comment: ", "}"),
        },
    },
    whitespace: WhitespaceRules::new(0, 0, 1, false),
    metadata: MetadataStyle {
        entries: METADATA,
        custom: Some(CustomMetadataStyle {
            prefix: "{meta: ",
            separator: " ",
            suffix: "}",
        }),
    },
    section_titles: SectionTitleStyle::Directive {
        directives: SECTION_DIRECTIVES,
        fallback: Wrap::new("{comment: ", "}"),
    },
    requirement: RenderRequirement::None,
};
