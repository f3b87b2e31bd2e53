//! Guitar tabs: `//` comment headers, chords above the lyric

use super::descriptor::{
    DialectDescriptor, MetadataEntry, MetadataField, MetadataStyle, RenderRequirement,
    SectionTitleStyle,
};
use crate::core::{AnnotationWraps, ChordPlacementMode, InlineWrap, LineStyle, WhitespaceRules, Wrap};

const METADATA: &[MetadataEntry] = &[
    MetadataEntry::new(MetadataField::Title, "// ", ""),
    MetadataEntry::new(MetadataField::Artist, "// Artist: ", ""),
    MetadataEntry::new(MetadataField::Key, "// Key: ", ""),
    MetadataEntry::new(MetadataField::Capo, "// Capo: ", ""),
    MetadataEntry::new(MetadataField::Tuning, "// Tuning: ", ""),
    MetadataEntry::new(MetadataField::Tempo, "// Tempo: ", ""),
];

pub static GUITAR_TABS: DialectDescriptor = DialectDescriptor {
    id: "guitar_tabs",
    name: "Guitar Tabs",
    extensions: &["tab", "txt"],
    line_style: LineStyle {
        default_placement: ChordPlacementMode::Above,
        inline_wrap: InlineWrap::Bare,
        annotations: AnnotationWraps {
            comment: Wrap::new("// ", ""),
            instruction: Wrap::new("// ", ""),
            tempo: Wrap::new("// Tempo: ", ""),
            dynamics: Wrap::new("// ", ""),
            section: Wrap::new("// ", ""),
        },
    },
    whitespace: WhitespaceRules::new(1, 0, 1, false),
    metadata: MetadataStyle {
        entries: METADATA,
        custom: None,
    },
    section_titles: SectionTitleStyle::Wrapped(Wrap::new("// ", "")),
    requirement: RenderRequirement::None,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chordsheet, Section, SectionType, SongMetadata};

    #[test]
    fn test_comment_header() {
        let sheet = Chordsheet::new("s")
            .with_title("Wonderwall")
            .with_artist("Oasis")
            .with_metadata(SongMetadata {
                capo: Some(2),
                tuning: Some("Standard".to_string()),
                ..SongMetadata::default()
            });
        assert_eq!(
            GUITAR_TABS.metadata.render(&sheet),
            "// Wonderwall\n// Artist: Oasis\n// Capo: 2\n// Tuning: Standard\n"
        );
    }

    #[test]
    fn test_section_title() {
        assert_eq!(
            GUITAR_TABS
                .section_titles
                .render(&Section::new(SectionType::Solo))
                .as_deref(),
            Some("// Solo")
        );
    }
}
