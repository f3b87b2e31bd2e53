//! Songbook: printed-book layout with chords above the lyric

use super::descriptor::{
    DialectDescriptor, MetadataEntry, MetadataField, MetadataStyle, RenderRequirement,
    SectionTitleStyle,
};
use crate::core::{
    AnnotationWraps, ChordPlacementMode, InlineWrap, LineStyle, SectionType, WhitespaceRules, Wrap,
};

const METADATA: &[MetadataEntry] = &[
    MetadataEntry::new(MetadataField::Title, "", "").uppercased(),
    MetadataEntry::new(MetadataField::Artist, "by ", ""),
    MetadataEntry::new(MetadataField::Key, "Key: ", ""),
    MetadataEntry::new(MetadataField::Capo, "Capo: ", ""),
    MetadataEntry::new(MetadataField::Tempo, "Tempo: ", ""),
    MetadataEntry::new(MetadataField::Time, "Time: ", ""),
];

pub static SONGBOOK: DialectDescriptor = DialectDescriptor {
    id: "songbook",
    name: "Songbook",
    extensions: &["txt"],
    line_style: LineStyle {
        default_placement: ChordPlacementMode::Above,
        inline_wrap: InlineWrap::Bare,
        annotations: AnnotationWraps {
            comment: Wrap::new("(", ")"),
            instruction: Wrap::new("(", ")"),
            tempo: Wrap::new("(Tempo: ", ")"),
            dynamics: Wrap::new("(", ")"),
            section: Wrap::new("", ""),
        },
    },
    whitespace: WhitespaceRules::new(3, 0, 2, true),
    metadata: MetadataStyle {
        entries: METADATA,
        custom: None,
    },
    section_titles: SectionTitleStyle::Cased {
        uppercase: &[
            SectionType::Chorus,
            SectionType::PreChorus,
            SectionType::Bridge,
            SectionType::Tag,
        ],
    },
    requirement: RenderRequirement::Chords,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Chordsheet, Section};

    #[test]
    fn test_book_header() {
        let sheet = Chordsheet::new("s")
            .with_title("Amazing Grace")
            .with_artist("John Newton")
            .with_key("G");
        assert_eq!(
            SONGBOOK.metadata.render(&sheet),
            "AMAZING GRACE\nby John Newton\nKey: G\n"
        );
    }

    #[test]
    fn test_title_casing() {
        let titles = &SONGBOOK.section_titles;
        assert_eq!(
            titles.render(&Section::new(SectionType::PreChorus)).as_deref(),
            Some("PRE-CHORUS")
        );
        assert_eq!(
            titles.render(&Section::new(SectionType::Verse).with_title("verse 1")).as_deref(),
            Some("Verse 1")
        );
        assert_eq!(
            titles.render(&Section::new(SectionType::Tag)).as_deref(),
            Some("TAG")
        );
    }
}
