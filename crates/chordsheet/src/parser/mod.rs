//! Raw text to structured chordsheet
//!
//! Chord token lexing, the ordered line classifier, the document parser that
//! groups lines into sections, and the import entry points.

pub mod chords;
pub mod classifier;
pub mod document;
pub mod import;

pub use chords::*;
pub use classifier::*;
pub use document::*;
pub use import::*;
