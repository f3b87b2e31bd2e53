//! Fixed-width character row used to lay chords over lyrics
//!
//! Unlike a growable canvas, the row never extends past its initial width:
//! text written near the right edge is clipped.

use std::fmt;

/// A single row of characters, initially blank
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayRow {
    cells: Vec<char>,
}

impl OverlayRow {
    /// Create a blank row `width` characters wide
    pub fn new(width: usize) -> Self {
        Self {
            cells: vec![' '; width],
        }
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }

    /// Write text left-aligned at `x`, clipped at the row end
    ///
    /// Returns the number of characters actually written.
    pub fn draw_text(&mut self, x: usize, text: &str) -> usize {
        let available = self.cells.len().saturating_sub(x);
        let mut written = 0;
        for (offset, c) in text.chars().take(available).enumerate() {
            self.cells[x + offset] = c;
            written += 1;
        }
        written
    }
}

impl fmt::Display for OverlayRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let row: String = self.cells.iter().collect();
        write!(f, "{}", row.trim_end())
    }
}
