//! Core line processor trait for raw text classification
//!
//! A processor recognises one shape of raw line and turns it into a typed
//! [`Line`]. Processors are tried in order by the classifier and the first
//! one that accepts a line produces its result.

use super::types::Line;

/// Core trait for line processors
///
/// # Example
/// ```
/// use chordsheet::core::LineProcessor;
/// use chordsheet::parser::EmptyLineProcessor;
///
/// let processor = EmptyLineProcessor::new();
/// assert!(processor.can_process("   "));
/// assert!(!processor.can_process("Amazing grace"));
/// ```
pub trait LineProcessor: Send + Sync {
    /// Check whether this processor recognises the line
    fn can_process(&self, line: &str) -> bool;

    /// Turn the line into a typed line; `line_number` is 1-based
    fn process(&self, line: &str, line_number: usize) -> Line;

    /// Get the name of this processor
    fn name(&self) -> &'static str;
}
