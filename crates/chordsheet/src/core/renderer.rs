//! Core renderer trait for dialect output
//!
//! This trait defines the interface every dialect renderer implements.
//! Renderers are stateless and shared between calls through the registry.

use super::error::Result;
use super::options::{RenderingOptions, RenderingResult, WhitespaceRules};
use super::types::Chordsheet;

/// Core trait for chord sheet renderers
///
/// # Example
/// ```
/// use chordsheet::core::{Chordsheet, FormatRenderer, RenderingOptions};
/// use chordsheet::dialects::{DialectRenderer, CHORDPRO};
///
/// let renderer = DialectRenderer::new(&CHORDPRO);
/// let sheet = Chordsheet::new("empty").with_title("Silence");
/// let result = renderer.render(&sheet, &RenderingOptions::default()).unwrap();
/// assert_eq!(result.content, "{title: Silence}\n\n");
/// ```
pub trait FormatRenderer: Send + Sync {
    /// Dialect identifier, e.g. `chordpro`
    fn format(&self) -> &str;

    /// Human-readable dialect name
    fn name(&self) -> &str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Default blank-line policy of the dialect
    fn default_whitespace(&self) -> WhitespaceRules;

    /// Check whether this dialect can represent the chordsheet
    fn can_render(&self, chordsheet: &Chordsheet) -> bool;

    /// Render the chordsheet into dialect text
    fn render(&self, chordsheet: &Chordsheet, options: &RenderingOptions)
        -> Result<RenderingResult>;
}
