//! Renderer registry
//!
//! Maps dialect identifiers to shared renderer instances. The registry is an
//! ordinary value: build one with [`RendererRegistry::with_default_renderers`]
//! and pass it where it is needed.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, span, trace, warn, Level};

use super::descriptor::Dialect;
use super::renderer::DialectRenderer;
use crate::core::{
    Chordsheet, ChordsheetError, FormatRenderer, RenderingOptions, RenderingResult, Result,
};

/// Dialect identifier to renderer mapping
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn FormatRenderer>>,
}

fn normalize(format: &str) -> String {
    format.trim().to_lowercase()
}

impl RendererRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Create a registry holding the five built-in dialects
    pub fn with_default_renderers() -> Self {
        let mut registry = Self::new();
        for dialect in Dialect::ALL {
            registry.register_renderer(dialect.id(), Arc::new(DialectRenderer::for_dialect(dialect)));
        }
        registry
    }

    /// Register a renderer, replacing any existing one with the same id
    pub fn register_renderer(&mut self, format: &str, renderer: Arc<dyn FormatRenderer>) {
        let key = normalize(format);
        trace!(format = %key, renderer = renderer.name(), "Registering renderer");
        if self.renderers.insert(key.clone(), renderer).is_some() {
            debug!(format = %key, "Replaced existing renderer");
        }
    }

    /// Remove a renderer; returns whether one was registered
    pub fn unregister_renderer(&mut self, format: &str) -> bool {
        self.renderers.remove(&normalize(format)).is_some()
    }

    /// Look up a renderer, failing with [`ChordsheetError::UnsupportedFormat`]
    pub fn create_renderer(&self, format: &str) -> Result<Arc<dyn FormatRenderer>> {
        self.get_renderer(format).ok_or_else(|| {
            warn!(format, "No renderer registered");
            ChordsheetError::unsupported_format(format)
        })
    }

    /// Look up a renderer without failing
    pub fn get_renderer(&self, format: &str) -> Option<Arc<dyn FormatRenderer>> {
        self.renderers.get(&normalize(format)).cloned()
    }

    pub fn is_format_supported(&self, format: &str) -> bool {
        self.renderers.contains_key(&normalize(format))
    }

    /// Registered identifiers, sorted
    pub fn supported_formats(&self) -> Vec<String> {
        let mut formats: Vec<String> = self.renderers.keys().cloned().collect();
        formats.sort();
        formats
    }

    /// Look up `format` and render with it
    pub fn render(
        &self,
        format: &str,
        chordsheet: &Chordsheet,
        options: &RenderingOptions,
    ) -> Result<RenderingResult> {
        let registry_span = span!(Level::DEBUG, "registry_render", format);
        let _enter = registry_span.enter();

        self.create_renderer(format)?.render(chordsheet, options)
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_default_renderers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WhitespaceRules;
    use crate::dialects::CHORDPRO;

    #[test]
    fn test_empty_registry() {
        let registry = RendererRegistry::new();
        assert!(registry.supported_formats().is_empty());
        assert!(registry.get_renderer("chordpro").is_none());
    }

    #[test]
    fn test_default_renderers() {
        let registry = RendererRegistry::with_default_renderers();
        assert_eq!(
            registry.supported_formats(),
            vec!["chordpro", "guitar_tabs", "nashville", "onsong", "songbook"]
        );
        assert!(registry.is_format_supported(" ChordPro "));
        assert_eq!(registry.create_renderer("SONGBOOK").unwrap().format(), "songbook");
    }

    #[test]
    fn test_unsupported_format() {
        let registry = RendererRegistry::with_default_renderers();
        let err = match registry.create_renderer("musicxml") {
            Ok(_) => panic!("musicxml should not be supported"),
            Err(err) => err,
        };
        assert_eq!(err.to_string(), "no renderer available for format: musicxml");
    }

    struct Shouty;

    impl FormatRenderer for Shouty {
        fn format(&self) -> &str {
            "shouty"
        }
        fn name(&self) -> &str {
            "Shouty"
        }
        fn version(&self) -> &'static str {
            "0.0.1"
        }
        fn default_whitespace(&self) -> WhitespaceRules {
            WhitespaceRules::default()
        }
        fn can_render(&self, _chordsheet: &Chordsheet) -> bool {
            true
        }
        fn render(&self, chordsheet: &Chordsheet, _options: &RenderingOptions) -> Result<RenderingResult> {
            Ok(RenderingResult {
                content: chordsheet.title.clone().unwrap_or_default().to_uppercase(),
                format: "shouty".to_string(),
                metadata: Default::default(),
            })
        }
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = RendererRegistry::new();
        registry.register_renderer("Shouty", Arc::new(Shouty));
        assert!(registry.is_format_supported("shouty"));

        let sheet = Chordsheet::new("x").with_title("hey");
        let result = registry
            .render("shouty", &sheet, &RenderingOptions::default())
            .unwrap();
        assert_eq!(result.content, "HEY");

        // Overwrite keeps a single entry
        registry.register_renderer("shouty", Arc::new(DialectRenderer::new(&CHORDPRO)));
        assert_eq!(registry.supported_formats().len(), 1);
        assert_eq!(registry.get_renderer("shouty").unwrap().format(), "chordpro");

        assert!(registry.unregister_renderer("SHOUTY"));
        assert!(!registry.unregister_renderer("shouty"));
        assert!(!registry.is_format_supported("shouty"));
    }

    #[test]
    fn test_renderers_are_shared() {
        let registry = RendererRegistry::with_default_renderers();
        let first = registry.create_renderer("onsong").unwrap();
        let second = registry.create_renderer("onsong").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
