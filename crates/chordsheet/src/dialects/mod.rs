//! Output dialects
//!
//! Each dialect is a static descriptor table rendered by the shared
//! [`DialectRenderer`]. The [`RendererRegistry`] maps identifiers to
//! renderer instances.

pub mod chordpro;
pub mod descriptor;
pub mod guitar_tabs;
pub mod nashville;
pub mod onsong;
pub mod registry;
pub mod renderer;
pub mod songbook;

pub use chordpro::CHORDPRO;
pub use descriptor::*;
pub use guitar_tabs::GUITAR_TABS;
pub use nashville::NASHVILLE;
pub use onsong::ONSONG;
pub use registry::*;
pub use renderer::*;
pub use songbook::SONGBOOK;
