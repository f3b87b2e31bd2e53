//! Core abstractions for chord sheet processing
//!
//! This module defines the song model, the traits that classifiers and
//! dialect renderers implement, and the shared line renderer.

mod error;
pub mod logging;
mod options;
mod overlay;
mod placement;
mod processor;
mod renderer;
mod types;

pub use error::*;
pub use logging::*;
pub use options::*;
pub use overlay::*;
pub use placement::*;
pub use processor::*;
pub use renderer::*;
pub use types::*;
