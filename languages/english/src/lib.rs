pub mod deinflector;
pub mod dictionary;
pub mod error;
pub mod normalizer;
pub mod renderers;
pub mod response;

pub use deinflector::WordFormDeinflector;
pub use dictionary::OxfordDictionary;
pub use error::LookupError;
pub use normalizer::normalize;
pub use renderers::{RenderContext, RenderError, Renderer};
