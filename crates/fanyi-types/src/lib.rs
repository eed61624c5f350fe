mod types;

pub use types::{DEFAULT_MAX_EXAMPLE, DictionaryOptions, NormalizedRecord};
