pub mod dictionary;
pub mod language;
pub mod markup;
pub mod preprocess;
pub mod state;
