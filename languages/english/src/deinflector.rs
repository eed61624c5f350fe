use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use fanyi_core::language::{DeinflectError, Deinflector};

/// Table driven deinflector: inflected form → dictionary forms.
///
/// Tables are JSON objects such as `{"ran": ["run"], "better": ["good", "well"]}`.
#[derive(Debug, Clone, Default)]
pub struct WordFormDeinflector {
    forms: HashMap<String, Vec<String>>,
}

impl WordFormDeinflector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Embedded table of common irregular forms
    pub fn load_embedded() -> Result<Self, DeinflectError> {
        let json = include_str!("../data/wordforms.json");
        let table = Self::from_json(json)?;
        tracing::info!("Loaded {} embedded word forms", table.len());
        Ok(table)
    }

    /// Embedded table merged with every readable file in `paths`
    pub fn with_additional_tables(paths: &[String]) -> Self {
        let mut table = Self::load_embedded().unwrap_or_else(|e| {
            tracing::error!("Failed to load embedded word forms: {}", e);
            tracing::warn!("Starting with empty word form table");
            Self::new()
        });

        for path in paths {
            match Self::load_from_file(Path::new(path)) {
                Ok(additional) => {
                    tracing::info!("Merging word forms from: {}", path);
                    table = table.merge(additional);
                }
                Err(e) => {
                    tracing::warn!("Failed to load word forms from {}: {}", path, e);
                }
            }
        }

        table
    }

    pub fn load_from_file(path: &Path) -> Result<Self, DeinflectError> {
        tracing::info!("Loading word forms from file: {}", path.display());
        let json = std::fs::read_to_string(path)
            .map_err(|e| DeinflectError::InvalidData(format!("{}: {}", path.display(), e)))?;
        let table = Self::from_json(&json)?;
        tracing::info!("Loaded {} word forms from file", table.len());
        Ok(table)
    }

    pub fn from_json(json: &str) -> Result<Self, DeinflectError> {
        let raw: HashMap<String, Vec<String>> =
            serde_json::from_str(json).map_err(|e| DeinflectError::InvalidData(e.to_string()))?;

        let forms = raw
            .into_iter()
            .map(|(form, bases)| (form.to_lowercase(), bases))
            .collect();

        Ok(Self { forms })
    }

    /// Later tables override earlier ones form by form
    pub fn merge(mut self, other: Self) -> Self {
        self.forms.extend(other.forms);
        self
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Base forms of `word`, without `word` itself or repeats
    pub fn base_forms(&self, word: &str) -> Vec<String> {
        let Some(bases) = self.forms.get(&word.to_lowercase()) else {
            return Vec::new();
        };

        let mut results: Vec<String> = Vec::with_capacity(bases.len());
        for base in bases {
            if base.is_empty() || base.eq_ignore_ascii_case(word) || results.contains(base) {
                continue;
            }
            results.push(base.clone());
        }
        results
    }
}

#[async_trait]
impl Deinflector for WordFormDeinflector {
    async fn deinflect(&self, word: &str) -> Result<Vec<String>, DeinflectError> {
        Ok(self.base_forms(word))
    }
}
