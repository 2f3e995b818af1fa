//! Shared types for the HTTP boundary.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Multipart;

use crate::api::error::ApiError;
use crate::config::ServerConfig;
use crate::pipeline::extraction::{PdfExtractor, PdfTextExtractor};
use crate::pipeline::processor::StudyProcessor;

// ═══════════════════════════════════════════════════════════
// API context
// ═══════════════════════════════════════════════════════════

/// Shared context for all routes. Holds no per-request state.
#[derive(Clone)]
pub struct ApiContext {
    pub processor: StudyProcessor,
    pub config: Arc<ServerConfig>,
}

impl ApiContext {
    pub fn new(extractor: Arc<dyn PdfExtractor>, config: ServerConfig) -> Self {
        Self {
            processor: StudyProcessor::new(extractor),
            config: Arc::new(config),
        }
    }

    /// Context backed by the pdf-extract engine.
    pub fn with_pdf_engine(config: ServerConfig) -> Self {
        Self::new(Arc::new(PdfTextExtractor), config)
    }
}

// ═══════════════════════════════════════════════════════════
// Multipart form fields
// ═══════════════════════════════════════════════════════════

/// All fields of a multipart form, read into memory.
///
/// A file input submitted with an empty file name (nothing chosen in the
/// browser) counts as absent.
#[derive(Debug, Default)]
pub struct FormFields {
    fields: HashMap<String, Vec<u8>>,
}

impl FormFields {
    pub async fn read(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut fields = HashMap::new();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some_and(str::is_empty) {
                continue;
            }
            let bytes = field.bytes().await?;
            fields.insert(name, bytes.to_vec());
        }
        Ok(Self { fields })
    }

    pub fn has(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Names from `required` that were not submitted, in the given order.
    pub fn missing<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required.iter().copied().filter(|n| !self.has(n)).collect()
    }

    pub fn take(&mut self, name: &str) -> Option<Vec<u8>> {
        self.fields.remove(name)
    }

    /// A field as trimmed UTF-8 text; `None` when absent, blank or not UTF-8.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|b| std::str::from_utf8(b).ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
impl FormFields {
    pub(crate) fn from_pairs(pairs: &[(&str, &[u8])]) -> Self {
        Self {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_vec()))
                .collect(),
        }
    }
}
