//! Knowledge loading with built-in fallback

use async_trait::async_trait;
use std::path::PathBuf;
use tourguide_core::{Result, TourGuideError};

use crate::defaults;
use crate::models::KnowledgeBase;

/// Port for fetching the knowledge document
#[async_trait]
pub trait KnowledgeSource: Send + Sync {
    /// Human-readable location of the document, used in logs
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<KnowledgeBase>;
}

/// Knowledge document stored as a JSON file
#[derive(Debug, Clone)]
pub struct FileKnowledgeSource {
    path: PathBuf,
}

impl FileKnowledgeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl KnowledgeSource for FileKnowledgeSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<KnowledgeBase> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        parse_document(&content, &self.describe())
    }
}

/// Parse a knowledge document, rejecting documents with nothing in them
pub fn parse_document(content: &str, source_name: &str) -> Result<KnowledgeBase> {
    let kb: KnowledgeBase =
        serde_json::from_str(content).map_err(|e| TourGuideError::KnowledgeLoad {
            source_name: source_name.to_string(),
            reason: format!("Failed to parse JSON: {}", e),
        })?;

    if kb.is_empty() {
        return Err(TourGuideError::KnowledgeLoad {
            source_name: source_name.to_string(),
            reason: "document has no destinations or phrases".to_string(),
        });
    }

    Ok(kb)
}

/// Fetch knowledge from `source`, substituting the built-in dataset on any failure
pub async fn load_or_default(source: &dyn KnowledgeSource) -> KnowledgeBase {
    match source.fetch().await {
        Ok(kb) => {
            tracing::info!(
                source = %source.describe(),
                destinations = kb.destinations.len(),
                languages = kb.phrases.len(),
                "Offline knowledge loaded"
            );
            kb
        }
        Err(TourGuideError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!(
                source = %source.describe(),
                "No offline knowledge file, using built-in data"
            );
            defaults::builtin()
        }
        Err(e) => {
            tracing::warn!(
                source = %source.describe(),
                error = %e,
                "Failed to load offline knowledge, using built-in data"
            );
            defaults::builtin()
        }
    }
}
