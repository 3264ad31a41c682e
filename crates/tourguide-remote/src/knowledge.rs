use async_trait::async_trait;
use tourguide_core::{Result, TourGuideError};
use tourguide_knowledge::loader::parse_document;
use tourguide_knowledge::{KnowledgeBase, KnowledgeSource};

/// Knowledge document served over HTTP
pub struct HttpKnowledgeSource {
    url: String,
    client: reqwest::Client,
}

impl HttpKnowledgeSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl KnowledgeSource for HttpKnowledgeSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<KnowledgeBase> {
        let load_error = |reason: String| TourGuideError::KnowledgeLoad {
            source_name: self.url.clone(),
            reason,
        };

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| load_error(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(load_error(format!("status {}", response.status())));
        }

        let content = response
            .text()
            .await
            .map_err(|e| load_error(format!("failed to read body: {}", e)))?;

        parse_document(&content, &self.url)
    }
}
