//! Words API (HTTP) item source.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::instrument;

use vocaquiz_core::error::SourceError;
use vocaquiz_core::model::{PracticeItem, Scope, Tag};
use vocaquiz_core::traits::ItemSource;

pub const DEFAULT_PAGE_SIZE: u32 = 100;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// The API rejects larger pages.
const MAX_PAGE_SIZE: u32 = 100;
const MAX_PAGES: u32 = 1000;

/// Item source backed by the words REST API.
pub struct HttpSource {
    base_url: String,
    access_token: String,
    page_size: u32,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, access_token: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            client: reqwest::Client::new(),
        }
    }

    /// Words requested per page, clamped to what the API accepts.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, SourceError> {
        let mut request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .timeout(Duration::from_secs(self.timeout_secs));
        if !self.access_token.is_empty() {
            request = request.bearer_auth(&self.access_token);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                SourceError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                SourceError::Network(format!("words API not reachable at {}", self.base_url))
            } else {
                SourceError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status == 401 || status == 403 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Unauthorized(error_message(&body, status)));
        }
        if status == 404 {
            return Err(SourceError::NotFound(path.to_string()));
        }
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api {
                status,
                message: error_message(&body, status),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceError::InvalidResponse(format!("failed to parse {path}: {e}")))
    }
}

#[derive(Deserialize)]
struct WordsResponse {
    data: Vec<WordDto>,
    pagination: Pagination,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Pagination {
    current_page: u32,
    total_pages: u32,
    #[serde(default)]
    total: u64,
}

#[derive(Deserialize)]
struct WordDto {
    id: String,
    word: String,
    translation: String,
    #[serde(default)]
    audio_url: Option<String>,
    /// Dictionary payload; only `definitions[].example` is used.
    #[serde(default)]
    examples: Option<serde_json::Value>,
}

impl WordDto {
    fn into_item(self) -> PracticeItem {
        let usage_examples = self
            .examples
            .as_ref()
            .map(usage_examples)
            .unwrap_or_default();
        PracticeItem {
            id: self.id,
            front: self.word,
            back: self.translation,
            audio_ref: self.audio_url.filter(|url| !url.is_empty()),
            usage_examples,
        }
    }
}

/// Pull the example sentences out of a dictionary payload shaped like
/// `{"definitions": [{"definition": "...", "example": "..."}]}`.
fn usage_examples(payload: &serde_json::Value) -> Vec<String> {
    payload
        .get("definitions")
        .and_then(|d| d.as_array())
        .map(|definitions| {
            definitions
                .iter()
                .filter_map(|def| def.get("example").and_then(|e| e.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Deserialize)]
struct TagsResponse {
    data: Vec<TagDto>,
}

#[derive(Deserialize)]
struct TagDto {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

fn error_message(body: &str, status: u16) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {status}")
            } else {
                body.trim().to_string()
            }
        })
}

#[async_trait]
impl ItemSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_items(&self, scope: &Scope) -> anyhow::Result<Vec<PracticeItem>> {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let mut query = vec![
                ("page", page.to_string()),
                ("limit", self.page_size.to_string()),
            ];
            if let Some(tag_id) = scope.tag_id() {
                query.push(("tag", tag_id.to_string()));
            }

            let body: WordsResponse = self.get_json("/api/words", &query).await?;
            tracing::debug!(
                page = body.pagination.current_page,
                total_pages = body.pagination.total_pages,
                total = body.pagination.total,
                count = body.data.len(),
                "fetched words page"
            );
            let exhausted = body.data.is_empty();
            items.extend(body.data.into_iter().map(WordDto::into_item));

            if exhausted || page >= body.pagination.total_pages || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        Ok(items)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>> {
        let body: TagsResponse = self.get_json("/api/tags", &[]).await?;
        Ok(body
            .data
            .into_iter()
            .map(|t| Tag {
                id: t.id,
                name: t.name,
            })
            .collect())
    }
}
