//! Local deck file item source.

use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;

use vocaquiz_core::deck::{parse_deck_str, Deck};
use vocaquiz_core::error::SourceError;
use vocaquiz_core::model::{PracticeItem, Scope, Tag};
use vocaquiz_core::traits::ItemSource;

/// Item source reading a TOML deck from disk. The file is re-read on every
/// request so edits show up in the next quiz.
pub struct DeckSource {
    path: PathBuf,
}

impl DeckSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> anyhow::Result<Deck> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(format!(
                    "deck file {}",
                    self.path.display()
                ))
                .into());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read deck file: {}", self.path.display()))
            }
        };
        parse_deck_str(&content, &self.path)
    }
}

#[async_trait]
impl ItemSource for DeckSource {
    fn name(&self) -> &str {
        "deck"
    }

    async fn fetch_items(&self, scope: &Scope) -> anyhow::Result<Vec<PracticeItem>> {
        let deck = self.load().await?;
        let items = deck.items_for(scope);
        tracing::debug!(deck = %deck.name, %scope, count = items.len(), "resolved deck scope");
        Ok(items)
    }

    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>> {
        Ok(self.load().await?.tags())
    }
}
