//! Mock item source for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use vocaquiz_core::error::SourceError;
use vocaquiz_core::model::{PracticeItem, Scope, Tag};
use vocaquiz_core::traits::ItemSource;

/// An in-memory item source for exercising the session engine without a
/// server or deck file.
pub struct MockSource {
    /// Items with the tag ids they carry.
    items: Vec<(PracticeItem, Vec<String>)>,
    tags: Vec<Tag>,
    /// Message for a simulated network failure.
    failure: Option<String>,
    /// Number of fetches made.
    call_count: AtomicU32,
    /// Scope of the last fetch.
    last_scope: Mutex<Option<Scope>>,
}

impl MockSource {
    /// Create a mock serving `items`, none of them tagged.
    pub fn new(items: Vec<PracticeItem>) -> Self {
        Self {
            items: items.into_iter().map(|item| (item, Vec::new())).collect(),
            tags: Vec::new(),
            failure: None,
            call_count: AtomicU32::new(0),
            last_scope: Mutex::new(None),
        }
    }

    /// Create a mock whose every request fails with a network error.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(Vec::new())
        }
    }

    /// Add an item carrying `tag`, registering the tag if it is new.
    pub fn with_tagged(mut self, item: PracticeItem, tag: Tag) -> Self {
        if !self.tags.iter().any(|t| t.id == tag.id) {
            self.tags.push(tag.clone());
        }
        self.items.push((item, vec![tag.id]));
        self
    }

    /// Get the number of fetches made to this source.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Get the scope of the last fetch.
    pub fn last_scope(&self) -> Option<Scope> {
        self.last_scope
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl ItemSource for MockSource {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_items(&self, scope: &Scope) -> anyhow::Result<Vec<PracticeItem>> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self
            .last_scope
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(scope.clone());

        if let Some(message) = &self.failure {
            return Err(SourceError::Network(message.clone()).into());
        }

        Ok(self
            .items
            .iter()
            .filter(|(_, tags)| match scope {
                Scope::All => true,
                Scope::Tag { id, .. } => tags.contains(id),
            })
            .map(|(item, _)| item.clone())
            .collect())
    }

    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>> {
        if let Some(message) = &self.failure {
            return Err(SourceError::Network(message.clone()).into());
        }
        Ok(self.tags.clone())
    }
}

#[cfg(test)]
mod tests {
    use vocaquiz_core::session::{Phase, QuizSession, StartOutcome};
    use vocaquiz_core::{Direction, Settings};

    use super::*;

    fn animals() -> Tag {
        Tag {
            id: "t-animals".into(),
            name: "animals".into(),
        }
    }

    fn source() -> MockSource {
        MockSource::new(vec![PracticeItem::new("house", "house", "dom")])
            .with_tagged(PracticeItem::new("cat", "cat", "kot"), animals())
            .with_tagged(PracticeItem::new("dog", "dog", "pies"), animals())
    }

    #[tokio::test]
    async fn filters_by_tag() {
        let source = source();

        assert_eq!(source.fetch_items(&Scope::All).await.unwrap().len(), 3);
        let tagged = source.fetch_items(&Scope::tag("t-animals")).await.unwrap();
        assert_eq!(tagged.len(), 2);
        assert_eq!(source.call_count(), 2);
        assert_eq!(source.last_scope(), Some(Scope::tag("t-animals")));
        assert_eq!(source.list_tags().await.unwrap(), vec![animals()]);
    }

    #[tokio::test]
    async fn drives_a_full_session() {
        let source = source();
        let mut session = QuizSession::new();
        let settings = Settings {
            direction: Direction::TargetToSource,
            scope: Scope::Tag {
                id: "t-animals".into(),
                name: Some("animals".into()),
            },
        };

        let outcome = session.start_quiz(settings, &source).await;
        assert_eq!(outcome, StartOutcome::Started { total: 2 });

        session.answer_question(false);
        session.answer_question(true);
        session.answer_question(true);
        assert_eq!(session.phase(), Phase::Complete);
        assert_eq!(session.progress().answered(), 2);
    }

    #[tokio::test]
    async fn failing_source_fails_the_session() {
        let source = MockSource::failing("connection reset");
        let mut session = QuizSession::new();

        let outcome = session.start_quiz(Settings::default(), &source).await;

        assert_eq!(
            outcome,
            StartOutcome::Failed("network error: connection reset".into())
        );
        assert_eq!(session.phase(), Phase::Failed);
        assert!(source.list_tags().await.is_err());
    }
}
