//! Core trait definition for item sources.
//!
//! Implemented by the `vocaquiz-sources` crate for the words API, local deck
//! files and an in-memory mock.

use async_trait::async_trait;

use crate::model::{PracticeItem, Scope, Tag};

// ---------------------------------------------------------------------------
// Item Source trait
// ---------------------------------------------------------------------------

/// Trait for backends that hold the learner's vocabulary.
#[async_trait]
pub trait ItemSource: Send + Sync {
    /// Human-readable source name (e.g. "http").
    fn name(&self) -> &str;

    /// Resolve a scope into the items it covers.
    ///
    /// A scope that matches nothing yields `Ok(vec![])`; errors are reserved
    /// for failures to reach or read the backend.
    async fn fetch_items(&self, scope: &Scope) -> anyhow::Result<Vec<PracticeItem>>;

    /// List the tags the learner can scope a quiz to.
    async fn list_tags(&self) -> anyhow::Result<Vec<Tag>>;
}

