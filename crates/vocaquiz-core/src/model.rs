//! Core data model types for vocaquiz.
//!
//! These are the types the session engine, the item sources and the shell
//! share: practice items, quiz direction, scope and settings.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ItemSetError;

/// One vocabulary entry eligible for quizzing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeItem {
    /// Opaque identifier, unique within one session's item set.
    pub id: String,
    /// Source-language form (the stored word).
    pub front: String,
    /// Target-language form (the stored translation).
    pub back: String,
    /// Pronunciation asset for the source-language form.
    #[serde(default)]
    pub audio_ref: Option<String>,
    /// Sentences illustrating usage.
    #[serde(default)]
    pub usage_examples: Vec<String>,
}

impl PracticeItem {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            audio_ref: None,
            usage_examples: Vec::new(),
        }
    }

    /// The side shown as the question.
    pub fn prompt(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.front,
            Direction::TargetToSource => &self.back,
        }
    }

    /// The side revealed as the answer.
    pub fn answer(&self, direction: Direction) -> &str {
        match direction {
            Direction::SourceToTarget => &self.back,
            Direction::TargetToSource => &self.front,
        }
    }

    /// Audio reference to offer alongside the prompt.
    ///
    /// Audio always pronounces the source-language form, so it is only
    /// offered with the prompt when the prompt is that form.
    pub fn prompt_audio(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::SourceToTarget => self.audio_ref.as_deref(),
            Direction::TargetToSource => None,
        }
    }

    /// Audio reference to offer alongside the revealed answer.
    pub fn answer_audio(&self, direction: Direction) -> Option<&str> {
        match direction {
            Direction::SourceToTarget => None,
            Direction::TargetToSource => self.audio_ref.as_deref(),
        }
    }
}

/// Which side of an item plays the question role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Show the word, recall the translation.
    #[default]
    #[serde(rename = "en_pl", alias = "source_to_target")]
    SourceToTarget,
    /// Show the translation, recall the word.
    #[serde(rename = "pl_en", alias = "target_to_source")]
    TargetToSource,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SourceToTarget => write!(f, "en_pl"),
            Direction::TargetToSource => write!(f, "pl_en"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "en_pl" | "source_to_target" | "forward" => Ok(Direction::SourceToTarget),
            "pl_en" | "target_to_source" | "reverse" => Ok(Direction::TargetToSource),
            other => Err(format!("unknown direction: {other}")),
        }
    }
}

/// Which items a session draws from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Scope {
    /// Every item owned by the current user.
    #[default]
    All,
    /// Only items carrying the given tag.
    Tag {
        id: String,
        /// Display name, when the shell knows it.
        #[serde(default)]
        name: Option<String>,
    },
}

impl Scope {
    pub fn tag(id: impl Into<String>) -> Self {
        Scope::Tag {
            id: id.into(),
            name: None,
        }
    }

    /// The tag id for a tag scope.
    pub fn tag_id(&self) -> Option<&str> {
        match self {
            Scope::All => None,
            Scope::Tag { id, .. } => Some(id),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::All => write!(f, "all words"),
            Scope::Tag {
                name: Some(name), ..
            } => write!(f, "tag {name}"),
            Scope::Tag { id, name: None } => write!(f, "tag {id}"),
        }
    }
}

/// Quiz configuration chosen at setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub direction: Direction,
    pub scope: Scope,
}

/// A label attached to items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub name: String,
}

/// Check a fetched item set against the practice item invariants.
pub fn validate_items(items: &[PracticeItem]) -> Result<(), ItemSetError> {
    let mut seen = HashSet::new();
    for (position, item) in items.iter().enumerate() {
        if item.id.trim().is_empty() {
            return Err(ItemSetError::EmptyId(position));
        }
        if item.front.trim().is_empty() && item.back.trim().is_empty() {
            return Err(ItemSetError::EmptySides(item.id.clone()));
        }
        if !seen.insert(item.id.as_str()) {
            return Err(ItemSetError::DuplicateId(item.id.clone()));
        }
    }
    Ok(())
}
