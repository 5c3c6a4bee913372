//! TOML deck parser.
//!
//! Loads offline word lists from TOML files and validates them.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use uuid::Uuid;

use crate::model::{PracticeItem, Scope, Tag};

/// Intermediate TOML structure for parsing deck files.
#[derive(Debug, Deserialize)]
struct TomlDeckFile {
    deck: TomlDeckHeader,
    #[serde(default)]
    words: Vec<TomlWord>,
}

#[derive(Debug, Deserialize)]
struct TomlDeckHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlWord {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    word: String,
    #[serde(default)]
    translation: String,
    #[serde(default)]
    audio_url: Option<String>,
    #[serde(default)]
    examples: Vec<String>,
    #[serde(default)]
    tags: Vec<String>,
}

/// A word list loaded from disk.
#[derive(Debug, Clone)]
pub struct Deck {
    pub name: String,
    pub description: String,
    pub entries: Vec<DeckEntry>,
}

/// One word of a deck together with its tag names.
#[derive(Debug, Clone)]
pub struct DeckEntry {
    pub item: PracticeItem,
    pub tags: Vec<String>,
    /// Whether the id was written in the file rather than generated.
    pub explicit_id: bool,
}

impl Deck {
    /// Items covered by `scope`. Tag scopes match on tag name.
    pub fn items_for(&self, scope: &Scope) -> Vec<PracticeItem> {
        self.entries
            .iter()
            .filter(|entry| match scope {
                Scope::All => true,
                Scope::Tag { id, .. } => entry.tags.iter().any(|t| t == id),
            })
            .map(|entry| entry.item.clone())
            .collect()
    }

    /// Distinct tags used in the deck, sorted by name. A deck tag's id is its
    /// name.
    pub fn tags(&self) -> Vec<Tag> {
        self.entries
            .iter()
            .flat_map(|entry| entry.tags.iter())
            .filter(|t| !t.trim().is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|name| Tag {
                id: name.clone(),
                name: name.clone(),
            })
            .collect()
    }
}

/// Parse a single TOML file into a `Deck`.
pub fn parse_deck(path: &Path) -> Result<Deck> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read deck file: {}", path.display()))?;

    parse_deck_str(&content, path)
}

/// Parse a TOML string into a `Deck`.
pub fn parse_deck_str(content: &str, source_path: &Path) -> Result<Deck> {
    let parsed: TomlDeckFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let entries = parsed
        .words
        .into_iter()
        .map(|w| {
            let explicit_id = w.id.is_some();
            let id = w.id.unwrap_or_else(|| Uuid::new_v4().to_string());
            DeckEntry {
                item: PracticeItem {
                    id,
                    front: w.word,
                    back: w.translation,
                    audio_ref: w.audio_url,
                    usage_examples: w.examples,
                },
                tags: w.tags,
                explicit_id,
            }
        })
        .collect();

    Ok(Deck {
        name: parsed.deck.name,
        description: parsed.deck.description,
        entries,
    })
}

/// A warning from deck validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The word id (if applicable).
    pub word_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a deck for common issues.
pub fn validate_deck(deck: &Deck) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if deck.entries.is_empty() {
        warnings.push(ValidationWarning {
            word_id: None,
            message: "deck has no words".into(),
        });
    }

    let mut seen_ids = HashSet::new();
    for entry in &deck.entries {
        let item = &entry.item;
        if !seen_ids.insert(&item.id) {
            warnings.push(ValidationWarning {
                word_id: Some(item.id.clone()),
                message: format!("duplicate word ID: {}", item.id),
            });
        }
        if entry.explicit_id && item.id.trim().is_empty() {
            warnings.push(ValidationWarning {
                word_id: None,
                message: "word has a blank id".into(),
            });
        }

        match (item.front.trim().is_empty(), item.back.trim().is_empty()) {
            (true, true) => warnings.push(ValidationWarning {
                word_id: Some(item.id.clone()),
                message: "word and translation are both empty".into(),
            }),
            (true, false) => warnings.push(ValidationWarning {
                word_id: Some(item.id.clone()),
                message: "word is empty".into(),
            }),
            (false, true) => warnings.push(ValidationWarning {
                word_id: Some(item.id.clone()),
                message: "translation is empty".into(),
            }),
            (false, false) => {}
        }

        if entry.tags.iter().any(|t| t.trim().is_empty()) {
            warnings.push(ValidationWarning {
                word_id: Some(item.id.clone()),
                message: "blank tag name".into(),
            });
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[deck]
name = "Animals"
description = "Basic animal names"

[[words]]
id = "cat"
word = "cat"
translation = "kot"
audio_url = "https://audio.example/cat.mp3"
examples = ["The cat sleeps on the sofa."]
tags = ["animals", "pets"]

[[words]]
id = "dog"
word = "dog"
translation = "pies"
tags = ["animals"]

[[words]]
word = "cow"
translation = "krowa"
"#;

    fn deck() -> Deck {
        parse_deck_str(VALID_TOML, &PathBuf::from("animals.toml")).unwrap()
    }

    #[test]
    fn parse_valid_toml() {
        let deck = deck();
        assert_eq!(deck.name, "Animals");
        assert_eq!(deck.entries.len(), 3);

        let cat = &deck.entries[0].item;
        assert_eq!(cat.front, "cat");
        assert_eq!(cat.back, "kot");
        assert_eq!(cat.audio_ref.as_deref(), Some("https://audio.example/cat.mp3"));
        assert_eq!(cat.usage_examples, vec!["The cat sleeps on the sofa."]);
    }

    #[test]
    fn missing_ids_are_generated() {
        let deck = deck();
        let cow = &deck.entries[2];
        assert!(!cow.explicit_id);
        assert!(Uuid::parse_str(&cow.item.id).is_ok());
        assert!(validate_deck(&deck).is_empty());
    }

    #[test]
    fn items_for_scope() {
        let deck = deck();
        assert_eq!(deck.items_for(&Scope::All).len(), 3);

        let pets: Vec<String> = deck
            .items_for(&Scope::tag("pets"))
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(pets, vec!["cat"]);

        assert!(deck.items_for(&Scope::tag("verbs")).is_empty());
    }

    #[test]
    fn tags_are_distinct_and_sorted() {
        let names: Vec<String> = deck().tags().into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["animals", "pets"]);
    }

    #[test]
    fn validate_duplicate_ids_and_empty_sides() {
        let toml = r#"
[deck]
name = "Broken"

[[words]]
id = "same"
word = "one"
translation = "jeden"

[[words]]
id = "same"
word = ""
translation = ""
tags = [" "]
"#;
        let deck = parse_deck_str(toml, &PathBuf::from("broken.toml")).unwrap();
        let warnings = validate_deck(&deck);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate")));
        assert!(warnings.iter().any(|w| w.message.contains("both empty")));
        assert!(warnings.iter().any(|w| w.message.contains("blank tag")));
    }

    #[test]
    fn validate_empty_deck() {
        let deck = parse_deck_str("[deck]\nname = \"Empty\"\n", &PathBuf::from("e.toml")).unwrap();
        let warnings = validate_deck(&deck);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].word_id.is_none());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_deck_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("animals.toml");
        std::fs::write(&path, VALID_TOML).unwrap();

        let deck = parse_deck(&path).unwrap();
        assert_eq!(deck.entries.len(), 3);

        let missing = parse_deck(&dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("failed to read deck file"));
    }
}
