pub mod init;
pub mod quiz;
pub mod tags;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use vocaquiz_core::model::Scope;
use vocaquiz_core::traits::ItemSource;
use vocaquiz_sources::{create_source, DeckSource, VocaquizConfig};

/// Open the source named on the command line, a deck file, or the
/// configured default.
pub fn open_source(
    config: &VocaquizConfig,
    source: Option<&str>,
    deck: Option<PathBuf>,
) -> Result<Box<dyn ItemSource>> {
    if let Some(path) = deck {
        let deck_source = DeckSource::new(path);
        tracing::debug!(path = %deck_source.path().display(), "opening deck");
        return Ok(Box::new(deck_source));
    }
    let (name, source_config) = config.select_source(source)?;
    tracing::debug!(source = %name, config = ?source_config, "opening source");
    create_source(&name, source_config)
}

/// Turn a `--tag` argument into a scope, matching it against the source's
/// tags by id first and then by name.
///
/// When tags cannot be listed the argument is used as the id.
pub async fn resolve_scope(source: &dyn ItemSource, tag: Option<&str>) -> Scope {
    let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
        return Scope::All;
    };

    match source.list_tags().await {
        Ok(tags) => {
            let found = tags
                .iter()
                .find(|t| t.id == tag)
                .or_else(|| tags.iter().find(|t| t.name.eq_ignore_ascii_case(tag)));
            match found {
                Some(t) => Scope::Tag {
                    id: t.id.clone(),
                    name: Some(t.name.clone()),
                },
                None => Scope::tag(tag),
            }
        }
        Err(e) => {
            tracing::warn!("could not list tags, using '{tag}' as a tag id: {e:#}");
            Scope::tag(tag)
        }
    }
}
