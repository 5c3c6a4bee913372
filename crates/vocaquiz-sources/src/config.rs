//! Source configuration and factory.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vocaquiz_core::model::Direction;
use vocaquiz_core::traits::ItemSource;

use crate::deck::DeckSource;
use crate::http::{HttpSource, DEFAULT_PAGE_SIZE, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding the token of every http source.
pub const ACCESS_TOKEN_ENV: &str = "VOCAQUIZ_ACCESS_TOKEN";

/// Configuration for a single item source.
///
/// Note: Custom Debug impl masks access tokens to keep them out of logs.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SourceConfig {
    Http {
        base_url: String,
        #[serde(default)]
        access_token: String,
        #[serde(default = "default_page_size")]
        page_size: u32,
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },
    Deck {
        path: PathBuf,
    },
}

impl std::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceConfig::Http {
                base_url,
                access_token: _,
                page_size,
                timeout_secs,
            } => f
                .debug_struct("Http")
                .field("base_url", base_url)
                .field("access_token", &"***")
                .field("page_size", page_size)
                .field("timeout_secs", timeout_secs)
                .finish(),
            SourceConfig::Deck { path } => f.debug_struct("Deck").field("path", path).finish(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Top-level vocaquiz configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VocaquizConfig {
    /// Source configurations keyed by name.
    #[serde(default)]
    pub sources: HashMap<String, SourceConfig>,
    /// Source to use when none is given on the command line.
    #[serde(default)]
    pub default_source: Option<String>,
    /// Direction to use when none is given on the command line.
    #[serde(default)]
    pub default_direction: Direction,
}

impl VocaquizConfig {
    /// Pick a source by name, falling back to `default_source` and then to
    /// the only configured source.
    pub fn select_source(&self, name: Option<&str>) -> Result<(String, &SourceConfig)> {
        let name = match name.or(self.default_source.as_deref()) {
            Some(name) => name.to_string(),
            None if self.sources.len() == 1 => self.sources.keys().next().cloned().unwrap_or_default(),
            None => anyhow::bail!(
                "no source selected. Pass --source or --deck, or set default_source. Available: {:?}",
                self.sources.keys().collect::<Vec<_>>()
            ),
        };

        match self.sources.get(&name) {
            Some(config) => Ok((name, config)),
            None => anyhow::bail!(
                "source '{}' not found in config. Available: {:?}",
                name,
                self.sources.keys().collect::<Vec<_>>()
            ),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        let Some(end) = result[start..].find('}') else {
            break;
        };
        let var_name = &result[start + 2..start + end];
        let value = std::env::var(var_name).unwrap_or_default();
        result = format!(
            "{}{}{}",
            &result[..start],
            value,
            &result[start + end + 1..]
        );
        from = start + value.len();
    }
    result
}

/// Resolve env vars in a source config.
fn resolve_source_config(config: &SourceConfig) -> SourceConfig {
    match config {
        SourceConfig::Http {
            base_url,
            access_token,
            page_size,
            timeout_secs,
        } => SourceConfig::Http {
            base_url: resolve_env_vars(base_url),
            access_token: resolve_env_vars(access_token),
            page_size: *page_size,
            timeout_secs: *timeout_secs,
        },
        SourceConfig::Deck { path } => SourceConfig::Deck {
            path: PathBuf::from(resolve_env_vars(&path.to_string_lossy())),
        },
    }
}

/// Load config from an explicit path, or search the default locations:
/// 1. `vocaquiz.toml` in the current directory
/// 2. `~/.config/vocaquiz/config.toml`
///
/// Environment variable override: `VOCAQUIZ_ACCESS_TOKEN`.
pub fn load_config_from(path: Option<&Path>) -> Result<VocaquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vocaquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<VocaquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VocaquizConfig::default(),
    };

    config.sources = config
        .sources
        .iter()
        .map(|(k, v)| (k.clone(), resolve_source_config(v)))
        .collect();

    // Apply env var overrides
    if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
        for source in config.sources.values_mut() {
            if let SourceConfig::Http { access_token, .. } = source {
                *access_token = token.clone();
            }
        }
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vocaquiz"))
}

/// Create a source instance from its configuration.
pub fn create_source(name: &str, config: &SourceConfig) -> Result<Box<dyn ItemSource>> {
    match config {
        SourceConfig::Http {
            base_url,
            access_token,
            page_size,
            timeout_secs,
        } => {
            anyhow::ensure!(
                base_url.starts_with("http://") || base_url.starts_with("https://"),
                "source '{name}': base_url must start with http:// or https://, got '{base_url}'"
            );
            if access_token.is_empty() {
                tracing::warn!("source '{name}' has no access token; requests will be anonymous");
            }
            Ok(Box::new(
                HttpSource::new(base_url, access_token)
                    .with_page_size(*page_size)
                    .with_timeout(*timeout_secs),
            ))
        }
        SourceConfig::Deck { path } => Ok(Box::new(DeckSource::new(path.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_VOCAQUIZ_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_VOCAQUIZ_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_VOCAQUIZ_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no vars"), "no vars");
        std::env::remove_var("_VOCAQUIZ_TEST_VAR");
    }

    #[test]
    fn resolve_env_vars_does_not_expand_values() {
        std::env::set_var("_VOCAQUIZ_SELF_REF", "${_VOCAQUIZ_SELF_REF}");
        std::env::set_var("_VOCAQUIZ_HOST", "words.example.com");
        assert_eq!(
            resolve_env_vars("${_VOCAQUIZ_SELF_REF}/${_VOCAQUIZ_HOST}"),
            "${_VOCAQUIZ_SELF_REF}/words.example.com"
        );
        assert_eq!(resolve_env_vars("${_VOCAQUIZ_UNCLOSED"), "${_VOCAQUIZ_UNCLOSED");
        std::env::remove_var("_VOCAQUIZ_SELF_REF");
        std::env::remove_var("_VOCAQUIZ_HOST");
    }

    #[test]
    fn default_config() {
        let config = VocaquizConfig::default();
        assert!(config.sources.is_empty());
        assert!(config.default_source.is_none());
        assert_eq!(config.default_direction, Direction::SourceToTarget);
    }

    #[test]
    fn parse_source_config() {
        let toml_str = r#"
default_source = "api"
default_direction = "pl_en"

[sources.api]
type = "http"
base_url = "https://words.example.com"
access_token = "secret"

[sources.local]
type = "deck"
path = "decks/example.toml"
"#;
        let config: VocaquizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sources.len(), 2);
        assert_eq!(config.default_direction, Direction::TargetToSource);
        assert!(matches!(
            config.sources.get("api"),
            Some(SourceConfig::Http { page_size: 100, timeout_secs: 30, .. })
        ));

        let (name, _) = config.select_source(None).unwrap();
        assert_eq!(name, "api");
        let (name, source) = config.select_source(Some("local")).unwrap();
        assert_eq!(name, "local");
        assert!(matches!(source, SourceConfig::Deck { .. }));
        assert!(config.select_source(Some("missing")).is_err());
    }

    #[test]
    fn single_source_is_implicit_default() {
        let config: VocaquizConfig = toml::from_str(
            r#"
[sources.only]
type = "deck"
path = "words.toml"
"#,
        )
        .unwrap();
        assert_eq!(config.select_source(None).unwrap().0, "only");
        assert!(VocaquizConfig::default().select_source(None).is_err());
    }

    #[test]
    fn debug_masks_token() {
        let config = SourceConfig::Http {
            base_url: "https://words.example.com".into(),
            access_token: "super-secret".into(),
            page_size: 100,
            timeout_secs: 30,
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vocaquiz.toml");
        std::fs::write(
            &path,
            r#"
[sources.local]
type = "deck"
path = "decks/example.toml"
"#,
        )
        .unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert!(config.sources.contains_key("local"));

        let missing = load_config_from(Some(&dir.path().join("nope.toml")));
        assert!(missing.is_err());
    }

    #[test]
    fn create_rejects_bad_url() {
        let config = SourceConfig::Http {
            base_url: "ftp://words".into(),
            access_token: String::new(),
            page_size: 100,
            timeout_secs: 30,
        };
        assert!(create_source("api", &config).is_err());

        let deck = SourceConfig::Deck {
            path: "words.toml".into(),
        };
        assert_eq!(create_source("local", &deck).unwrap().name(), "deck");
    }
}
