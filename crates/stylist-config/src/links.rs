//! External cross-link table.
//!
//! Names documented elsewhere (the standard library, a dependency's docs)
//! are listed in a TOML file, either at the top level or under `[links]`:
//!
//! ```toml
//! Promise = "https://developer.mozilla.org/docs/Web/JavaScript/Reference/Global_Objects/Promise"
//!
//! [links]
//! HTMLElement = "https://developer.mozilla.org/docs/Web/API/HTMLElement"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use stylist_tree::{ExternalResolver, ResolveError};

use crate::{ConfigError, require_http_url};

/// Name → URL table loaded from `theme.external_cross_links`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalLinks {
    links: BTreeMap<String, String>,
}

impl ExternalLinks {
    /// Load a link table from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if the file is missing, or a parse or
    /// validation error for malformed content.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a link table from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for invalid TOML and
    /// `ConfigError::Validation` for non-string or non-URL values.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        let mut links = BTreeMap::new();

        for (key, value) in table {
            match value {
                toml::Value::Table(section) if key == "links" => {
                    for (name, url) in section {
                        let url = link_url(&name, url)?;
                        links.insert(name, url);
                    }
                }
                other => {
                    let url = link_url(&key, other)?;
                    links.insert(key, url);
                }
            }
        }

        Ok(Self { links })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.links.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl ExternalResolver for ExternalLinks {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.get(name).map(str::to_owned))
    }
}

fn link_url(name: &str, value: toml::Value) -> Result<String, ConfigError> {
    let field = format!("external link `{name}`");
    let toml::Value::String(url) = value else {
        return Err(ConfigError::Validation(format!("{field} must be a string URL")));
    };
    require_http_url(&url, &field)?;
    Ok(url)
}
