//! Declarative definition discovery from provider directories.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::definition::RawFontDefinition;
use crate::error::{FontError, Result};

/// A module or theme that ships font definitions.
///
/// Local face sources are checked against `root` and rewritten to public
/// URLs under `base_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    name: String,
    root: PathBuf,
    base_url: String,
}

impl Provider {
    pub fn new<P: Into<PathBuf>>(name: impl Into<String>, root: P) -> Self {
        let name = name.into();
        let base_url = format!("/{name}");
        Self {
            name,
            root: root.into(),
            base_url,
        }
    }

    /// Override the public URL prefix (defaults to `/<name>`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn url_prefix(&self) -> &str {
        &self.base_url
    }
}

/// One raw definition together with the provider that supplied it.
#[derive(Debug, Clone)]
pub struct DiscoveredDefinition {
    /// The definition key as written in the source file.
    pub key: String,
    pub provider: Provider,
    pub raw: RawFontDefinition,
}

/// Trait for enumerating raw definitions from some backing store
/// (definition files, host code, test fixtures).
pub trait DefinitionDiscovery {
    fn discover(&self) -> Result<Vec<DiscoveredDefinition>>;
}

/// Filesystem discovery that walks each provider root for `*.fonts.yml`
/// files holding `key -> definition` mappings.
#[derive(Debug, Clone)]
pub struct YamlDiscovery {
    providers: Vec<Provider>,
}

impl YamlDiscovery {
    pub fn new<I>(providers: I) -> Self
    where
        I: IntoIterator<Item = Provider>,
    {
        Self {
            providers: providers.into_iter().collect(),
        }
    }
}

impl DefinitionDiscovery for YamlDiscovery {
    fn discover(&self) -> Result<Vec<DiscoveredDefinition>> {
        let mut found = Vec::new();

        for provider in &self.providers {
            if !provider.root().exists() {
                return Err(FontError::Io {
                    path: provider.root().to_path_buf(),
                    source: io::Error::new(
                        io::ErrorKind::NotFound,
                        "provider root does not exist",
                    ),
                });
            }

            for entry in WalkDir::new(provider.root()).sort_by_file_name() {
                let entry = entry.map_err(|err| {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| provider.root().to_path_buf());
                    FontError::Io {
                        path,
                        source: err
                            .into_io_error()
                            .unwrap_or_else(|| io::Error::other("directory walk failed")),
                    }
                })?;
                if entry.file_type().is_file() && is_definition_file(entry.path()) {
                    debug!("reading font definitions from {}", entry.path().display());
                    found.extend(read_definition_file(provider, entry.path())?);
                }
            }
        }

        Ok(found)
    }
}

fn is_definition_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name,
        None => return false,
    };

    name.ends_with(".fonts.yml") || name.ends_with(".fonts.yaml")
}

fn read_definition_file(provider: &Provider, path: &Path) -> Result<Vec<DiscoveredDefinition>> {
    let text = fs::read_to_string(path).map_err(|source| FontError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mapping: serde_yaml_ng::Mapping =
        serde_yaml_ng::from_str(&text).map_err(|source| FontError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut definitions = Vec::with_capacity(mapping.len());
    for (key, value) in mapping {
        let key = key
            .as_str()
            .ok_or_else(|| {
                FontError::validation(
                    format!("{key:?}"),
                    format!("definition key in {} must be a string", path.display()),
                )
            })?
            .to_string();
        let raw: RawFontDefinition =
            serde_yaml_ng::from_value(value).map_err(|source| FontError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        definitions.push(DiscoveredDefinition {
            key,
            provider: provider.clone(),
            raw,
        });
    }

    Ok(definitions)
}

/// In-memory discovery for hosts that define fonts in code, and for
/// tests. Definitions keep insertion order.
#[derive(Debug, Clone, Default)]
pub struct StaticDiscovery {
    definitions: Vec<DiscoveredDefinition>,
}

impl StaticDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, provider: &Provider, raw: RawFontDefinition) -> Self {
        self.definitions.push(DiscoveredDefinition {
            key: key.into(),
            provider: provider.clone(),
            raw,
        });
        self
    }
}

impl DefinitionDiscovery for StaticDiscovery {
    fn discover(&self) -> Result<Vec<DiscoveredDefinition>> {
        Ok(self.definitions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::is_definition_file;

    #[test]
    fn recognises_definition_files() {
        assert!(is_definition_file("/theme/theme.fonts.yml".as_ref()));
        assert!(is_definition_file("/theme/nested/extra.fonts.yaml".as_ref()));
        assert!(!is_definition_file("/theme/fonts.txt".as_ref()));
        assert!(!is_definition_file("/theme/theme.yml".as_ref()));
    }
}
