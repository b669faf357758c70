//! Error taxonomy for fontstack-core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the registry and definition discovery.
///
/// Every variant except [`FontError::NotFound`] is a load-time fault:
/// it aborts the whole registry load and must be fixed at the source
/// before the cache is rebuilt. Nothing is retried.
#[derive(Debug, Error)]
pub enum FontError {
    /// A definition failed validation. The registry load is aborted;
    /// no partial registry is produced.
    #[error("font definition `{id}`: {reason}")]
    Validation { id: String, reason: String },

    /// A consumer asked for a font id the registry does not know.
    #[error("unknown font id `{0}`")]
    NotFound(String),

    /// A definition file or provider root could not be read.
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A definition file is not valid YAML or does not match the schema.
    #[error("parsing {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

impl FontError {
    pub(crate) fn validation(id: impl Into<String>, reason: impl Into<String>) -> Self {
        FontError::Validation {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = FontError> = std::result::Result<T, E>;
