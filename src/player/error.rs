use std::time::Duration;

use thiserror::Error;

/// Why a load attempt failed to produce a playable resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("item has no media URL")]
    MissingUrl,
    #[error("unsupported media URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("media unreachable: {0}")]
    Unreachable(String),
    #[error("decoder rejected the media: {0}")]
    Rejected(String),
    #[error("load timed out after {0:?}")]
    Timeout(Duration),
}
