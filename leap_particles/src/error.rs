use std::io;
use std::path::PathBuf;

/// Failures at the application edges: window, config file, CLI values.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to open window: {0}")]
    Window(#[from] minifb::Error),

    #[error("cannot read config {}: {source}", .path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse config {}: {source}", .path.display())]
    Toml {
        path:   PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown capability tier \"{0}\" (expected small-screen, mobile or desktop)")]
    InvalidTier(String),
}
