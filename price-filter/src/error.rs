//! Error type for the fallible edges of the crate.
//!
//! The slider arithmetic itself is total; only theme loading can fail.

use std::path::PathBuf;

/// Errors produced while loading or parsing slider configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The theme file could not be read.
    #[error("failed to read theme file {}: {source}", path.display())]
    ThemeIo {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The theme document is not valid TOML or does not match the theme shape.
    #[error("invalid theme document: {0}")]
    ThemeParse(#[from] toml::de::Error),
    /// A colour string is not `#rrggbb` or `#rrggbbaa`.
    #[error("invalid colour `{0}`, expected #rrggbb or #rrggbbaa")]
    InvalidColor(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;
