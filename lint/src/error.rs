use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown rule `{0}` in configuration")]
    UnknownRule(String),

    #[error("Report serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
