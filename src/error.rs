use std::path::PathBuf;

/// Errors raised while building the gate or reading its inputs.
///
/// A blocked command is not an error: it is a [`Decision`](crate::gate::Decision).
#[derive(Debug, thiserror::Error)]
pub enum GuardError {
    #[error("invalid blocked pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to read config at {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("hook input parse error: {0}")]
    HookInput(#[from] serde_json::Error),

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
}
