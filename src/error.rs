use thiserror::Error;

/// Failures talking to the NLU endpoint. Every variant sends the
/// dispatcher down the keyword path.
#[derive(Debug, Error)]
pub enum NluError {
    #[error("NLU request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("NLU server error: {0}")]
    Status(reqwest::StatusCode),

    #[error("NLU response was not a valid intent object: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("NLU response was a JSON {0}, expected an object")]
    NotAnObject(&'static str),
}

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("recognizer already started")]
    AlreadyStarted,

    #[error("recognizer not running")]
    NotRunning,

    #[error("recognition failed: {0}")]
    Engine(String),
}

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference store I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("preference store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
