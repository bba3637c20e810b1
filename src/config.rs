use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

use crate::error::ConfigError;
use crate::outputs::page::DEFAULT_SECTIONS;
use crate::outputs::speech::{TtsProgram, VoiceParams};
use crate::services::nlu::client::{DEFAULT_NLU_URL, DEFAULT_TIMEOUT_MS};

pub const CONFIG_PATH_ENV: &str = "ECHOASSIST_CONFIG";
pub const NLU_URL_ENV: &str = "ECHOASSIST_NLU_URL";
pub const DEFAULT_CONFIG_PATH: &str = "echoassist.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpeechBackend {
    Say,
    EspeakNg,
    /// Print responses instead of speaking them.
    Console,
}

impl SpeechBackend {
    pub fn program(&self) -> Option<TtsProgram> {
        match self {
            SpeechBackend::Say => Some(TtsProgram::Say),
            SpeechBackend::EspeakNg => Some(TtsProgram::EspeakNg),
            SpeechBackend::Console => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub nlu_url: String,
    pub nlu_timeout_ms: u64,
    pub speech: SpeechBackend,
    pub voice: VoiceParams,
    /// Section anchors present on the page.
    pub sections: Vec<String>,
    pub prefs_path: PathBuf,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            nlu_url: DEFAULT_NLU_URL.to_string(),
            nlu_timeout_ms: DEFAULT_TIMEOUT_MS,
            speech: SpeechBackend::Say,
            voice: VoiceParams::default(),
            sections: DEFAULT_SECTIONS.iter().map(|s| s.to_string()).collect(),
            prefs_path: PathBuf::from("accessibility.json"),
        }
    }
}

impl AssistantConfig {
    pub fn from_toml(raw: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// A missing file is not an error; defaults apply.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw, &path.display().to_string())
    }

    /// File named by `ECHOASSIST_CONFIG` (or `echoassist.toml`), then
    /// `ECHOASSIST_NLU_URL` on top.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let mut config = Self::from_file(Path::new(&path))?;
        config.apply_overrides(std::env::var(NLU_URL_ENV).ok());
        Ok(config)
    }

    pub fn apply_overrides(&mut self, nlu_url: Option<String>) {
        if let Some(url) = nlu_url.filter(|u| !u.trim().is_empty()) {
            self.nlu_url = url;
        }
    }

    pub fn nlu_timeout(&self) -> Duration {
        Duration::from_millis(self.nlu_timeout_ms)
    }
}
