use crate::domain::model::{Scheme, StatusPolicy};
use crate::utils::error::{IngestError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Configuration as written in `config.json` (or a `.toml` file).
///
/// Every field is optional here; [`super::UploadConfig`] decides which ones
/// are required once command line overrides have been applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub scheme: Option<Scheme>,
    pub corpus_dir: Option<PathBuf>,
    pub field_name: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub status_policy: Option<StatusPolicy>,
}

impl FileConfig {
    /// Loads a file, picking TOML for `.toml` and JSON for anything else.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::from_toml_str(&content)
        } else {
            Self::from_json_str(&content)
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        serde_json::from_str(&processed).map_err(|e| IngestError::ConfigParseError {
            format: "JSON".to_string(),
            message: e.to_string(),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| IngestError::ConfigParseError {
            format: "TOML".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var pattern"))
}

/// Replaces `${VAR}` with the value of the environment variable; unknown
/// variables are left untouched.
fn substitute_env_vars(content: &str) -> String {
    env_var_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
}
