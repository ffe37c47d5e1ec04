//! The `DtwinConfig` struct and its loading, env-override, and validation
//! logic.

use crate::error::{DtwinError, Result};
use crate::persona::Persona;
use crate::task::TaskKind;
use crate::util::env_first;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default OpenAI chat model.
const DEFAULT_MODEL: &str = "gpt-4";
/// Default sampling temperature.
const DEFAULT_TEMPERATURE: f64 = 0.7;
/// Default OpenAI API base URL.
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
/// Default environment variable holding the API key.
const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level configuration, loaded from `dtwin.yaml`.
///
/// Every section is optional; an absent file yields the defaults. Unknown
/// fields are preserved for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DtwinConfig {
    /// The persona that conditions every task.
    pub profile: Persona,

    /// Chat-completion settings.
    pub llm: LlmSettings,

    /// Tool output limits.
    pub tools: ToolSettings,

    /// Agent loop limits.
    pub limits: Limits,

    /// Optional description-template overrides keyed by task-type tag.
    pub prompts: BTreeMap<String, String>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Chat-completion settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Chat model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature, 0.0 to 2.0.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Environment variable the API key is read from.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP timeout for chat requests, in seconds.
    #[serde(default = "default_llm_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: default_model(),
            temperature: default_temperature(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_llm_timeout_seconds(),
            extra: BTreeMap::new(),
        }
    }
}

/// Size and time limits for the local toolset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Maximum entries returned by a directory listing.
    #[serde(default = "default_max_directory_entries")]
    pub max_directory_entries: usize,

    /// Maximum bytes returned from a file read.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,

    /// Maximum results returned by a web search.
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    /// Maximum bytes of page text from a website fetch.
    #[serde(default = "default_max_page_bytes")]
    pub max_page_bytes: usize,

    /// HTTP timeout for tool fetches, in seconds.
    #[serde(default = "default_tool_timeout_seconds")]
    pub http_timeout_seconds: u64,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            max_directory_entries: default_max_directory_entries(),
            max_file_bytes: default_max_file_bytes(),
            max_search_results: default_max_search_results(),
            max_page_bytes: default_max_page_bytes(),
            http_timeout_seconds: default_tool_timeout_seconds(),
            extra: BTreeMap::new(),
        }
    }
}

/// Agent loop limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Limits {
    /// Maximum tool-call round-trips before a final forced answer.
    #[serde(default = "default_max_tool_loops")]
    pub max_tool_loops: usize,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tool_loops: default_max_tool_loops(),
            extra: BTreeMap::new(),
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

fn default_llm_timeout_seconds() -> u64 {
    120
}

fn default_max_directory_entries() -> usize {
    200
}

fn default_max_file_bytes() -> usize {
    65536
}

fn default_max_search_results() -> usize {
    8
}

fn default_max_page_bytes() -> usize {
    20000
}

fn default_tool_timeout_seconds() -> u64 {
    30
}

fn default_max_tool_loops() -> usize {
    6
}

impl DtwinConfig {
    /// Load the effective configuration.
    ///
    /// Resolution order for the file: the `DTWIN_CONFIG` environment
    /// variable, then `./dtwin.yaml`, then `dtwin.yaml` in the user config
    /// directory. No file at all yields the defaults. Environment
    /// overrides are applied and the result validated either way.
    pub fn load() -> Result<Self> {
        let mut config = match Self::resolve_config_path()? {
            Some(path) => Self::load_from(&path)?.ok_or_else(|| {
                DtwinError::UserError(format!(
                    "config file '{}' not found.\n\
                     Fix: create the file or unset DTWIN_CONFIG.",
                    path.display()
                ))
            })?,
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a YAML file.
    ///
    /// Returns `Ok(None)` if the file does not exist.
    /// Returns `Err` if the file exists but cannot be read or parsed.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            DtwinError::UserError(format!(
                "failed to read config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(Some(Self::from_yaml(&content)?))
    }

    /// Parse config from a YAML string. Defaults fill absent fields; the
    /// result is not yet validated (env overrides may still apply).
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml)
            .map_err(|e| DtwinError::UserError(format!("failed to parse dtwin.yaml: {}", e)))
    }

    /// Serialize config to a YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DtwinError::UserError(format!("failed to serialize config: {}", e)))
    }

    /// Where the config file lives, if anywhere.
    ///
    /// `DTWIN_CONFIG` always wins when set, even if the file is missing,
    /// so a typo surfaces as an error instead of silent defaults.
    fn resolve_config_path() -> Result<Option<PathBuf>> {
        if let Some(path) = env_first(&["DTWIN_CONFIG"]) {
            return Ok(Some(PathBuf::from(path)));
        }

        let local = PathBuf::from("dtwin.yaml");
        if local.exists() {
            return Ok(Some(local));
        }

        if let Some(dirs) = directories::ProjectDirs::from("", "", "dtwin") {
            let user = dirs.config_dir().join("dtwin.yaml");
            if user.exists() {
                return Ok(Some(user));
            }
        }

        Ok(None)
    }

    /// Apply environment overrides on top of the file values.
    pub fn apply_env_overrides(&mut self) {
        if let Some(model) = env_first(&["DTWIN_MODEL", "OPENAI_MODEL"]) {
            self.llm.model = model;
        }
        if let Some(base_url) = env_first(&["OPENAI_BASE_URL", "OPENAI_API_BASE"]) {
            self.llm.base_url = base_url.trim_end_matches('/').to_string();
        }
    }

    /// Read the API key from the configured environment variable.
    ///
    /// Deferred to execution time so dry runs and offline commands never
    /// need a key.
    pub fn api_key(&self) -> Result<String> {
        env_first(&[&self.llm.api_key_env]).ok_or_else(|| {
            DtwinError::UserError(format!(
                "no API key found in the {} environment variable.\n\
                 Fix: export {}=<your key>, or put it in a .env file next to \
                 where you run dtwin.",
                self.llm.api_key_env, self.llm.api_key_env
            ))
        })
    }

    /// Validate the configuration.
    ///
    /// Validation rules:
    /// - Model must not be empty
    /// - Temperature must be within 0.0 to 2.0
    /// - Timeouts and loop/size limits must be positive
    /// - Prompt override keys must name known task types
    pub fn validate(&self) -> Result<()> {
        if self.llm.model.trim().is_empty() {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: llm.model must not be empty.\n\
                 Fix: set llm.model (e.g. gpt-4) or remove the field to use the default."
                    .to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(DtwinError::UserError(format!(
                "dtwin.yaml validation failed: llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.base_url.trim().is_empty() {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: llm.base_url must not be empty".to_string(),
            ));
        }

        if self.llm.api_key_env.trim().is_empty() {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: llm.api_key_env must not be empty".to_string(),
            ));
        }

        if self.llm.timeout_seconds == 0 {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: llm.timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if self.tools.http_timeout_seconds == 0 {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: tools.http_timeout_seconds must be greater than 0"
                    .to_string(),
            ));
        }

        if self.tools.max_directory_entries == 0
            || self.tools.max_file_bytes == 0
            || self.tools.max_search_results == 0
            || self.tools.max_page_bytes == 0
        {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: tools limits must all be greater than 0"
                    .to_string(),
            ));
        }

        if self.limits.max_tool_loops == 0 {
            return Err(DtwinError::UserError(
                "dtwin.yaml validation failed: limits.max_tool_loops must be greater than 0"
                    .to_string(),
            ));
        }

        for (tag, template) in &self.prompts {
            // Overrides are looked up by canonical tag, so the key must be
            // the canonical spelling, not just a parseable one.
            match tag.parse::<TaskKind>() {
                Ok(kind) if kind.as_str() == tag => {}
                Ok(kind) => {
                    return Err(DtwinError::UserError(format!(
                        "dtwin.yaml validation failed: prompts key '{}' must use the \
                         canonical tag '{}'",
                        tag,
                        kind.as_str()
                    )));
                }
                Err(_) => {
                    return Err(DtwinError::UserError(format!(
                        "dtwin.yaml validation failed: prompts contains unknown task type '{}'.\n\
                         Known types: introduce, pitch, cold_email, search_acquisitions",
                        tag
                    )));
                }
            }
            if template.trim().is_empty() {
                return Err(DtwinError::UserError(format!(
                    "dtwin.yaml validation failed: prompts.{} is empty",
                    tag
                )));
            }
        }

        Ok(())
    }
}
