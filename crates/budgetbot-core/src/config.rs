//! Advisor configuration
//!
//! Selects the model backend and its endpoint. Resolution, later wins:
//! 1. Embedded defaults (compiled into binary)
//! 2. Override file in the data dir (~/.local/share/budgetbot/config/advisor.toml)
//! 3. Environment variables (a `.env` file is loaded into the environment by the binary)
//! 4. CLI flags, applied by the binary via `set_backend` / `set_model`
//!
//! Credentials are never validated here. A missing API key surfaces as an
//! invocation error when the model is called.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/advisor.toml");

/// Which model service answers the analysis request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// Google Generative Language API
    Gemini,
    /// Any server implementing `/v1/chat/completions`
    OpenAICompatible,
    /// Ollama `/api/generate`
    Ollama,
    /// Canned responses, no network
    Mock,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAICompatible => "openai_compatible",
            Self::Ollama => "ollama",
            Self::Mock => "mock",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "openai_compatible" | "openai" | "vllm" | "localai" | "llamacpp" => {
                Ok(Self::OpenAICompatible)
            }
            "ollama" => Ok(Self::Ollama),
            "mock" => Ok(Self::Mock),
            other => Err(Error::Config(format!("unknown backend '{}'", other))),
        }
    }
}

/// Where one backend lives and which model it runs
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub host: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Endpoint {
    fn new(host: &str, model: &str) -> Self {
        Self {
            host: host.to_string(),
            model: model.to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvisorConfig {
    pub backend: BackendKind,
    /// Bound on a single model call
    pub timeout: Duration,
    pub temperature: f32,
    pub gemini: Endpoint,
    pub openai_compatible: Endpoint,
    pub ollama: Endpoint,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Gemini,
            timeout: Duration::from_secs(60),
            temperature: 0.7,
            gemini: Endpoint::new("https://generativelanguage.googleapis.com", "gemini-2.0-flash"),
            openai_compatible: Endpoint::new("http://localhost:8080", "gpt-3.5-turbo"),
            ollama: Endpoint::new("http://localhost:11434", "llama3.2"),
        }
    }
}

impl AdvisorConfig {
    /// Load file layers (override file if present, else embedded) then apply
    /// the process environment.
    pub fn load() -> Result<Self> {
        let mut config = load_config(default_config_path().as_deref())?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from an explicit override path, without touching the environment
    pub fn load_from(path: &Path) -> Result<Self> {
        load_config(Some(path))
    }

    /// Parse config from TOML content
    pub fn parse(content: &str) -> Result<Self> {
        parse_config(content)
    }

    /// Apply environment overrides. `lookup` returns the value of a variable.
    ///
    /// An unknown `AI_BACKEND` or a malformed `BUDGETBOT_TIMEOUT_SECS` is a
    /// configuration error, the same as in the config file.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(backend) = get("AI_BACKEND") {
            self.backend = backend.parse()?;
        }
        if let Some(secs) = get("BUDGETBOT_TIMEOUT_SECS") {
            let secs = secs.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("invalid BUDGETBOT_TIMEOUT_SECS '{}'", secs))
            })?;
            self.timeout = timeout_from_secs(secs)?;
        }

        if let Some(host) = get("GEMINI_HOST") {
            self.gemini.host = host;
        }
        if let Some(model) = get("GEMINI_MODEL") {
            self.gemini.model = model;
        }
        if let Some(key) = get("GOOGLE_API_KEY") {
            self.gemini.api_key = Some(key);
        }

        if let Some(host) = get("OPENAI_COMPATIBLE_HOST") {
            self.openai_compatible.host = host;
        }
        if let Some(model) = get("OPENAI_COMPATIBLE_MODEL") {
            self.openai_compatible.model = model;
        }
        if let Some(key) = get("OPENAI_COMPATIBLE_API_KEY") {
            self.openai_compatible.api_key = Some(key);
        }

        if let Some(host) = get("OLLAMA_HOST") {
            self.ollama.host = host;
        }
        if let Some(model) = get("OLLAMA_MODEL") {
            self.ollama.model = model;
        }

        Ok(())
    }

    pub fn set_backend(&mut self, backend: BackendKind) {
        self.backend = backend;
    }

    /// Override the model of the selected backend. No-op for the mock backend.
    pub fn set_model(&mut self, model: &str) {
        if let Some(endpoint) = self.active_endpoint_mut() {
            endpoint.model = model.to_string();
        }
    }

    /// Endpoint of the selected backend (`None` for the mock backend)
    pub fn active_endpoint(&self) -> Option<&Endpoint> {
        match self.backend {
            BackendKind::Gemini => Some(&self.gemini),
            BackendKind::OpenAICompatible => Some(&self.openai_compatible),
            BackendKind::Ollama => Some(&self.ollama),
            BackendKind::Mock => None,
        }
    }

    fn active_endpoint_mut(&mut self) -> Option<&mut Endpoint> {
        match self.backend {
            BackendKind::Gemini => Some(&mut self.gemini),
            BackendKind::OpenAICompatible => Some(&mut self.openai_compatible),
            BackendKind::Ollama => Some(&mut self.ollama),
            BackendKind::Mock => None,
        }
    }
}

/// Get the default override config path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("budgetbot").join("config").join("advisor.toml"))
}

/// Load configuration (override first, then default)
fn load_config(override_path: Option<&Path>) -> Result<AdvisorConfig> {
    let content = match override_path {
        Some(path) if path.exists() => {
            debug!(path = %path.display(), "Loading config override");
            fs::read_to_string(path)
                .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?
        }
        _ => DEFAULT_CONFIG.to_string(),
    };

    parse_config(&content)
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    defaults: Option<RawDefaults>,
    gemini: Option<RawEndpoint>,
    openai_compatible: Option<RawEndpoint>,
    ollama: Option<RawEndpoint>,
}

#[derive(Debug, Deserialize)]
struct RawDefaults {
    backend: Option<String>,
    timeout_secs: Option<u64>,
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct RawEndpoint {
    host: Option<String>,
    model: Option<String>,
}

impl RawEndpoint {
    fn apply(self, endpoint: &mut Endpoint) {
        if let Some(host) = self.host {
            endpoint.host = host;
        }
        if let Some(model) = self.model {
            endpoint.model = model;
        }
    }
}

/// Model call timeout. Must be at least one second.
fn timeout_from_secs(secs: u64) -> Result<Duration> {
    if secs == 0 {
        return Err(Error::Config("timeout_secs must be greater than 0".into()));
    }
    Ok(Duration::from_secs(secs))
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<AdvisorConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    let mut config = AdvisorConfig::default();

    if let Some(defaults) = raw.defaults {
        if let Some(backend) = defaults.backend {
            config.backend = backend.parse()?;
        }
        if let Some(timeout) = defaults.timeout_secs {
            config.timeout = timeout_from_secs(timeout)?;
        }
        if let Some(temperature) = defaults.temperature {
            config.temperature = temperature;
        }
    }

    if let Some(gemini) = raw.gemini {
        gemini.apply(&mut config.gemini);
    }
    if let Some(openai) = raw.openai_compatible {
        openai.apply(&mut config.openai_compatible);
    }
    if let Some(ollama) = raw.ollama {
        ollama.apply(&mut config.ollama);
    }

    Ok(config)
}
