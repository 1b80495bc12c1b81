//! Service configuration.
//!
//! Loaded once at startup and passed by reference to everything that needs
//! it. Sources, in order of precedence (later sources override earlier):
//!
//! 1. Bundled defaults (`repscore.toml` shipped with the crate)
//! 2. A user file: the `--config` path, or `./repscore.toml` if present
//! 3. `REPSCORE__SECTION__KEY` environment variables
//! 4. `OPENAI_API_KEY` / `OPENAI_MODEL`

use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use derive_getters::Getters;
use repscore_core::{NarratorPhrases, SessionDefaults};
use repscore_error::{ConfigError, RepscoreResult};
use repscore_models::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../repscore.toml");

/// HTTP listener and logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ServerSettings {
    /// Interface to bind
    host: String,
    /// Port to bind
    port: u16,
    /// Log filter used when `RUST_LOG` is unset
    log_level: String,
    /// Emit JSON-formatted logs
    json_logs: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl ServerSettings {
    /// Override the bind address.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// `host:port` string for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Engine system prompts.
///
/// Either inline text or a path to a file; a path wins when both are given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct Prompts {
    /// Scoring engine instructions
    scoring: String,
    /// Feedback engine instructions
    feedback: String,
    /// File holding the scoring engine instructions
    scoring_path: Option<PathBuf>,
    /// File holding the feedback engine instructions
    feedback_path: Option<PathBuf>,
}

impl Prompts {
    /// Inline prompts, no files.
    pub fn new(scoring: impl Into<String>, feedback: impl Into<String>) -> Self {
        Self {
            scoring: scoring.into(),
            feedback: feedback.into(),
            scoring_path: None,
            feedback_path: None,
        }
    }

    fn resolve(&mut self) -> RepscoreResult<()> {
        if let Some(path) = &self.scoring_path {
            self.scoring = read_prompt(path)?;
        }
        if let Some(path) = &self.feedback_path {
            self.feedback = read_prompt(path)?;
        }
        Ok(())
    }
}

fn read_prompt(path: &Path) -> RepscoreResult<String> {
    debug!(path = %path.display(), "Reading prompt file");
    std::fs::read_to_string(path).map_err(|e| {
        ConfigError::load_failed(&format!("read prompt file {}", path.display()), e).into()
    })
}

/// Top-level Repscore configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RepscoreConfig {
    /// HTTP listener and logging
    server: ServerSettings,
    /// LLM provider connection
    provider: ProviderConfig,
    /// Engine prompts
    prompts: Prompts,
    /// Defaults for omitted request sections
    defaults: SessionDefaults,
    /// Fixed narrator phrases
    narrator: NarratorPhrases,
}

impl RepscoreConfig {
    /// Assemble a configuration directly, without touching any source.
    pub fn new(
        server: ServerSettings,
        provider: ProviderConfig,
        prompts: Prompts,
        defaults: SessionDefaults,
        narrator: NarratorPhrases,
    ) -> Self {
        Self {
            server,
            provider,
            prompts,
            defaults,
            narrator,
        }
    }

    /// Load configuration from every source.
    ///
    /// `path` names an explicit user file, which must exist. Without it,
    /// `./repscore.toml` is used when present.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a file cannot be read or parsed, or a
    /// prompt file is missing.
    pub fn load(path: Option<&Path>) -> RepscoreResult<Self> {
        let mut builder = Self::bundled();

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("repscore").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix("REPSCORE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let mut config = Self::build(builder)?;
        config.apply_openai_env(
            std::env::var("OPENAI_API_KEY").ok(),
            std::env::var("OPENAI_MODEL").ok(),
        )?;
        config.prompts.resolve()?;
        Ok(config)
    }

    /// Bundled defaults layered with an in-memory TOML document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the document cannot be parsed, or a
    /// prompt file it names is missing.
    pub fn from_toml_str(overrides: &str) -> RepscoreResult<Self> {
        let builder = Self::bundled().add_source(File::from_str(overrides, FileFormat::Toml));
        let mut config = Self::build(builder)?;
        config.prompts.resolve()?;
        Ok(config)
    }

    fn bundled() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> RepscoreResult<Self> {
        builder
            .build()
            .map_err(|e| ConfigError::load_failed("build configuration", e))?
            .try_deserialize()
            .map_err(|e| ConfigError::load_failed("parse configuration", e).into())
    }

    /// Apply the conventional OpenAI environment variables.
    ///
    /// Empty values are ignored.
    pub fn apply_openai_env(
        &mut self,
        api_key: Option<String>,
        model: Option<String>,
    ) -> RepscoreResult<()> {
        let api_key = api_key.filter(|k| !k.is_empty());
        let model = model.filter(|m| !m.is_empty());
        if api_key.is_none() && model.is_none() {
            return Ok(());
        }

        let mut builder = ProviderConfig::builder();
        builder
            .base_url(self.provider.base_url().clone())
            .model(model.unwrap_or_else(|| self.provider.model().clone()))
            .api_key(api_key.or_else(|| self.provider.api_key().clone()));
        self.provider = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid provider configuration: {}", e)))?;
        Ok(())
    }

    /// Override the bind address from the command line.
    pub fn with_bind(mut self, host: Option<String>, port: Option<u16>) -> Self {
        self.server = self.server.with_bind(host, port);
        self
    }

    /// Log anything that will make every request fail.
    pub fn warn_if_incomplete(&self) {
        if !self.provider.has_api_key() {
            warn!("No API key configured; every evaluation will fail until OPENAI_API_KEY is set");
        }
        if self.prompts.scoring.trim().is_empty() {
            warn!("Scoring prompt is empty");
        }
        if self.prompts.feedback.trim().is_empty() {
            warn!("Feedback prompt is empty");
        }
    }
}
