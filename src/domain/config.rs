//! Configuration loaded from `.context-forge/config.toml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::AppError;

/// Directory holding tool configuration, relative to the working root.
pub const CONFIG_DIR: &str = ".context-forge";

/// `.context-forge/config.toml`
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_DIR).join("config.toml")
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForgeConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl ForgeConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.paths.validate()?;
        self.engine.validate()?;
        Ok(())
    }
}

/// Locations of the fragment and system prompt documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Fragment (statements) document.
    #[serde(default = "default_statements_path")]
    pub statements: PathBuf,
    /// System prompt document.
    #[serde(default = "default_system_prompts_path")]
    pub system_prompts: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { statements: default_statements_path(), system_prompts: default_system_prompts_path() }
    }
}

impl PathsConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.statements.as_os_str().is_empty() {
            return Err(AppError::config_error("paths.statements must not be empty"));
        }
        if self.system_prompts.as_os_str().is_empty() {
            return Err(AppError::config_error("paths.system_prompts must not be empty"));
        }
        Ok(())
    }
}

fn default_statements_path() -> PathBuf {
    PathBuf::from("project-documents/user/statements/context-statements.md")
}

fn default_system_prompts_path() -> PathBuf {
    PathBuf::from("project-documents/project-guides/prompt.ai-project.system.md")
}

/// Section engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Prefer the section engine over the legacy single template.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Version tag stamped on built templates.
    #[serde(default = "default_template_version")]
    pub template_version: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { enabled: default_true(), template_version: default_template_version() }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.template_version.trim().is_empty() {
            return Err(AppError::config_error("engine.template_version must not be empty"));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_template_version() -> String {
    "1.0.0".to_string()
}

/// Parse and validate configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<ForgeConfig, AppError> {
    let config: ForgeConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
