// crates/idcodec-config/src/config.rs
// ============================================================================
// Module: IdCodec Configuration
// Description: Configuration loading and validation for the id mapping layer.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: idcodec-core, idcodec-json, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! It selects the mapping context of the default data-object mapper and the
//! audit sink installed on the codec. Unknown keys and invalid combinations
//! fail closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use idcodec_core::FileAuditSink;
use idcodec_core::IdCodec;
use idcodec_core::IdCodecAuditSink;
use idcodec_core::NoopAuditSink;
use idcodec_core::StderrAuditSink;
use idcodec_json::DataObjectMapper;
use idcodec_json::MappingContext;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "idcodec.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "IDCODEC_CONFIG";
/// Maximum configuration file size in bytes.
const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Id mapping configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdCodecConfig {
    /// Mapping context of the default data-object mapper.
    #[serde(default)]
    pub mapping: MappingContext,
    /// Codec audit sink selection.
    #[serde(default)]
    pub audit: AuditConfig,
}

impl IdCodecConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// The path is taken from `path`, then from `IDCODEC_CONFIG`, then
    /// defaults to `idcodec.toml` in the working directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::from_toml(content)
    }

    /// Parses and validates configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown keys and
    /// [`ConfigError::Invalid`] when validation fails.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.audit.validate()
    }

    /// Returns the mapping context of the default data-object mapper.
    #[must_use]
    pub const fn mapping_context(&self) -> MappingContext {
        self.mapping
    }

    /// Builds the configured audit sink.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the audit log file cannot be opened.
    pub fn build_audit_sink(&self) -> Result<Arc<dyn IdCodecAuditSink>, ConfigError> {
        self.audit.build_sink()
    }

    /// Installs the configured audit sink on `codec`.
    ///
    /// # Errors
    ///
    /// Same as [`IdCodecConfig::build_audit_sink`].
    pub fn apply_audit(&self, codec: IdCodec) -> Result<IdCodec, ConfigError> {
        Ok(codec.with_audit_sink(self.build_audit_sink()?))
    }

    /// Builds the default data-object mapper over `codec`.
    #[must_use]
    pub fn data_object_mapper(&self, codec: Arc<IdCodec>) -> DataObjectMapper {
        DataObjectMapper::new(codec, self.mapping_context())
    }
}

/// Audit sink kinds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSinkKind {
    /// Discard events.
    #[default]
    None,
    /// JSON lines on stderr.
    Stderr,
    /// JSON lines appended to a file.
    File,
}

/// Codec audit sink selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// Sink kind.
    #[serde(default)]
    pub sink: AuditSinkKind,
    /// Log file path, required for the file sink.
    #[serde(default)]
    pub path: Option<String>,
}

impl AuditConfig {
    /// Validates sink and path settings.
    fn validate(&self) -> Result<(), ConfigError> {
        match (self.sink, self.path.as_deref()) {
            (AuditSinkKind::File, Some(path)) => validate_path_string("audit.path", path),
            (AuditSinkKind::File, None) => {
                Err(ConfigError::Invalid("audit.path is required for the file sink".to_string()))
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, Some(_)) => {
                Err(ConfigError::Invalid("audit.path is only valid for the file sink".to_string()))
            }
            (AuditSinkKind::None | AuditSinkKind::Stderr, None) => Ok(()),
        }
    }

    /// Builds the sink.
    fn build_sink(&self) -> Result<Arc<dyn IdCodecAuditSink>, ConfigError> {
        match self.sink {
            AuditSinkKind::None => Ok(Arc::new(NoopAuditSink)),
            AuditSinkKind::Stderr => Ok(Arc::new(StderrAuditSink)),
            AuditSinkKind::File => {
                let path = self
                    .path
                    .as_deref()
                    .ok_or_else(|| ConfigError::Invalid("audit.path is required for the file sink".to_string()))?;
                let sink = FileAuditSink::new(Path::new(path.trim()))
                    .map_err(|err| ConfigError::Io(err.to_string()))?;
                Ok(Arc::new(sink))
            }
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the argument or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Validates a path string against length constraints.
fn validate_path_string(field: &str, value: &str) -> Result<(), ConfigError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Invalid(format!("{field} must be non-empty")));
    }
    if trimmed.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid(format!("{field} exceeds max length")));
    }
    for component in Path::new(trimmed).components() {
        let component_value = component.as_os_str().to_string_lossy();
        if component_value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid(format!("{field} path component too long")));
        }
    }
    Ok(())
}
