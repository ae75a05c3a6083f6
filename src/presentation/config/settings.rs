use std::num::NonZeroUsize;
use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use crate::application::services::{OptionAlphabet, QuestionBoundary, SegmentationPolicy};
use crate::infrastructure::persistence::PoolConfig;
use crate::infrastructure::text_processing::ExtractionLimits;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    pub ingestion: IngestionSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.{env}.toml` under `APP_`-prefixed environment
    /// variables, e.g. `APP_SERVER__PORT=9000`.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_mb: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_upload_mb: 20,
        }
    }
}

impl ServerSettings {
    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_mb * 1024 * 1024
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseProvider {
    Postgres,
    #[default]
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub provider: DatabaseProvider,
    pub url: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let pool = PoolConfig::default();
        Self {
            provider: DatabaseProvider::default(),
            url: String::new(),
            max_connections: pool.max_connections,
            connect_attempts: pool.connect_attempts,
            acquire_timeout_secs: pool.acquire_timeout.as_secs(),
        }
    }
}

impl DatabaseSettings {
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig {
            max_connections: self.max_connections.max(1),
            connect_attempts: self.connect_attempts.max(1),
            acquire_timeout: Duration::from_secs(self.acquire_timeout_secs.max(1)),
            ..PoolConfig::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderSetting {
    #[default]
    Local,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProviderSetting,
    pub local_path: String,
    pub public_base_url: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProviderSetting::default(),
            local_path: "./data/images".to_string(),
            public_base_url: "/images".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IngestionSettings {
    /// Close a question once it holds this many options; unset means unbounded.
    /// Zero is rejected at load time.
    pub option_capacity: Option<NonZeroUsize>,
    pub question_boundary: QuestionBoundary,
    pub alphabet: OptionAlphabet,
    pub extraction_timeout_secs: u64,
    /// Decompressed size cap for any single `.docx` archive entry.
    pub max_entry_mb: u64,
    /// Decompressed size cap summed over the entries read from one `.docx`.
    pub max_document_mb: u64,
}

impl Default for IngestionSettings {
    fn default() -> Self {
        let policy = SegmentationPolicy::default();
        Self {
            option_capacity: policy.option_capacity,
            question_boundary: policy.boundary,
            alphabet: policy.alphabet,
            extraction_timeout_secs: 30,
            max_entry_mb: 32,
            max_document_mb: 128,
        }
    }
}

impl IngestionSettings {
    pub fn policy(&self) -> SegmentationPolicy {
        SegmentationPolicy {
            alphabet: self.alphabet,
            option_capacity: self.option_capacity,
            boundary: self.question_boundary,
        }
    }

    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs.max(1))
    }

    pub fn limits(&self) -> ExtractionLimits {
        ExtractionLimits::from_megabytes(self.max_entry_mb, self.max_document_mb)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub json_format: bool,
}
