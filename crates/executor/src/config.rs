use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

use alt_paths_core::SearchMode;

use super::error::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct QueryConfig {
    pub source: usize,
    pub target: usize,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ModeName {
    Legacy,
    Yen,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub mode: ModeName,
    pub k: usize,
    pub max_candidates: usize,
}

impl SearchConfig {
    pub fn mode(&self) -> SearchMode {
        match self.mode {
            ModeName::Legacy => SearchMode::Legacy,
            ModeName::Yen => SearchMode::Yen {
                k: self.k,
                max_candidates: self.max_candidates,
            },
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ProducerConfig {
    pub batch_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExecutorConfig {
    pub buffer_size: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SimulatorConfig {
    pub total_nodes: usize,
    pub extra_edges: usize,
    pub max_weight: f64,
    pub seed: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportConfig {
    pub coordinates_path: Option<String>,
    pub output_path: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            coordinates_path: None,
            output_path: "routes.csv".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub query: QueryConfig,
    pub search: SearchConfig,
    pub producer: ProducerConfig,
    pub executor: ExecutorConfig,
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Loads configuration from `crates/executor/Config.toml` and environment variables.
pub fn load_config() -> Result<Config, Error> {
    let base_path = env::current_dir().map_err(|e| {
        Error::ConfigLoadError(format!("Failed to determine current directory: {}", e))
    })?;

    let config_file_path: PathBuf = base_path
        .join("crates")
        .join("executor")
        .join("Config.toml");

    load_config_from(&config_file_path)
}

/// Loads configuration from an explicit file, with `EXECUTOR__SECTION__KEY` overrides.
pub fn load_config_from(config_file_path: &Path) -> Result<Config, Error> {
    if !config_file_path.exists() {
        return Err(Error::ConfigLoadError(format!(
            "Configuration file not found at calculated path: {}",
            config_file_path.display()
        )));
    }

    let s = ConfigLoader::builder()
        .add_source(File::from(config_file_path).required(true))
        .add_source(
            Environment::with_prefix("EXECUTOR")
                .prefix_separator("__")
                .try_parsing(true)
                .separator("__"),
        )
        .build()
        .map_err(|e| Error::ConfigLoadError(e.to_string()))?;

    let app_config: Config = s
        .try_deserialize()
        .map_err(|e| Error::ConfigLoadError(format!("Failed to deserialize config: {}", e)))?;

    Ok(app_config)
}
