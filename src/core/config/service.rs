use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::paths::AppPaths;
use crate::core::errors::ApiError;

/// Typed application configuration.
///
/// Loaded from `config.yml` merged with `secrets.yml` (secrets win), so the
/// API key can live outside the public config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub faq: FaqConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            llm: LlmConfig::default(),
            faq: FaqConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// OpenAI-compatible API root, e.g. `https://openrouter.ai/api/v1`.
    pub base_url: String,
    pub model: String,
    pub embedding_model: String,
    /// Bearer token. Usually supplied via `secrets.yml` or `OPENROUTER_API_KEY`.
    pub api_key: String,
    pub temperature: f64,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "mistralai/mistral-7b-instruct".to_string(),
            embedding_model: "text-embedding-3-small".to_string(),
            api_key: String::new(),
            temperature: 0.7,
            connect_timeout_secs: 10,
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FaqConfig {
    /// Cosine-similarity cutoff; a match must score strictly above this.
    pub similarity_threshold: f32,
}

impl Default for FaqConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.6,
        }
    }
}

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn config_path(&self) -> PathBuf {
        if let Ok(path) = env::var("DESKBOT_CONFIG_PATH") {
            return PathBuf::from(path);
        }

        let user_config = self.paths.user_data_dir.join("config.yml");
        if user_config.exists() {
            return user_config;
        }

        self.paths.project_root.join("config.yml")
    }

    pub fn secrets_path(&self) -> PathBuf {
        self.paths.secrets_path.clone()
    }

    pub fn load(&self) -> Result<AppConfig, ApiError> {
        let public_config = load_yaml_file(&self.config_path());
        let secrets_config = load_yaml_file(&self.secrets_path());
        let merged = deep_merge(&public_config, &secrets_config);
        serde_json::from_value(merged)
            .map_err(|err| ApiError::BadRequest(format!("invalid configuration: {}", err)))
    }
}

fn load_yaml_file(path: &Path) -> Value {
    if !path.exists() {
        return Value::Object(Map::new());
    }

    match fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<Value>(&contents) {
            Ok(value) => match value {
                Value::Object(_) => value,
                _ => Value::Object(Map::new()),
            },
            Err(_) => Value::Object(Map::new()),
        },
        Err(_) => Value::Object(Map::new()),
    }
}

fn deep_merge(base: &Value, override_value: &Value) -> Value {
    match (base, override_value) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged: Map<String, Value> = base_map.clone();
            for (key, value) in override_map {
                let merged_value = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), merged_value);
            }
            Value::Object(merged)
        }
        _ => override_value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deep_merge_merges_objects_and_overrides_scalars() {
        let base = json!({
            "a": 1,
            "b": { "c": 2, "d": 3 },
            "arr": [1, 2]
        });
        let override_value = json!({
            "b": { "c": 99 },
            "arr": [3],
            "e": "x"
        });

        let merged = deep_merge(&base, &override_value);

        assert_eq!(
            merged,
            json!({
                "a": 1,
                "b": { "c": 99, "d": 3 },
                "arr": [3],
                "e": "x"
            })
        );
    }

    #[test]
    fn empty_config_deserializes_to_defaults() {
        let config: AppConfig =
            serde_json::from_value(json!({})).expect("defaults should apply");

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.llm.temperature, 0.7);
        assert_eq!(config.faq.similarity_threshold, 0.6);
        assert!(config.llm.api_key.is_empty());
    }

    #[test]
    fn secrets_override_public_values() {
        let public_config = json!({
            "llm": { "model": "mistralai/mistral-7b-instruct", "api_key": "" }
        });
        let secrets = json!({
            "llm": { "api_key": "sk-test" }
        });

        let merged = deep_merge(&public_config, &secrets);
        let config: AppConfig = serde_json::from_value(merged).expect("valid config");

        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "mistralai/mistral-7b-instruct");
    }

    #[test]
    fn load_reads_yaml_from_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(
            dir.path().join("config.yml"),
            "server:\n  port: 8080\nfaq:\n  similarity_threshold: 0.5\n",
        )
        .expect("write config");

        let paths = Arc::new(AppPaths::from_root(dir.path()));
        let service = ConfigService::new(paths);
        let config = service.load().expect("config loads");

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.faq.similarity_threshold, 0.5);
    }
}
