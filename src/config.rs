use serde::Deserialize;
use std::path::PathBuf;

const DEFAULT_BASE_URL: &str = "https://list-data.onrender.com";

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
}

fn config_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("tudu").join("config.toml"))
}

impl Config {
    /// Read `<config_dir>/tudu/config.toml`. A missing or malformed file
    /// falls back to the built-in defaults rather than erroring.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Config::default();
        };

        let Ok(content) = std::fs::read_to_string(&path) else {
            return Config::default();
        };

        match toml::from_str::<Config>(&content) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("ignoring invalid config at {}: {}", path.display(), err);
                Config::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_config() {
        let toml_str = r#"
[api]
base_url = "http://localhost:3000"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3000");
    }

    #[test]
    fn empty_config_uses_default_base_url() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn load_without_file_uses_defaults() {
        // The test environment almost certainly has no config file; either
        // way load() must produce a usable base URL.
        let config = Config::load();
        assert!(!config.api.base_url.is_empty());
    }
}
