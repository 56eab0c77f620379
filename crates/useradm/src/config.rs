use anyhow::{anyhow, Context, Result};
use directories::{BaseDirs, ProjectDirs};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use user_api::ApiConfig;

pub const LOCAL_CONFIG_FILE_NAME: &str = "useradm.toml";

/// Resolved client configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq, Eq)]
pub struct Config {
    /// API base URL; `/users` is appended to it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Overall request timeout. Unset means no client-side timeout.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Default tracing filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl Config {
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = config_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        for path in config_paths(config_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // USERADM_URL, USERADM_TIMEOUT_SECS, USERADM_LOG
        figment = figment.merge(Env::prefixed("USERADM_"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    pub fn merge_with_cli(&mut self, cli_url: Option<String>) {
        if let Some(url) = cli_url {
            self.url = Some(url);
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self.url.as_deref() {
            None | Some("") => Err(anyhow!(
                "API URL not configured. Set via --url, USERADM_URL env var, or config file"
            )),
            Some(url) if !(url.starts_with("http://") || url.starts_with("https://")) => Err(
                anyhow!("API URL must start with http:// or https://, got '{}'", url),
            ),
            Some(_) => Ok(()),
        }
    }

    /// Build the explicit client configuration
    pub fn api_config(&self) -> Result<ApiConfig> {
        self.validate()?;
        let url = self
            .url
            .as_deref()
            .context("API URL not configured")?;

        let mut api = ApiConfig::new(url);
        if let Some(secs) = self.timeout_secs {
            api = api.with_timeout(Duration::from_secs(secs));
        }
        Ok(api)
    }

    /// Write this configuration as TOML
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))
    }
}

/// Config files in merge order; later files override earlier ones
pub fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
        return paths;
    }

    if let Some(path) = get_project_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_xdg_config_path() {
        push_unique(&mut paths, path);
    }
    if let Some(path) = get_local_config_path() {
        push_unique(&mut paths, path);
    }

    paths
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "useradm").map(|d| d.config_dir().join("config.toml"))
}

fn get_xdg_config_path() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME") {
        return Some(PathBuf::from(dir).join("useradm").join("config.toml"));
    }

    BaseDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(".config")
            .join("useradm")
            .join("config.toml")
    })
}

pub fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_fails_validation() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.to_string().contains("API URL not configured"));
    }

    #[test]
    fn non_http_url_fails_validation() {
        let config = Config {
            url: Some("localhost:8080".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn cli_url_overrides_file() {
        let mut config = Config {
            url: Some("http://from-file".to_string()),
            ..Default::default()
        };
        config.merge_with_cli(Some("http://from-cli".to_string()));
        assert_eq!(config.url.as_deref(), Some("http://from-cli"));

        config.merge_with_cli(None);
        assert_eq!(config.url.as_deref(), Some("http://from-cli"));
    }

    #[test]
    fn api_config_carries_timeout() {
        let config = Config {
            url: Some("http://localhost:8080/".to_string()),
            timeout_secs: Some(5),
            log: None,
        };
        let api = config.api_config().unwrap();
        assert_eq!(api.base_url, "http://localhost:8080/");
        assert_eq!(api.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn explicit_file_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "url = \"http://example.test\"\ntimeout_secs = 3\n").unwrap();

        figment::Jail::expect_with(|_jail| {
            let config = Config::load(Some(&path)).unwrap();
            assert_eq!(config.url.as_deref(), Some("http://example.test"));
            assert_eq!(config.timeout_secs, Some(3));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "url = \"http://from-file\"\n").unwrap();

        figment::Jail::expect_with(|jail| {
            jail.set_env("USERADM_URL", "http://from-env");
            let config = Config::load(Some(&path)).unwrap();
            assert_eq!(config.url.as_deref(), Some("http://from-env"));
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = Config::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn save_writes_loadable_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOCAL_CONFIG_FILE_NAME);
        let config = Config {
            url: Some("http://saved".to_string()),
            timeout_secs: None,
            log: None,
        };
        config.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "url = \"http://saved\"");
    }
}
