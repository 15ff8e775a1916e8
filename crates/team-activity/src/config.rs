use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use activity_core::{AliasDirectory, Person, RetryPolicy};
use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Name of the config file looked up in the working directory
const LOCAL_CONFIG_FILE: &str = "team-activity.toml";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Address the chat endpoint listens on
    pub bind: String,
    /// Per-request timeout for outbound calls
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub jira: JiraConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    /// Alias directory, keyed by chat alias
    #[serde(default)]
    pub people: BTreeMap<String, PersonConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitHubConfig {
    pub url: String,
    pub token: Option<String>,
    pub commit_limit: usize,
    pub repository_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JiraConfig {
    pub url: Option<String>,
    pub email: Option<String>,
    pub api_token: Option<String>,
    pub max_results: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub delay_ms: u64,
}

/// One alias directory entry
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonConfig {
    /// GitHub login
    pub github: Option<String>,
    /// Jira account id
    pub jira: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            request_timeout_secs: 10,
            github: GitHubConfig::default(),
            jira: JiraConfig::default(),
            retry: RetryConfig::default(),
            people: BTreeMap::new(),
        }
    }
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            url: "https://api.github.com".to_string(),
            token: None,
            commit_limit: github_backend::client::DEFAULT_COMMIT_LIMIT,
            repository_limit: github_backend::client::DEFAULT_REPOSITORY_LIMIT,
        }
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            url: None,
            email: None,
            api_token: None,
            max_results: jira_backend::client::DEFAULT_MAX_RESULTS,
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_ms: 3000,
        }
    }
}

impl Config {
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let explicit_path = config_path.as_deref();
        if let Some(path) = explicit_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        Self::figment(&config_paths(explicit_path))
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    fn figment(paths: &[PathBuf]) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        for path in paths {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // TEAM_ACTIVITY_JIRA__URL -> jira.url; the unprefixed names are the
        // ones the GitHub and Jira docs suggest exporting
        figment
            .merge(Env::prefixed("TEAM_ACTIVITY_").split("__"))
            .merge(
                Env::raw()
                    .only(&[
                        "GITHUB_BASE_URL",
                        "GITHUB_TOKEN",
                        "JIRA_BASE_URL",
                        "JIRA_EMAIL",
                        "JIRA_API_TOKEN",
                    ])
                    .map(|key| match key.as_str().to_ascii_lowercase().as_str() {
                        "github_base_url" => "github.url".into(),
                        "github_token" => "github.token".into(),
                        "jira_base_url" => "jira.url".into(),
                        "jira_email" => "jira.email".into(),
                        "jira_api_token" => "jira.api_token".into(),
                        _ => key.into(),
                    }),
            )
    }

    /// Check that live backends can be built from this config
    pub fn validate(&self) -> Result<()> {
        if self.jira.url.is_none() {
            return Err(anyhow!(
                "Jira URL not configured. Set via JIRA_BASE_URL env var or [jira] url in the config file"
            ));
        }
        if self.jira.email.is_none() {
            return Err(anyhow!(
                "Jira email not configured. Set via JIRA_EMAIL env var or [jira] email in the config file"
            ));
        }
        if self.jira.api_token.is_none() {
            return Err(anyhow!(
                "Jira API token not configured. Set via JIRA_API_TOKEN env var or [jira] api_token in the config file"
            ));
        }
        if self.people.is_empty() {
            tracing::warn!("alias directory is empty; no message will match a person");
        }
        Ok(())
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_attempts,
            Duration::from_millis(self.retry.delay_ms),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// Build the read-only alias directory
    pub fn directory(&self) -> AliasDirectory {
        AliasDirectory::new(
            self.people
                .iter()
                .map(|(alias, p)| Person::new(alias, p.github.clone(), p.jira.clone())),
        )
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }

    let mut paths = Vec::new();
    if let Some(path) = get_project_config_path() {
        paths.push(path);
    }
    if let Some(path) = get_local_config_path() {
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
    paths
}

fn get_project_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "team-activity").map(|d| d.config_dir().join("config.toml"))
}

fn get_local_config_path() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .map(|dir| dir.join(LOCAL_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_defaults() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            let config: Config = Config::figment(&[]).extract()?;
            assert_eq!(config.bind, "127.0.0.1:8000");
            assert_eq!(config.request_timeout_secs, 10);
            assert_eq!(config.github.url, "https://api.github.com");
            assert_eq!(config.github.commit_limit, 20);
            assert_eq!(config.github.repository_limit, 5);
            assert_eq!(config.jira.max_results, 50);
            assert_eq!(config.retry_policy(), RetryPolicy::new(3, Duration::from_secs(3)));
            assert!(config.validate().is_err());
            Ok(())
        });
    }

    #[test]
    fn test_file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.clear_env();
            jail.create_file(
                "team-activity.toml",
                r#"
                bind = "0.0.0.0:9000"

                [jira]
                url = "https://acme.atlassian.net"
                email = "bot@acme.dev"

                [people.john]
                github = "jdoe"
                jira = "acc-john"

                [people.sarah]
                jira = "acc-sarah"
                "#,
            )?;
            jail.set_env("JIRA_API_TOKEN", "secret");
            jail.set_env("GITHUB_TOKEN", "ghp_test");
            jail.set_env("TEAM_ACTIVITY_RETRY__DELAY_MS", "10");

            let path = jail.directory().join("team-activity.toml");
            let config: Config = Config::figment(&[path]).extract()?;

            assert_eq!(config.bind, "0.0.0.0:9000");
            assert_eq!(config.jira.api_token.as_deref(), Some("secret"));
            assert_eq!(config.github.token.as_deref(), Some("ghp_test"));
            assert_eq!(config.retry.delay_ms, 10);
            assert_eq!(config.retry.max_attempts, 3);
            assert!(config.validate().is_ok());

            let directory = config.directory();
            assert_eq!(directory.len(), 2);
            let john = directory.lookup("John").unwrap();
            assert_eq!(john.github_username.as_deref(), Some("jdoe"));
            assert!(directory.lookup("sarah").unwrap().github_username.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let err = Config::load(Some(PathBuf::from("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }
}
