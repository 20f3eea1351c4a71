use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::cli::parser::Args;
use crate::github::client::DEFAULT_API_URL;
use crate::github::fetch::IssueQuery;
use crate::github::issues::IssueState;

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    User,
    Repo,
    State,
    Labels,
    OutputPath,
    ApiUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::User => "user",
            ConfigKey::Repo => "repo",
            ConfigKey::State => "state",
            ConfigKey::Labels => "labels",
            ConfigKey::OutputPath => "output_path",
            ConfigKey::ApiUrl => "api_url",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::User,
            ConfigKey::Repo,
            ConfigKey::State,
            ConfigKey::Labels,
            ConfigKey::OutputPath,
            ConfigKey::ApiUrl,
        ]
    }
}

/// Filename for the project-specific configuration within the .doxy_issues directory.
pub const PROJECT_CONFIG_FILENAME: &str = "config.json";
/// Directory name for project-specific configuration.
pub const PROJECT_CONFIG_DIR: &str = ".doxy_issues";

pub const DEFAULT_USER: &str = "BenBoZ";
pub const DEFAULT_REPO: &str = "DoxyIssues";
pub const DEFAULT_OUTPUT_PATH: &str = "output.dox";

/// Resolved settings for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub user: String,
    pub repo: String,
    pub state: IssueState,
    pub labels: String,
    pub output_path: PathBuf,
    pub api_url: String,
    pub token: Option<String>,
}

impl Config {
    /// Merges defaults, the config file and the command line, in that order
    /// of precedence from lowest to highest.
    ///
    /// A missing file at the default location is not an error; a missing file
    /// passed with `--config` is.
    pub fn resolve(args: &Args) -> Result<Config> {
        let file_config = match &args.config {
            Some(path) => load_config_file(path)?,
            None => {
                let path = default_config_path();
                if path.exists() {
                    load_config_file(&path)?
                } else {
                    HashMap::new()
                }
            }
        };

        let merged = update_config(&file_config, &args_to_config(args));
        Config::from_map(&merged, args.token.clone())
    }

    /// Builds a config from parsed values, filling in defaults.
    ///
    /// Every value must be a JSON string and `state` must name a valid state.
    pub fn from_map(values: &HashMap<ConfigKey, Value>, token: Option<String>) -> Result<Config> {
        Ok(Config {
            user: string_value(values, ConfigKey::User, DEFAULT_USER)?,
            repo: string_value(values, ConfigKey::Repo, DEFAULT_REPO)?,
            state: string_value(values, ConfigKey::State, IssueState::default().as_str())?
                .parse()?,
            labels: string_value(values, ConfigKey::Labels, "")?,
            output_path: PathBuf::from(string_value(
                values,
                ConfigKey::OutputPath,
                DEFAULT_OUTPUT_PATH,
            )?),
            api_url: string_value(values, ConfigKey::ApiUrl, DEFAULT_API_URL)?,
            token,
        })
    }

    pub fn issue_query(&self) -> IssueQuery {
        IssueQuery {
            owner: self.user.clone(),
            repo: self.repo.clone(),
            state: self.state,
            labels: self.labels.clone(),
        }
    }
}

pub fn default_config_path() -> PathBuf {
    Path::new(PROJECT_CONFIG_DIR).join(PROJECT_CONFIG_FILENAME)
}

pub fn load_config_file(path: &Path) -> Result<HashMap<ConfigKey, Value>> {
    let content = std::fs::read(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns the recognized keys of a JSON object; unknown keys are skipped.
/// - Returns an empty HashMap if the input `content` is empty or contains only whitespace.
/// - Returns an `Err` if the JSON parsing fails or the top level is not an object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    if let Value::Object(map) = &value {
        let config_map = ConfigKey::all()
            .iter()
            .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
            .collect();
        return Ok(config_map);
    }

    Err(anyhow::anyhow!("Config must be a JSON object"))
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// - Keys from `updates` are added to a clone of `base_config`.
/// - If a key exists in both, the value from `updates` overwrites the value in
///   the cloned `base_config`.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// The options that were given on the command line, as config values.
fn args_to_config(args: &Args) -> HashMap<ConfigKey, Value> {
    [
        (ConfigKey::User, args.user.clone()),
        (ConfigKey::Repo, args.repo.clone()),
        (ConfigKey::State, args.state.map(|state| state.to_string())),
        (ConfigKey::Labels, args.labels.clone()),
        (
            ConfigKey::OutputPath,
            args.output_path
                .as_ref()
                .map(|path| path.to_string_lossy().into_owned()),
        ),
        (ConfigKey::ApiUrl, args.api_url.clone()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|value| (key, Value::String(value))))
    .collect()
}

fn string_value(
    values: &HashMap<ConfigKey, Value>,
    key: ConfigKey,
    default: &str,
) -> Result<String> {
    match values.get(&key) {
        None => Ok(default.to_string()),
        Some(Value::String(value)) => Ok(value.clone()),
        Some(other) => Err(anyhow::anyhow!(
            "Config value '{}' must be a string, got {other}",
            key.as_str()
        )),
    }
}
