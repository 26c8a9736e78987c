use crate::chat::DEFAULT_PLACEHOLDER;
use crate::suggestions::SuggestionsStyle;
use crate::tasks::TasksMode;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

pub const APP_NAME: &str = "senseplan";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub reply_delay_ms: u64,
    pub tasks_mode: TasksMode,
    pub suggestions_style: SuggestionsStyle,
    pub assistant_name: String,
    pub input_placeholder: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            reply_delay_ms: 1500,
            tasks_mode: TasksMode::default(),
            suggestions_style: SuggestionsStyle::default(),
            assistant_name: "Sense Plan A".into(),
            input_placeholder: DEFAULT_PLACEHOLDER.into(),
        }
    }
}

impl DashboardConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    pub fn parse(data: &str) -> Result<Self> {
        serde_yaml::from_str(data).context("parsing config file")
    }
}

/// Reads the config at `explicit`, or at the default location. A missing
/// file yields the defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<DashboardConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    if !path.exists() {
        info!(path = %path.display(), "no config file; using defaults");
        return Ok(DashboardConfig::default());
    }
    let data = fs::read_to_string(&path).with_context(|| format!("reading {:?}", path))?;
    let config = DashboardConfig::parse(&data).with_context(|| format!("in {:?}", path))?;
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).context("locating project directories")
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.yml"))
}

pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}
