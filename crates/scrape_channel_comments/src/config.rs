use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use serde::{Deserialize, Serialize};
use yt_scrape_core::{
    ExportOptions, DEFAULT_API_VERSION, DEFAULT_BASE_URL, DEFAULT_SERVICE_NAME,
};

const APP_DIR: &str = "youtube_channel_scraper";
const CONFIG_NAME: &str = "config.json";
pub const DEFAULT_OUTPUT_PATH: &str = "result.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn default_api_version() -> String {
    DEFAULT_API_VERSION.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_output_path() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub channel_id: String,
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub all_videos: bool,
    #[serde(default)]
    pub search_page_size: Option<u32>,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            api_version: default_api_version(),
            api_key: String::new(),
            channel_id: String::new(),
            output_path: default_output_path(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            all_videos: false,
            search_page_size: None,
        }
    }
}

impl ScrapeConfig {
    /// Reads `custom_path`, or the per-user config file when it exists, or falls back to defaults.
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        let path = match custom_path {
            Some(path) => path.to_path_buf(),
            None => {
                let path = default_config_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                path
            }
        };
        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let mut config: ScrapeConfig = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.apply_defaults();
        Ok(config)
    }

    pub fn apply_defaults(&mut self) {
        if self.service_name.trim().is_empty() {
            self.service_name = default_service_name();
        }
        if self.api_version.trim().is_empty() {
            self.api_version = default_api_version();
        }
        if self.base_url.trim().is_empty() {
            self.base_url = default_base_url();
        }
        if self.output_path.trim().is_empty() {
            self.output_path = default_output_path();
        }
        if self.timeout_secs == 0 {
            self.timeout_secs = DEFAULT_TIMEOUT_SECS;
        }
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_path)
    }

    pub fn to_export_options(&self) -> ExportOptions {
        ExportOptions {
            channel_id: self.channel_id.trim().to_string(),
            output_path: self.output_path(),
            api_key: self.api_key.trim().to_string(),
            service_name: self.service_name.clone(),
            api_version: self.api_version.clone(),
            base_url: self.base_url.clone(),
            timeout_secs: self.timeout_secs,
            all_videos: self.all_videos,
            search_page_size: self.search_page_size,
            progress_callback: None,
        }
    }
}

pub fn default_config_path() -> PathBuf {
    let mut base = config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR);
    base.push(CONFIG_NAME);
    base
}
