//! Configuration Management
//!
//! Handles persistent configuration storage for dxsource.

use crate::aws::client::default_endpoint;
use crate::aws::limit::{LimitConfig, DEFAULT_MAX_IN_FLIGHT};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_REGION: &str = "us-east-1";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Account the sources are scoped to
    #[serde(default)]
    pub account_id: Option<String>,
    /// Region the sources are scoped to
    #[serde(default)]
    pub region: Option<String>,
    /// Describe endpoint override
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Concurrent describe calls across all sources
    #[serde(default)]
    pub max_in_flight: Option<usize>,
    /// Steady request rate across all sources
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dxsource").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective account (config > AWS_ACCOUNT_ID)
    pub fn effective_account(&self) -> Option<String> {
        self.account_id
            .clone()
            .or_else(|| env_non_empty("AWS_ACCOUNT_ID"))
    }

    /// Get effective region (config > AWS_REGION > AWS_DEFAULT_REGION > us-east-1)
    pub fn effective_region(&self) -> String {
        self.region
            .clone()
            .or_else(|| env_non_empty("AWS_REGION"))
            .or_else(|| env_non_empty("AWS_DEFAULT_REGION"))
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    /// Get effective endpoint (config > AWS_ENDPOINT_URL_DIRECT_CONNECT > public endpoint)
    pub fn effective_endpoint(&self, region: &str) -> String {
        self.endpoint
            .clone()
            .or_else(|| env_non_empty("AWS_ENDPOINT_URL_DIRECT_CONNECT"))
            .unwrap_or_else(|| default_endpoint(region))
    }

    /// Limiter settings with defaults applied
    pub fn limit_config(&self) -> LimitConfig {
        LimitConfig {
            max_in_flight: self.max_in_flight.unwrap_or(DEFAULT_MAX_IN_FLIGHT),
            requests_per_second: self.requests_per_second,
        }
    }

    /// Set account and region and save
    pub fn set_scope(&mut self, account_id: &str, region: &str) -> Result<()> {
        self.account_id = Some(account_id.to_string());
        self.region = Some(region.to_string());
        self.save()
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
