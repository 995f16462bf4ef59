//! Configuration types for Kage
//!
//! Every section has a default, so an empty file (or no file) is a valid
//! configuration.

use kage_domain::RoleTag;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::KageError;

/// Top-level configuration (kage.yaml / kage.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KageConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub notifications: NotificationConfig,

    #[serde(default)]
    pub credentials: CredentialConfig,

    /// Initial records for an empty store
    #[serde(default)]
    pub seed: SeedConfig,
}

impl KageConfig {
    /// Load configuration from a YAML or JSON file (by extension)
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> crate::Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `info` or `kage_usecase=debug`
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
        }
    }
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Access policy settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyConfig {
    /// Role tag treated as elevated (e.g. `ROLE_KAGE`)
    #[serde(default = "default_elevated_role")]
    pub elevated_role: String,
}

impl PolicyConfig {
    pub fn elevated_role(&self) -> crate::Result<RoleTag> {
        self.elevated_role
            .parse()
            .map_err(|e: kage_domain::ParseEnumError| KageError::Config(e.to_string()))
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            elevated_role: default_elevated_role(),
        }
    }
}

fn default_elevated_role() -> String {
    RoleTag::Kage.as_str().to_string()
}

/// Outbound notification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_from_name")]
    pub from_name: String,

    #[serde(default = "default_dashboard_url")]
    pub dashboard_url: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from_name: default_from_name(),
            dashboard_url: default_dashboard_url(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_from_name() -> String {
    "Kage Mission Desk".to_string()
}

fn default_dashboard_url() -> String {
    "http://localhost:8080/dashboard".to_string()
}

/// Credential hashing settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialConfig {
    /// Secret mixed into every hash
    #[serde(default)]
    pub pepper: String,
}

/// Records created at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedConfig {
    /// The first entry must carry the elevated role; it bootstraps the rest
    #[serde(default)]
    pub ninjas: Vec<SeedNinja>,

    #[serde(default)]
    pub villages: Vec<SeedVillage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedNinja {
    pub name: String,
    pub email: String,
    pub password: String,

    #[serde(default = "default_rank")]
    pub rank: String,

    #[serde(default)]
    pub elite: bool,

    #[serde(default = "default_roles")]
    pub roles: Vec<String>,

    /// Village name; resolved after villages are created
    #[serde(default)]
    pub village: Option<String>,
}

fn default_rank() -> String {
    "GENIN".to_string()
}

fn default_roles() -> Vec<String> {
    vec![RoleTag::NinjaUser.as_str().to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedVillage {
    pub name: String,
    /// Email of the leading ninja
    pub kage: String,
}
