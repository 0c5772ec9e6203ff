use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use troophq_core::authorization::Capability;

use super::types::PrivilegeConfig;

/// Privilege defaults shipped with the binary
const DEFAULT_PRIVILEGES: &str = include_str!("../../../../config/privileges.yaml");

/// Configuration loading and validation for the privilege matrix
pub struct ConfigManager;

impl ConfigManager {
    /// Load the privilege matrix from a YAML file, falling back to the
    /// built-in defaults when no file exists at `path`.
    pub async fn load_config(path: &str) -> Result<PrivilegeConfig> {
        if !Path::new(path).exists() {
            warn!(
                "Privilege config not found at {}, using built-in defaults",
                path
            );
            return Self::default_config();
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .context("Failed to read privilege config")?;

        serde_norway::from_str(&content).context("Failed to parse privilege config")
    }

    /// The built-in default matrix
    pub fn default_config() -> Result<PrivilegeConfig> {
        serde_norway::from_str(DEFAULT_PRIVILEGES)
            .context("Failed to parse built-in privilege defaults")
    }

    /// Check the matrix for completeness: every role must define a scope for
    /// every capability in the catalog, and must not grant capabilities the
    /// catalog does not know. Incomplete configuration aborts startup instead
    /// of silently resolving to no access in production.
    pub fn validate(config: &PrivilegeConfig) -> Result<()> {
        if config.roles.is_empty() {
            anyhow::bail!("Privilege config defines no roles");
        }

        for (role, role_grants) in &config.roles {
            for capability in Capability::all() {
                if !role_grants.grants.contains_key(capability.as_str()) {
                    anyhow::bail!(
                        "Role '{}' is missing a scope for capability '{}'",
                        role,
                        capability.as_str()
                    );
                }
            }

            for code in role_grants.grants.keys() {
                if Capability::from_str(code).is_none() {
                    anyhow::bail!("Role '{}' grants unknown capability '{}'", role, code);
                }
            }
        }

        Ok(())
    }
}
