use anyhow::Result;
use std::collections::HashMap;
use tracing::info;

use troophq_core::authorization::{Capability, CapabilityInfo, Scope};

use super::config::ConfigManager;
use super::types::PrivilegeConfig;

/// Answers "what scope of data does role R get for capability C?".
///
/// The matrix is immutable once constructed and is shared behind an `Arc`;
/// reads take no locks. Resolution is total: an unknown role or capability
/// resolves to `Scope::None`, never to an error and never to broader access.
/// Enforcement — filtering query results down to the granted scope — is the
/// data-access layer's job, parameterized by the answers given here.
pub struct PrivilegeService {
    matrix: HashMap<String, HashMap<Capability, Scope>>,
    descriptions: HashMap<String, String>,
}

impl PrivilegeService {
    /// Load, validate and index the privilege matrix. Fails fast on an
    /// incomplete or unknown entry.
    pub async fn new(config_path: &str) -> Result<Self> {
        let config = ConfigManager::load_config(config_path).await?;
        Self::from_config(config)
    }

    pub fn from_config(config: PrivilegeConfig) -> Result<Self> {
        ConfigManager::validate(&config)?;

        let mut matrix = HashMap::new();
        let mut descriptions = HashMap::new();
        for (role, role_grants) in config.roles {
            let grants: HashMap<Capability, Scope> = role_grants
                .grants
                .iter()
                .filter_map(|(code, scope)| {
                    Capability::from_str(code).map(|capability| (capability, *scope))
                })
                .collect();
            matrix.insert(role.clone(), grants);
            descriptions.insert(role, role_grants.description);
        }

        info!(
            "Privilege matrix loaded with {} roles over {} capabilities",
            matrix.len(),
            Capability::all().len()
        );

        Ok(Self {
            matrix,
            descriptions,
        })
    }

    /// Scope granted to a role for a capability; unknown roles resolve to None
    pub fn scope_for(&self, role: &str, capability: Capability) -> Scope {
        self.matrix
            .get(role)
            .and_then(|grants| grants.get(&capability))
            .copied()
            .unwrap_or(Scope::None)
    }

    /// String-keyed variant; unknown capability codes resolve to None
    pub fn scope_for_code(&self, role: &str, code: &str) -> Scope {
        match Capability::from_str(code) {
            Some(capability) => self.scope_for(role, capability),
            None => Scope::None,
        }
    }

    pub fn is_permitted(&self, role: &str, capability: Capability) -> bool {
        self.scope_for(role, capability).permits()
    }

    /// Effective scope across all roles a user holds.
    ///
    /// The broadest scope wins, decided independently per capability. A user
    /// who is both "parent" and "assistant_leader" gets whichever scope is
    /// wider for each specific capability, not one role's full row.
    pub fn effective_scope<S: AsRef<str>>(&self, roles: &[S], capability: Capability) -> Scope {
        roles
            .iter()
            .map(|role| self.scope_for(role.as_ref(), capability))
            .max()
            .unwrap_or(Scope::None)
    }

    pub fn is_permitted_any<S: AsRef<str>>(&self, roles: &[S], capability: Capability) -> bool {
        self.effective_scope(roles, capability).permits()
    }

    /// Role names and descriptions, sorted by name, for the admin UI
    pub fn roles(&self) -> Vec<(String, String)> {
        let mut roles: Vec<(String, String)> = self
            .descriptions
            .iter()
            .map(|(name, description)| (name.clone(), description.clone()))
            .collect();
        roles.sort();
        roles
    }

    /// The capability catalog, read-only, for the admin UI
    pub fn catalog(&self) -> Vec<CapabilityInfo> {
        Capability::all().iter().map(Capability::info).collect()
    }
}

impl std::fmt::Debug for PrivilegeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrivilegeService")
            .field("roles", &self.matrix.len())
            .finish_non_exhaustive()
    }
}
