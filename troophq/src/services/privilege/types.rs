use serde::Deserialize;
use std::collections::HashMap;

use troophq_core::authorization::Scope;

/// Privilege matrix configuration as loaded from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct PrivilegeConfig {
    pub roles: HashMap<String, RoleGrants>,
}

/// One role's scope per capability.
///
/// Grant keys are capability codes; they are checked against the catalog
/// when the configuration is validated, not at lookup time.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleGrants {
    #[serde(default)]
    pub description: String,
    pub grants: HashMap<String, Scope>,
}
