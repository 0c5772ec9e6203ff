use serde::Deserialize;
use std::collections::HashMap;

/// A user account the server can authenticate.
///
/// Accounts live in configuration because credential storage is the data
/// layer's concern; the server only needs the bcrypt hash to verify against
/// and the role names feeding the privilege matrix.
#[derive(Debug, Deserialize, Clone)]
pub struct UserAccount {
    /// bcrypt hash of the account password
    pub password_hash: String,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[allow(unused)]
#[readonly::make]
pub struct ApiServer {
    pub bind_address: String,
    #[serde(default = "default_session_ttl_minutes")]
    pub session_ttl_minutes: i64,
    /// Accounts keyed by login email (lowercase)
    #[serde(default)]
    pub users: HashMap<String, UserAccount>,
}

fn default_session_ttl_minutes() -> i64 {
    12 * 60
}

impl Default for ApiServer {
    fn default() -> Self {
        ApiServer {
            bind_address: "0.0.0.0:21380".to_string(),
            session_ttl_minutes: default_session_ttl_minutes(),
            users: HashMap::new(),
        }
    }
}
