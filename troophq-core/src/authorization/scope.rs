use serde::{Deserialize, Serialize};

/// Breadth of data a granted capability applies to.
///
/// Variants are declared narrowest to broadest so the derived `Ord` compares
/// by breadth: `Scope::Troop` is the maximum, `Scope::None` the minimum.
/// Merging the scopes a user holds through multiple roles is therefore a
/// plain `max()` per capability.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "utoipa", derive(utoipa::ToSchema))]
pub enum Scope {
    /// No access at all. Also the fail-closed answer for unknown roles and
    /// capabilities.
    None,
    /// Only the user's own record
    #[serde(rename = "self")]
    SelfOnly,
    /// The user's own family unit and their linked scouts
    Household,
    /// A den or patrol sub-group
    DenPatrol,
    /// All data of the troop
    Troop,
}

impl Scope {
    /// Convert to the token used in privilege configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::None => "none",
            Scope::SelfOnly => "self",
            Scope::Household => "household",
            Scope::DenPatrol => "den_patrol",
            Scope::Troop => "troop",
        }
    }

    /// Parse from a scope token
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Scope> {
        match s.to_lowercase().as_str() {
            "none" => Some(Scope::None),
            "self" => Some(Scope::SelfOnly),
            "household" => Some(Scope::Household),
            "den_patrol" => Some(Scope::DenPatrol),
            "troop" => Some(Scope::Troop),
            _ => None,
        }
    }

    /// Human readable name shown in the admin UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Scope::None => "None",
            Scope::SelfOnly => "Self",
            Scope::Household => "Household",
            Scope::DenPatrol => "Den/Patrol",
            Scope::Troop => "Troop",
        }
    }

    /// The wider of two scopes
    pub fn broadest(a: Scope, b: Scope) -> Scope {
        a.max(b)
    }

    /// Whether this scope grants any access at all
    pub fn permits(&self) -> bool {
        *self != Scope::None
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
