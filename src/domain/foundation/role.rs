//! Caller roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Privilege level of the current session.
///
/// Not `Ord`: "agent" pages reject plain users even though both are
/// authenticated. Access goes through the gate's rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// No session, or the session token was invalid or expired.
    #[default]
    Anonymous,
    /// Registered buyer/renter.
    User,
    /// Real-estate agent who manages listings.
    Agent,
    /// Site administrator.
    Admin,
}

impl Role {
    /// All roles, least to most privileged.
    pub const ALL: [Role; 4] = [Role::Anonymous, Role::User, Role::Agent, Role::Admin];

    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::Agent => "agent",
            Role::Admin => "admin",
        }
    }

    /// Returns true for every role that comes from a session.
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Role::Anonymous)
    }

    /// Maps a backend role claim onto a role.
    ///
    /// The claim comes from an authenticated token, so an unrecognised value
    /// still yields an authenticated role, the least privileged one.
    pub fn from_claim(claim: &str) -> Self {
        claim.parse::<Role>().ok().filter(Role::is_authenticated).unwrap_or(Role::User)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anonymous" | "guest" => Ok(Role::Anonymous),
            "user" => Ok(Role::User),
            "agent" => Ok(Role::Agent),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_role_is_anonymous() {
        assert_eq!(Role::default(), Role::Anonymous);
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Agent".parse::<Role>().unwrap(), Role::Agent);
        assert_eq!(" ADMIN ".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn claim_mapping_never_downgrades_to_anonymous() {
        assert_eq!(Role::from_claim("agent"), Role::Agent);
        assert_eq!(Role::from_claim("admin"), Role::Admin);
        assert_eq!(Role::from_claim("anonymous"), Role::User);
        assert_eq!(Role::from_claim("superuser"), Role::User);
    }

    #[test]
    fn only_anonymous_is_unauthenticated() {
        assert!(!Role::Anonymous.is_authenticated());
        assert!(Role::User.is_authenticated());
        assert!(Role::Agent.is_authenticated());
        assert!(Role::Admin.is_authenticated());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"agent\"");
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::User);
    }
}
