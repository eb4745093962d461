use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed set of roles the backend issues. The wire form is the lowercase token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    Candidate,
    Expert,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidate => "candidate",
            Role::Expert => "expert",
            Role::Admin => "admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    // Tokens are compared exactly after trimming; the backend never varies case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "candidate" => Ok(Role::Candidate),
            "expert" => Ok(Role::Expert),
            "admin" => Ok(Role::Admin),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allow-list of roles, parsed from comma-separated metadata such as `"admin, expert"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet {
    roles: Vec<Role>,
}

impl RoleSet {
    pub fn new<I: IntoIterator<Item = Role>>(roles: I) -> Self {
        let mut out: Vec<Role> = Vec::new();
        for r in roles {
            if !out.contains(&r) { out.push(r); }
        }
        Self { roles: out }
    }

    /// Parse a comma-separated token list. Empty segments are skipped; unknown tokens are rejected.
    pub fn parse(list: &str) -> Result<Self, UnknownRole> {
        let mut roles = Vec::new();
        for tok in list.split(',').map(|t| t.trim()).filter(|t| !t.is_empty()) {
            roles.push(tok.parse::<Role>()?);
        }
        Ok(Self::new(roles))
    }

    pub fn contains(&self, role: Role) -> bool { self.roles.contains(&role) }
    pub fn is_empty(&self) -> bool { self.roles.is_empty() }
}

impl From<&[Role]> for RoleSet {
    fn from(roles: &[Role]) -> Self { Self::new(roles.iter().copied()) }
}

impl<const N: usize> From<[Role; N]> for RoleSet {
    fn from(roles: [Role; N]) -> Self { Self::new(roles) }
}

impl Display for RoleSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = self.roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(",");
        f.write_str(&joined)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_tokens() {
        assert_eq!("candidate".parse::<Role>().unwrap(), Role::Candidate);
        assert_eq!(" admin ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("expert".parse::<Role>().unwrap(), Role::Expert);
    }

    #[test]
    fn rejects_unknown_token() {
        let err = "superuser".parse::<Role>().unwrap_err();
        assert_eq!(err, UnknownRole("superuser".into()));
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn role_set_from_metadata() {
        let set = RoleSet::parse("admin, expert,,admin").unwrap();
        assert!(set.contains(Role::Admin));
        assert!(set.contains(Role::Expert));
        assert!(!set.contains(Role::Candidate));
        assert_eq!(set.to_string(), "admin,expert");
        assert!(RoleSet::parse("admin,root").is_err());
        assert!(RoleSet::parse("").unwrap().is_empty());
    }

    #[test]
    fn serde_uses_lowercase_token() {
        assert_eq!(serde_json::to_string(&Role::Expert).unwrap(), "\"expert\"");
        let r: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(r, Role::Admin);
        assert!(serde_json::from_str::<Role>("\"hr\"").is_err());
    }
}
