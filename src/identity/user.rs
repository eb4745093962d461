use serde::{Deserialize, Serialize};

use super::role::Role;

/// Identity snapshot of the signed-in user, as returned by `/auth/login` and `/auth/me`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self { id: id.into(), full_name: full_name.into(), email: email.into(), role }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape_is_camel_case() {
        let u = User::new("65a1", "Asha Rao", "asha@example.org", Role::Expert);
        let v = serde_json::to_value(&u).unwrap();
        assert_eq!(v, json!({"id": "65a1", "fullName": "Asha Rao", "email": "asha@example.org", "role": "expert"}));
    }

    #[test]
    fn missing_role_defaults_to_candidate() {
        let u: User = serde_json::from_value(json!({"id": "1", "fullName": "A", "email": "a@x"})).unwrap();
        assert_eq!(u.role, Role::Candidate);
    }

    #[test]
    fn unknown_role_is_an_error() {
        let r = serde_json::from_value::<User>(json!({"id": "1", "fullName": "A", "email": "a@x", "role": "owner"}));
        assert!(r.is_err());
    }
}
