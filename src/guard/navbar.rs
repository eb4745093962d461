use crate::identity::{Role, RoleSet, UnknownRole};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("navigation item '{item}': {source}")]
pub struct NavError {
    pub item: String,
    #[source]
    pub source: UnknownRole,
}

/// A navigation entry. Without an allow-list it is shown to every role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub href: String,
    allowed: Option<RoleSet>,
}

impl NavItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self { id: id.into(), label: label.into(), href: href.into(), allowed: None }
    }

    /// Attach comma-separated role metadata, e.g. `"admin,expert"`.
    pub fn with_roles(mut self, list: &str) -> Result<Self, NavError> {
        let set = RoleSet::parse(list).map_err(|source| NavError { item: self.id.clone(), source })?;
        self.allowed = Some(set);
        Ok(self)
    }

    pub fn restricted_to(mut self, roles: impl Into<RoleSet>) -> Self {
        self.allowed = Some(roles.into());
        self
    }

    pub fn is_visible_to(&self, role: Role) -> bool {
        self.allowed.as_ref().map(|s| s.contains(role)).unwrap_or(true)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavBar {
    items: Vec<NavItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavItem>) -> Self { Self { items } }
    pub fn items(&self) -> &[NavItem] { &self.items }

    /// Pure projection of a role onto the static metadata.
    pub fn project(&self, role: Role) -> NavVisibility {
        NavVisibility {
            entries: self.items.iter().map(|i| (i.id.clone(), i.is_visible_to(role))).collect(),
        }
    }
}

/// Per-item visibility, in navigation order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavVisibility {
    entries: Vec<(String, bool)>,
}

impl NavVisibility {
    pub fn is_visible(&self, id: &str) -> bool {
        self.entries.iter().any(|(i, v)| i == id && *v)
    }

    pub fn visible_ids(&self) -> Vec<&str> {
        self.entries.iter().filter(|(_, v)| *v).map(|(i, _)| i.as_str()).collect()
    }

    pub fn hidden_ids(&self) -> Vec<&str> {
        self.entries.iter().filter(|(_, v)| !*v).map(|(i, _)| i.as_str()).collect()
    }
}
