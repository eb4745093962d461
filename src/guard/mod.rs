//! Page-level access checks against the persisted session.
//!
//! The guard never consults the backend: it trusts the cached user record. The
//! backend still enforces authorization on every call.

mod navbar;

pub use navbar::{NavBar, NavError, NavItem, NavVisibility};

use tracing::{debug, info};

use crate::identity::{Role, RoleSet, User};
use crate::notify::{Notify, ToastKind};
use crate::session::SessionStore;

pub const ACCESS_DENIED: &str = "Access denied. You do not have permission to view this page.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    Login,
    Home,
}

impl Destination {
    pub fn default_path(&self) -> &'static str {
        match self {
            Destination::Login => crate::config::DEFAULT_LOGIN_PAGE,
            Destination::Home => crate::config::DEFAULT_HOME_PAGE,
        }
    }
}

/// Performs the redirect side effect for a failed check.
pub trait Navigator: Send + Sync {
    fn redirect(&self, to: Destination);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Authorized { user: User, nav: Option<NavVisibility> },
    Redirected(Destination),
}

impl GuardOutcome {
    pub fn is_authorized(&self) -> bool { matches!(self, GuardOutcome::Authorized { .. }) }

    pub fn user(&self) -> Option<&User> {
        match self {
            GuardOutcome::Authorized { user, .. } => Some(user),
            GuardOutcome::Redirected(_) => None,
        }
    }

    pub fn nav(&self) -> Option<&NavVisibility> {
        match self {
            GuardOutcome::Authorized { nav, .. } => nav.as_ref(),
            GuardOutcome::Redirected(_) => None,
        }
    }

    pub fn redirected_to(&self) -> Option<Destination> {
        match self {
            GuardOutcome::Redirected(d) => Some(*d),
            GuardOutcome::Authorized { .. } => None,
        }
    }
}

/// Visibility for the signed-in user's role, or `None` when signed out.
pub fn setup_navbar(session: &SessionStore, bar: &NavBar) -> Option<NavVisibility> {
    session.get_user().map(|u| bar.project(u.role))
}

pub struct AccessGuard<'a> {
    session: &'a SessionStore,
    navigator: &'a dyn Navigator,
    notifier: &'a dyn Notify,
}

impl<'a> AccessGuard<'a> {
    pub fn new(session: &'a SessionStore, navigator: &'a dyn Navigator, notifier: &'a dyn Notify) -> Self {
        Self { session, navigator, notifier }
    }

    /// Any signed-in user passes and gets the navbar projection for their role.
    pub fn require_auth(&self, bar: &NavBar) -> GuardOutcome {
        match self.session.get_user() {
            Some(user) => {
                let nav = bar.project(user.role);
                debug!(target: "mira::guard", user = %user.id, role = %user.role, "authenticated");
                GuardOutcome::Authorized { user, nav: Some(nav) }
            }
            None => self.redirect(Destination::Login),
        }
    }

    /// Only users whose role is in `allowed` pass; the navbar is left to the caller.
    pub fn require_role(&self, allowed: impl Into<RoleSet>) -> GuardOutcome {
        let allowed = allowed.into();
        let Some(user) = self.session.get_user() else {
            return self.redirect(Destination::Login);
        };
        if allowed.contains(user.role) {
            return GuardOutcome::Authorized { user, nav: None };
        }
        info!(target: "mira::guard", user = %user.id, role = %user.role, allowed = %allowed, "role denied");
        self.notifier.show_toast(ACCESS_DENIED, ToastKind::Error);
        self.redirect(Destination::Home)
    }

    pub fn require_admin(&self) -> GuardOutcome { self.require_role([Role::Admin]) }

    fn redirect(&self, to: Destination) -> GuardOutcome {
        info!(target: "mira::guard", to = to.default_path(), "redirect");
        self.navigator.redirect(to);
        GuardOutcome::Redirected(to)
    }
}
