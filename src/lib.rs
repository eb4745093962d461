//! MIRA client core: request client, endpoint facades, session persistence,
//! role guards and toast notifications for the recruitment / panel-matching API.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod identity;
pub mod notify;
pub mod session;

pub use api::ApiClient;
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ClientResult};
pub use guard::{AccessGuard, Destination, GuardOutcome, Navigator};
pub use identity::{Role, RoleSet, User};
pub use notify::{Notifier, Notify, Toast, ToastKind};
pub use session::SessionStore;

// Test-only printing helper: expands to tprintln! during tests and is absent otherwise.
// Usage in tests: tprintln!("debug: {}", value);
#[cfg(any(test, debug_assertions))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ( eprintln!($($arg)*) );
}

// In non-test builds, provide a no-op tprintln! so calls compile without effect.
#[cfg(not(any(test, debug_assertions)))]
#[macro_export]
macro_rules! tprintln {
    ($($arg:tt)*) => ({
        // Preserve formatting checks in release without producing code
        if false { let _ = format!($($arg)*); }
    });
}
