//! Identity model shared by the session store and the access guard.
//! Keep the public surface thin and split implementation across sub-modules.

mod role;
mod user;

pub use role::{Role, RoleSet, UnknownRole};
pub use user::User;
