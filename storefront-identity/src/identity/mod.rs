//! Identity module: users, roles, claims, and the store contract
//!
//! The back-office never owns identity data: it reads and mutates it through
//! [`IdentityStore`].

pub mod store;
pub mod types;

#[cfg(feature = "memory-store")]
pub mod actor;

pub use store::IdentityStore;
pub use types::{claim_types, Claim, NewUser, Role, User};

#[cfg(feature = "memory-store")]
pub use actor::{IdentityActor, IdentityHandle};
