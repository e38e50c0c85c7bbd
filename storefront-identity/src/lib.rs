//! # Storefront Identity
//!
//! Back-office administration of users, roles and claim assignments for the
//! storefront, built on a pluggable identity store.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────┐
//! │            storefront-identity            │
//! ├───────────────────────────────────────────┤
//! │  AdminController  (redirect / re-render)  │
//! ├───────────────────────────────────────────┤
//! │  AdminWorkflow    (fetch → validate →     │
//! │                    mutate → report)       │
//! ├─────────────────────┬─────────────────────┤
//! │  ClaimCatalog       │  IdentityStore      │
//! │  (fixed vocabulary) │  (trait contract)   │
//! ├─────────────────────┴─────────────────────┤
//! │  IdentityActor (in-process store, Argon2) │
//! └───────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use storefront_identity::admin::{AdminController, RoleForm};
//! use storefront_identity::{IdentityActor, IdentityConfig, IdentityStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handle = IdentityActor::spawn(IdentityConfig::new()).await?;
//!     let store: Arc<dyn IdentityStore> = Arc::new(handle);
//!     let controller = AdminController::new(store);
//!
//!     let outcome = controller
//!         .add_role(RoleForm { role_name: "Managers".into() })
//!         .await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Store contract**: every identity operation goes through [`IdentityStore`]
//! - **Claim uniqueness**: at most one claim of a given type per user or role
//! - **No escaping errors**: the controller turns every failure into a page
//! - **Railway Programming**: store operations return `Result<T, IdentityError>`

pub mod admin;
pub mod claims;
pub mod config;
pub mod error;
pub mod identity;

// Re-exports for convenience
pub use claims::ClaimCatalog;
pub use config::IdentityConfig;
pub use error::{IdentityError, Result};
pub use identity::{claim_types, Claim, IdentityStore, NewUser, Role, User};

#[cfg(feature = "memory-store")]
pub use identity::{IdentityActor, IdentityHandle};
