//! Admin module: claim & role administration workflow
//!
//! Layers, innermost first: [`forms`] validate submissions, [`workflow`]
//! runs each operation against the identity store and reports a typed
//! [`AdminError`], [`controller`] maps the outcome to a redirect or a
//! re-rendered [`views::Page`].

pub mod controller;
pub mod error;
pub mod forms;
pub mod views;
pub mod workflow;

pub use controller::AdminController;
pub use error::{AdminError, EntityKind};
pub use forms::{AddUserForm, ClaimForm, EditUserForm, RoleForm, UserRoleForm};
pub use views::{ActionOutcome, ClaimsView, EditRoleView, EditUserView, Page, Redirect, UserRoleView, View};
pub use workflow::{AdminResult, AdminWorkflow, ClaimOwner};
