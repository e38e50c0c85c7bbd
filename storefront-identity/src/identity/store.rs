//! IdentityStore: the contract the back-office consumes
//!
//! Any identity backend (the in-process [`IdentityActor`](super::IdentityActor),
//! a database-backed service, a remote IdP) plugs in by implementing this
//! trait. Finds return `Ok(None)` for unknown ids; mutations report refusals
//! as [`IdentityError::Rejected`](crate::IdentityError::Rejected) with one
//! message per violated rule.

use async_trait::async_trait;

use crate::error::Result;

use super::types::{Claim, NewUser, Role, User};

#[async_trait]
pub trait IdentityStore: Send + Sync {
    // ─── Users ───

    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>>;

    /// All users, in store order
    async fn list_users(&self) -> Result<Vec<User>>;

    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Overwrite the mutable fields of the user identified by `user.id`
    async fn update_user(&self, user: &User) -> Result<()>;

    async fn delete_user(&self, user_id: &str) -> Result<()>;

    async fn get_user_claims(&self, user_id: &str) -> Result<Vec<Claim>>;

    async fn add_user_claim(&self, user_id: &str, claim: Claim) -> Result<()>;

    /// Remove the claim matching both type and value
    async fn remove_user_claim(&self, user_id: &str, claim: &Claim) -> Result<()>;

    // ─── Membership ───

    async fn is_user_in_role(&self, user_id: &str, role_name: &str) -> Result<bool>;

    async fn add_user_to_role(&self, user_id: &str, role_name: &str) -> Result<()>;

    async fn remove_user_from_role(&self, user_id: &str, role_name: &str) -> Result<()>;

    // ─── Roles ───

    async fn find_role_by_id(&self, role_id: &str) -> Result<Option<Role>>;

    /// All roles, in store order
    async fn list_roles(&self) -> Result<Vec<Role>>;

    async fn create_role(&self, name: &str) -> Result<Role>;

    /// Rename the role identified by `role.id`
    async fn update_role(&self, role: &Role) -> Result<()>;

    async fn delete_role(&self, role_id: &str) -> Result<()>;

    async fn get_role_claims(&self, role_id: &str) -> Result<Vec<Claim>>;

    async fn add_role_claim(&self, role_id: &str, claim: Claim) -> Result<()>;

    async fn remove_role_claim(&self, role_id: &str, claim: &Claim) -> Result<()>;
}
