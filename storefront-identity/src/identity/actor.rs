//! IdentityActor: in-process identity store running as a Tokio actor
//!
//! All operations are processed sequentially via an mpsc channel, so each
//! store call observes and produces a consistent snapshot. Callers talk to
//! the actor through [`IdentityHandle`], which implements
//! [`IdentityStore`](super::IdentityStore).
//!
//! # Usage
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use storefront_identity::{IdentityActor, IdentityConfig, IdentityStore, NewUser};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let handle = IdentityActor::spawn(IdentityConfig::new()).await?;
//!
//!     let user = handle
//!         .create_user(NewUser {
//!             user_name: "alice".into(),
//!             email: "alice@example.com".into(),
//!             password: "Secure!Pass1".into(),
//!             birthdate: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
//!             city: "Brussels".into(),
//!             country: "Belgium".into(),
//!         })
//!         .await?;
//!
//!     let role = handle.create_role("Managers").await?;
//!     handle.add_user_to_role(&user.id, &role.name).await?;
//!     assert!(handle.is_user_in_role(&user.id, "Managers").await?);
//!
//!     Ok(())
//! }
//! ```

use std::collections::{BTreeSet, HashMap};

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{IdentityConfig, PasswordPolicy};
use crate::error::{IdentityError, Result};

use super::store::IdentityStore;
use super::types::*;

const ALLOWED_USER_NAME_SYMBOLS: &str = "-._@+";

// ─── Actor Messages ───

enum IdentityMsg {
    FindUser {
        user_id: String,
        reply: oneshot::Sender<Result<Option<User>>>,
    },
    ListUsers {
        reply: oneshot::Sender<Result<Vec<User>>>,
    },
    CreateUser {
        new_user: NewUser,
        reply: oneshot::Sender<Result<User>>,
    },
    UpdateUser {
        user: User,
        reply: oneshot::Sender<Result<()>>,
    },
    DeleteUser {
        user_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    VerifyPassword {
        user_id: String,
        password: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    GetUserClaims {
        user_id: String,
        reply: oneshot::Sender<Result<Vec<Claim>>>,
    },
    AddUserClaim {
        user_id: String,
        claim: Claim,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveUserClaim {
        user_id: String,
        claim: Claim,
        reply: oneshot::Sender<Result<()>>,
    },
    IsUserInRole {
        user_id: String,
        role_name: String,
        reply: oneshot::Sender<Result<bool>>,
    },
    AddUserToRole {
        user_id: String,
        role_name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveUserFromRole {
        user_id: String,
        role_name: String,
        reply: oneshot::Sender<Result<()>>,
    },
    FindRole {
        role_id: String,
        reply: oneshot::Sender<Result<Option<Role>>>,
    },
    ListRoles {
        reply: oneshot::Sender<Result<Vec<Role>>>,
    },
    CreateRole {
        name: String,
        reply: oneshot::Sender<Result<Role>>,
    },
    UpdateRole {
        role: Role,
        reply: oneshot::Sender<Result<()>>,
    },
    DeleteRole {
        role_id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    GetRoleClaims {
        role_id: String,
        reply: oneshot::Sender<Result<Vec<Claim>>>,
    },
    AddRoleClaim {
        role_id: String,
        claim: Claim,
        reply: oneshot::Sender<Result<()>>,
    },
    RemoveRoleClaim {
        role_id: String,
        claim: Claim,
        reply: oneshot::Sender<Result<()>>,
    },
}

// ─── Stored Records ───

struct StoredUser {
    user: User,
    normalized_name: String,
    password_hash: String,
    claims: Vec<Claim>,
    role_ids: BTreeSet<String>,
    seq: u64,
}

struct StoredRole {
    role: Role,
    normalized_name: String,
    claims: Vec<Claim>,
    seq: u64,
}

// ─── Actor ───

/// Identity actor: owns users, roles, claims and memberships
pub struct IdentityActor {
    users: HashMap<String, StoredUser>,
    roles: HashMap<String, StoredRole>,
    next_seq: u64,
    password_policy: PasswordPolicy,
    require_unique_email: bool,
    hash_params: Params,
    rx: mpsc::Receiver<IdentityMsg>,
}

impl IdentityActor {
    /// Spawn the identity actor and return a handle for sending messages
    pub async fn spawn(config: IdentityConfig) -> Result<IdentityHandle> {
        let hash_params = Params::new(config.hash_memory_kib, config.hash_iterations, 1, None)?;
        if config.mailbox_capacity == 0 {
            return Err(IdentityError::Config(
                "Mailbox capacity must be greater than zero".into(),
            ));
        }

        let (tx, rx) = mpsc::channel(config.mailbox_capacity);
        let actor = Self {
            users: HashMap::new(),
            roles: HashMap::new(),
            next_seq: 0,
            password_policy: config.password_policy,
            require_unique_email: config.require_unique_email,
            hash_params,
            rx,
        };

        tokio::spawn(actor.run());
        info!("IdentityActor spawned");
        Ok(IdentityHandle { tx })
    }

    /// Main event loop
    async fn run(mut self) {
        while let Some(msg) = self.rx.recv().await {
            match msg {
                IdentityMsg::FindUser { user_id, reply } => {
                    let _ = reply.send(Ok(self.users.get(&user_id).map(|u| u.user.clone())));
                }
                IdentityMsg::ListUsers { reply } => {
                    let _ = reply.send(Ok(self.handle_list_users()));
                }
                IdentityMsg::CreateUser { new_user, reply } => {
                    let _ = reply.send(self.handle_create_user(new_user));
                }
                IdentityMsg::UpdateUser { user, reply } => {
                    let _ = reply.send(self.handle_update_user(user));
                }
                IdentityMsg::DeleteUser { user_id, reply } => {
                    let _ = reply.send(self.handle_delete_user(&user_id));
                }
                IdentityMsg::VerifyPassword { user_id, password, reply } => {
                    let _ = reply.send(self.handle_verify_password(&user_id, &password));
                }
                IdentityMsg::GetUserClaims { user_id, reply } => {
                    let _ = reply.send(self.user(&user_id).map(|u| u.claims.clone()));
                }
                IdentityMsg::AddUserClaim { user_id, claim, reply } => {
                    let _ = reply.send(self.handle_add_user_claim(&user_id, claim));
                }
                IdentityMsg::RemoveUserClaim { user_id, claim, reply } => {
                    let _ = reply.send(self.handle_remove_user_claim(&user_id, &claim));
                }
                IdentityMsg::IsUserInRole { user_id, role_name, reply } => {
                    let _ = reply.send(self.handle_is_in_role(&user_id, &role_name));
                }
                IdentityMsg::AddUserToRole { user_id, role_name, reply } => {
                    let _ = reply.send(self.handle_add_to_role(&user_id, &role_name));
                }
                IdentityMsg::RemoveUserFromRole { user_id, role_name, reply } => {
                    let _ = reply.send(self.handle_remove_from_role(&user_id, &role_name));
                }
                IdentityMsg::FindRole { role_id, reply } => {
                    let _ = reply.send(Ok(self.roles.get(&role_id).map(|r| r.role.clone())));
                }
                IdentityMsg::ListRoles { reply } => {
                    let _ = reply.send(Ok(self.handle_list_roles()));
                }
                IdentityMsg::CreateRole { name, reply } => {
                    let _ = reply.send(self.handle_create_role(name));
                }
                IdentityMsg::UpdateRole { role, reply } => {
                    let _ = reply.send(self.handle_update_role(role));
                }
                IdentityMsg::DeleteRole { role_id, reply } => {
                    let _ = reply.send(self.handle_delete_role(&role_id));
                }
                IdentityMsg::GetRoleClaims { role_id, reply } => {
                    let _ = reply.send(self.role(&role_id).map(|r| r.claims.clone()));
                }
                IdentityMsg::AddRoleClaim { role_id, claim, reply } => {
                    let _ = reply.send(self.handle_add_role_claim(&role_id, claim));
                }
                IdentityMsg::RemoveRoleClaim { role_id, claim, reply } => {
                    let _ = reply.send(self.handle_remove_role_claim(&role_id, &claim));
                }
            }
        }
        info!("IdentityActor stopped");
    }

    // ─── User Handlers ───

    fn handle_list_users(&self) -> Vec<User> {
        let mut stored: Vec<&StoredUser> = self.users.values().collect();
        stored.sort_by_key(|u| u.seq);
        debug!(count = stored.len(), "Listing users");
        stored.into_iter().map(|u| u.user.clone()).collect()
    }

    fn handle_create_user(&mut self, new_user: NewUser) -> Result<User> {
        let mut errors = self.user_field_errors(&new_user.user_name, &new_user.email, None);
        errors.extend(self.password_policy.check(&new_user.password));
        if !errors.is_empty() {
            warn!(user_name = %new_user.user_name, ?errors, "User creation rejected");
            return Err(IdentityError::Rejected(errors));
        }

        let password_hash = self.hash_password(&new_user.password)?;
        let user = User {
            id: Uuid::new_v4().to_string(),
            user_name: new_user.user_name,
            email: new_user.email,
            birthdate: new_user.birthdate,
            city: new_user.city,
            country: new_user.country,
        };

        let seq = self.bump_seq();
        self.users.insert(
            user.id.clone(),
            StoredUser {
                user: user.clone(),
                normalized_name: normalize(&user.user_name),
                password_hash,
                claims: Vec::new(),
                role_ids: BTreeSet::new(),
                seq,
            },
        );

        info!(user_id = %user.id, user_name = %user.user_name, "User created");
        Ok(user)
    }

    fn handle_update_user(&mut self, user: User) -> Result<()> {
        self.user(&user.id)?;
        let errors = self.user_field_errors(&user.user_name, &user.email, Some(&user.id));
        if !errors.is_empty() {
            warn!(user_id = %user.id, ?errors, "User update rejected");
            return Err(IdentityError::Rejected(errors));
        }

        let stored = self.user_mut(&user.id)?;
        stored.normalized_name = normalize(&user.user_name);
        stored.user = user;
        info!(user_id = %stored.user.id, "User updated");
        Ok(())
    }

    fn handle_delete_user(&mut self, user_id: &str) -> Result<()> {
        match self.users.remove(user_id) {
            Some(stored) => {
                info!(user_id, user_name = %stored.user.user_name, "User deleted");
                Ok(())
            }
            None => Err(user_not_found(user_id)),
        }
    }

    fn handle_verify_password(&self, user_id: &str, password: &str) -> Result<bool> {
        let stored = self.user(user_id)?;
        let parsed = PasswordHash::new(&stored.password_hash)?;
        Ok(self
            .hasher()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    fn handle_add_user_claim(&mut self, user_id: &str, claim: Claim) -> Result<()> {
        let stored = self.user_mut(user_id)?;
        info!(user_id, claim_type = %claim.claim_type, "Claim added to user");
        stored.claims.push(claim);
        Ok(())
    }

    fn handle_remove_user_claim(&mut self, user_id: &str, claim: &Claim) -> Result<()> {
        let stored = self.user_mut(user_id)?;
        remove_claim(&mut stored.claims, claim)?;
        info!(user_id, claim_type = %claim.claim_type, "Claim removed from user");
        Ok(())
    }

    // ─── Membership Handlers ───

    fn handle_is_in_role(&self, user_id: &str, role_name: &str) -> Result<bool> {
        let role_id = self.role_id_by_name(role_name)?;
        Ok(self.user(user_id)?.role_ids.contains(&role_id))
    }

    fn handle_add_to_role(&mut self, user_id: &str, role_name: &str) -> Result<()> {
        let role_id = self.role_id_by_name(role_name)?;
        let stored = self.user_mut(user_id)?;
        if !stored.role_ids.insert(role_id) {
            warn!(user_id, role_name, "User already in role");
            return Err(IdentityError::rejected(format!(
                "User already in role '{role_name}'."
            )));
        }
        info!(user_id, role_name, "User added to role");
        Ok(())
    }

    fn handle_remove_from_role(&mut self, user_id: &str, role_name: &str) -> Result<()> {
        let role_id = self.role_id_by_name(role_name)?;
        let stored = self.user_mut(user_id)?;
        if !stored.role_ids.remove(&role_id) {
            warn!(user_id, role_name, "User not in role");
            return Err(IdentityError::rejected(format!(
                "User is not in role '{role_name}'."
            )));
        }
        info!(user_id, role_name, "User removed from role");
        Ok(())
    }

    // ─── Role Handlers ───

    fn handle_list_roles(&self) -> Vec<Role> {
        let mut stored: Vec<&StoredRole> = self.roles.values().collect();
        stored.sort_by_key(|r| r.seq);
        debug!(count = stored.len(), "Listing roles");
        stored.into_iter().map(|r| r.role.clone()).collect()
    }

    fn handle_create_role(&mut self, name: String) -> Result<Role> {
        if let Some(message) = self.role_name_error(&name, None) {
            warn!(role_name = %name, "Role creation rejected");
            return Err(IdentityError::rejected(message));
        }

        let role = Role {
            id: Uuid::new_v4().to_string(),
            name,
        };
        let seq = self.bump_seq();
        self.roles.insert(
            role.id.clone(),
            StoredRole {
                role: role.clone(),
                normalized_name: normalize(&role.name),
                claims: Vec::new(),
                seq,
            },
        );

        info!(role_id = %role.id, role_name = %role.name, "Role created");
        Ok(role)
    }

    fn handle_update_role(&mut self, role: Role) -> Result<()> {
        self.role(&role.id)?;
        if let Some(message) = self.role_name_error(&role.name, Some(&role.id)) {
            warn!(role_id = %role.id, role_name = %role.name, "Role update rejected");
            return Err(IdentityError::rejected(message));
        }

        let stored = self.role_mut(&role.id)?;
        stored.normalized_name = normalize(&role.name);
        stored.role = role;
        info!(role_id = %stored.role.id, role_name = %stored.role.name, "Role updated");
        Ok(())
    }

    fn handle_delete_role(&mut self, role_id: &str) -> Result<()> {
        let stored = self.roles.remove(role_id).ok_or_else(|| role_not_found(role_id))?;
        let mut released = 0usize;
        for user in self.users.values_mut() {
            if user.role_ids.remove(role_id) {
                released += 1;
            }
        }
        info!(role_id, role_name = %stored.role.name, released, "Role deleted");
        Ok(())
    }

    fn handle_add_role_claim(&mut self, role_id: &str, claim: Claim) -> Result<()> {
        let stored = self.role_mut(role_id)?;
        info!(role_id, claim_type = %claim.claim_type, "Claim added to role");
        stored.claims.push(claim);
        Ok(())
    }

    fn handle_remove_role_claim(&mut self, role_id: &str, claim: &Claim) -> Result<()> {
        let stored = self.role_mut(role_id)?;
        remove_claim(&mut stored.claims, claim)?;
        info!(role_id, claim_type = %claim.claim_type, "Claim removed from role");
        Ok(())
    }

    // ─── Helpers ───

    fn bump_seq(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.hash_params.clone())
    }

    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        Ok(self
            .hasher()
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    fn user(&self, user_id: &str) -> Result<&StoredUser> {
        self.users.get(user_id).ok_or_else(|| user_not_found(user_id))
    }

    fn user_mut(&mut self, user_id: &str) -> Result<&mut StoredUser> {
        self.users.get_mut(user_id).ok_or_else(|| user_not_found(user_id))
    }

    fn role(&self, role_id: &str) -> Result<&StoredRole> {
        self.roles.get(role_id).ok_or_else(|| role_not_found(role_id))
    }

    fn role_mut(&mut self, role_id: &str) -> Result<&mut StoredRole> {
        self.roles.get_mut(role_id).ok_or_else(|| role_not_found(role_id))
    }

    fn role_id_by_name(&self, role_name: &str) -> Result<String> {
        let normalized = normalize(role_name);
        self.roles
            .values()
            .find(|r| r.normalized_name == normalized)
            .map(|r| r.role.id.clone())
            .ok_or_else(|| IdentityError::rejected(format!("Role {role_name} does not exist.")))
    }

    /// Rule violations for a user name / email pair; `exclude` skips the
    /// user being updated in uniqueness checks
    fn user_field_errors(&self, user_name: &str, email: &str, exclude: Option<&str>) -> Vec<String> {
        let mut errors = Vec::new();

        let valid_name = !user_name.is_empty()
            && user_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || ALLOWED_USER_NAME_SYMBOLS.contains(c));
        if !valid_name {
            errors.push(format!(
                "Username '{user_name}' is invalid, can only contain letters or digits."
            ));
        } else {
            let normalized = normalize(user_name);
            let taken = self
                .users
                .values()
                .any(|u| u.normalized_name == normalized && Some(u.user.id.as_str()) != exclude);
            if taken {
                errors.push(format!("Username '{user_name}' is already taken."));
            }
        }

        if !is_valid_email(email) {
            errors.push(format!("Email '{email}' is invalid."));
        } else if self.require_unique_email {
            let normalized = normalize(email);
            let taken = self
                .users
                .values()
                .any(|u| normalize(&u.user.email) == normalized && Some(u.user.id.as_str()) != exclude);
            if taken {
                errors.push(format!("Email '{email}' is already taken."));
            }
        }

        errors
    }

    fn role_name_error(&self, name: &str, exclude: Option<&str>) -> Option<String> {
        if name.trim().is_empty() {
            return Some(format!("Role name '{name}' is invalid."));
        }
        let normalized = normalize(name);
        self.roles
            .values()
            .any(|r| r.normalized_name == normalized && Some(r.role.id.as_str()) != exclude)
            .then(|| format!("Role name '{name}' is already taken."))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_uppercase()
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn remove_claim(claims: &mut Vec<Claim>, claim: &Claim) -> Result<()> {
    let position = claims.iter().position(|c| c == claim).ok_or_else(|| {
        IdentityError::rejected(format!("Claim '{}' is not attached.", claim.claim_type))
    })?;
    claims.remove(position);
    Ok(())
}

fn user_not_found(user_id: &str) -> IdentityError {
    IdentityError::rejected(format!("User '{user_id}' was not found."))
}

fn role_not_found(role_id: &str) -> IdentityError {
    IdentityError::rejected(format!("Role '{role_id}' was not found."))
}

// ─── Handle (client-facing API) ───

/// Thread-safe handle to communicate with the IdentityActor
#[derive(Clone)]
pub struct IdentityHandle {
    tx: mpsc::Sender<IdentityMsg>,
}

impl IdentityHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T>>) -> IdentityMsg,
    ) -> Result<T> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(build(reply))
            .await
            .map_err(|_| IdentityError::ActorUnavailable("IdentityActor".into()))?;
        rx.await
            .map_err(|_| IdentityError::ActorUnavailable("IdentityActor dropped".into()))?
    }

    /// Check a password against the stored Argon2 hash
    pub async fn verify_password(&self, user_id: &str, password: &str) -> Result<bool> {
        let (user_id, password) = (user_id.to_string(), password.to_string());
        self.request(|reply| IdentityMsg::VerifyPassword { user_id, password, reply })
            .await
    }
}

#[async_trait]
impl IdentityStore for IdentityHandle {
    async fn find_user_by_id(&self, user_id: &str) -> Result<Option<User>> {
        let user_id = user_id.to_string();
        self.request(|reply| IdentityMsg::FindUser { user_id, reply }).await
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.request(|reply| IdentityMsg::ListUsers { reply }).await
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        self.request(|reply| IdentityMsg::CreateUser { new_user, reply }).await
    }

    async fn update_user(&self, user: &User) -> Result<()> {
        let user = user.clone();
        self.request(|reply| IdentityMsg::UpdateUser { user, reply }).await
    }

    async fn delete_user(&self, user_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        self.request(|reply| IdentityMsg::DeleteUser { user_id, reply }).await
    }

    async fn get_user_claims(&self, user_id: &str) -> Result<Vec<Claim>> {
        let user_id = user_id.to_string();
        self.request(|reply| IdentityMsg::GetUserClaims { user_id, reply }).await
    }

    async fn add_user_claim(&self, user_id: &str, claim: Claim) -> Result<()> {
        let user_id = user_id.to_string();
        self.request(|reply| IdentityMsg::AddUserClaim { user_id, claim, reply })
            .await
    }

    async fn remove_user_claim(&self, user_id: &str, claim: &Claim) -> Result<()> {
        let (user_id, claim) = (user_id.to_string(), claim.clone());
        self.request(|reply| IdentityMsg::RemoveUserClaim { user_id, claim, reply })
            .await
    }

    async fn is_user_in_role(&self, user_id: &str, role_name: &str) -> Result<bool> {
        let (user_id, role_name) = (user_id.to_string(), role_name.to_string());
        self.request(|reply| IdentityMsg::IsUserInRole { user_id, role_name, reply })
            .await
    }

    async fn add_user_to_role(&self, user_id: &str, role_name: &str) -> Result<()> {
        let (user_id, role_name) = (user_id.to_string(), role_name.to_string());
        self.request(|reply| IdentityMsg::AddUserToRole { user_id, role_name, reply })
            .await
    }

    async fn remove_user_from_role(&self, user_id: &str, role_name: &str) -> Result<()> {
        let (user_id, role_name) = (user_id.to_string(), role_name.to_string());
        self.request(|reply| IdentityMsg::RemoveUserFromRole { user_id, role_name, reply })
            .await
    }

    async fn find_role_by_id(&self, role_id: &str) -> Result<Option<Role>> {
        let role_id = role_id.to_string();
        self.request(|reply| IdentityMsg::FindRole { role_id, reply }).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.request(|reply| IdentityMsg::ListRoles { reply }).await
    }

    async fn create_role(&self, name: &str) -> Result<Role> {
        let name = name.to_string();
        self.request(|reply| IdentityMsg::CreateRole { name, reply }).await
    }

    async fn update_role(&self, role: &Role) -> Result<()> {
        let role = role.clone();
        self.request(|reply| IdentityMsg::UpdateRole { role, reply }).await
    }

    async fn delete_role(&self, role_id: &str) -> Result<()> {
        let role_id = role_id.to_string();
        self.request(|reply| IdentityMsg::DeleteRole { role_id, reply }).await
    }

    async fn get_role_claims(&self, role_id: &str) -> Result<Vec<Claim>> {
        let role_id = role_id.to_string();
        self.request(|reply| IdentityMsg::GetRoleClaims { role_id, reply }).await
    }

    async fn add_role_claim(&self, role_id: &str, claim: Claim) -> Result<()> {
        let role_id = role_id.to_string();
        self.request(|reply| IdentityMsg::AddRoleClaim { role_id, claim, reply })
            .await
    }

    async fn remove_role_claim(&self, role_id: &str, claim: &Claim) -> Result<()> {
        let (role_id, claim) = (role_id.to_string(), claim.clone());
        self.request(|reply| IdentityMsg::RemoveRoleClaim { role_id, claim, reply })
            .await
    }
}
