//! AdminWorkflow: claim & role administration over an [`IdentityStore`]
//!
//! Every operation has the same shape: fetch the addressed entity, validate
//! the submitted form, apply the mutation or reject it, report. An unknown
//! id is always reported as not found, whatever the form holds.
//! The workflow holds no state of its own between calls; concurrent
//! requests are only ordered by whatever the store guarantees. In
//! particular two simultaneous add-claim calls for the same type can both
//! pass the duplicate scan.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::claims::ClaimCatalog;
use crate::error::IdentityError;
use crate::identity::types::{claim_types, Claim, Role, User};
use crate::identity::IdentityStore;

use super::error::{AdminError, EntityKind};
use super::forms::{AddUserForm, ClaimForm, EditUserForm, RoleForm, UserRoleForm};
use super::views::{ClaimsView, EditRoleView, EditUserView, UserRoleView};

/// Which side of the claim API an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOwner {
    User,
    Role,
}

impl ClaimOwner {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::User => EntityKind::User,
            Self::Role => EntityKind::Role,
        }
    }
}

pub type AdminResult<T> = std::result::Result<T, AdminError>;

pub struct AdminWorkflow {
    store: Arc<dyn IdentityStore>,
    catalog: ClaimCatalog,
}

impl AdminWorkflow {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            store,
            catalog: ClaimCatalog,
        }
    }

    pub fn catalog(&self) -> Vec<String> {
        self.catalog.all()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    // ─── Users ───

    pub async fn list_users(&self) -> AdminResult<Vec<User>> {
        Ok(self.store.list_users().await?)
    }

    pub async fn create_user(&self, form: &AddUserForm) -> AdminResult<User> {
        let new_user = form.validate(Self::today())?;
        let user = self.store.create_user(new_user).await.map_err(|e| {
            warn!(user_name = %form.user_name, error = %e, "User creation failed");
            AdminError::Creation {
                kind: EntityKind::User,
                reasons: e.messages(),
            }
        })?;
        info!(user_id = %user.id, user_name = %user.user_name, "User added");
        Ok(user)
    }

    /// Current state of a user for the edit screen
    pub async fn load_user(&self, user_id: &str) -> AdminResult<EditUserView> {
        let user = self.require_user(user_id).await?;
        let claims = self.store.get_user_claims(&user.id).await?;
        Ok(EditUserView::from_user(&user, claims))
    }

    /// Overwrite a user's profile and record a date-of-birth claim for the
    /// new birthdate. Older date-of-birth claims are replaced, so exactly
    /// one remains. When the claim cannot be recorded the previous profile
    /// is written back, so a failed edit leaves the user as it was.
    pub async fn edit_user(&self, user_id: &str, form: &EditUserForm) -> AdminResult<User> {
        let original = self.require_user(user_id).await?;
        let fields = form.validate(Self::today())?;

        let mut user = original.clone();
        user.user_name = fields.user_name;
        user.email = fields.email;
        user.birthdate = fields.birthdate;
        user.city = fields.city;
        user.country = fields.country;

        let not_updated = |e: IdentityError| AdminError::Update {
            headline: "User not updated, something went wrong.".into(),
            reasons: e.messages(),
        };
        self.store.update_user(&user).await.map_err(not_updated)?;
        if let Err(e) = self.sync_birthdate_claim(&user).await {
            warn!(user_id = %user.id, error = %e, "Birthdate claim not recorded, restoring profile");
            if let Err(restore) = self.store.update_user(&original).await {
                warn!(user_id = %user.id, error = %restore, "Profile restore failed");
            }
            return Err(not_updated(e));
        }

        info!(user_id = %user.id, "User edited");
        Ok(user)
    }

    /// Add before removing: the user never drops to zero date-of-birth
    /// claims. A failed removal takes the fresh claim back out.
    async fn sync_birthdate_claim(&self, user: &User) -> crate::Result<()> {
        let current = user.birthdate_claim();
        let claims = self.store.get_user_claims(&user.id).await?;

        let added = !claims.contains(&current);
        if added {
            self.store.add_user_claim(&user.id, current.clone()).await?;
        }
        for stale in claims
            .iter()
            .filter(|c| c.claim_type == claim_types::DATE_OF_BIRTH && c.value != current.value)
        {
            if let Err(e) = self.store.remove_user_claim(&user.id, stale).await {
                if added {
                    if let Err(undo) = self.store.remove_user_claim(&user.id, &current).await {
                        warn!(user_id = %user.id, error = %undo, "Fresh birthdate claim left behind");
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    pub async fn delete_user(&self, user_id: &str) -> AdminResult<()> {
        let user = self.require_user(user_id).await?;
        self.store
            .delete_user(&user.id)
            .await
            .map_err(|e| AdminError::Delete {
                headline: "Something went wrong while deleting this user.".into(),
                reasons: e.messages(),
            })?;
        info!(user_id = %user.id, user_name = %user.user_name, "User removed");
        Ok(())
    }

    // ─── Roles ───

    pub async fn list_roles(&self) -> AdminResult<Vec<Role>> {
        Ok(self.store.list_roles().await?)
    }

    pub async fn create_role(&self, form: &RoleForm) -> AdminResult<Role> {
        let name = form.validate()?;
        let role = self
            .store
            .create_role(&name)
            .await
            .map_err(|e| AdminError::Creation {
                kind: EntityKind::Role,
                reasons: e.messages(),
            })?;
        info!(role_id = %role.id, role_name = %role.name, "Role added");
        Ok(role)
    }

    /// Role name, member user names and claims for the edit screen
    pub async fn load_role(&self, role_id: &str) -> AdminResult<EditRoleView> {
        let role = self.require_role(role_id).await?;
        let users = self
            .partition_users(&role)
            .await?
            .0
            .into_iter()
            .map(|u| u.user_name)
            .collect();
        let claims = self.store.get_role_claims(&role.id).await?;
        Ok(EditRoleView {
            id: role.id,
            role_name: role.name,
            users,
            claims,
        })
    }

    pub async fn edit_role(&self, role_id: &str, form: &RoleForm) -> AdminResult<Role> {
        let mut role = self.require_role(role_id).await?;
        role.name = form.validate()?;
        self.store
            .update_role(&role)
            .await
            .map_err(|e| AdminError::Update {
                headline: "Role not updated, something went wrong.".into(),
                reasons: e.messages(),
            })?;
        info!(role_id = %role.id, role_name = %role.name, "Role edited");
        Ok(role)
    }

    pub async fn delete_role(&self, role_id: &str) -> AdminResult<()> {
        let role = self.require_role(role_id).await?;
        self.store
            .delete_role(&role.id)
            .await
            .map_err(|e| AdminError::Delete {
                headline: "Something went wrong while deleting this role.".into(),
                reasons: e.messages(),
            })?;
        info!(role_id = %role.id, role_name = %role.name, "Role removed");
        Ok(())
    }

    // ─── Claims ───

    /// Claims held by a user or role, with the catalog to pick from
    pub async fn claims_view(&self, owner: ClaimOwner, id: &str) -> AdminResult<ClaimsView> {
        let name = self.owner_name(owner, id).await?;
        let claims = self.owner_claims(owner, id).await?;
        Ok(ClaimsView {
            id: id.to_string(),
            name,
            claims,
            all_claims: self.catalog(),
        })
    }

    /// Attach a claim of the submitted type, valued with the type string.
    /// Rejected without touching the store if the owner already holds a
    /// claim of that type.
    pub async fn add_claim(&self, owner: ClaimOwner, id: &str, form: &ClaimForm) -> AdminResult<Claim> {
        self.owner_name(owner, id).await?;
        let claim_type = form.validate_for_add(&self.catalog)?;

        let claims = self.owner_claims(owner, id).await?;
        if claims.iter().any(|c| c.claim_type == claim_type) {
            debug!(%id, %claim_type, kind = %owner.kind(), "Claim already present");
            return Err(AdminError::DuplicateClaim {
                kind: owner.kind(),
                id: id.to_string(),
                claim_type,
            });
        }

        let claim = Claim::of_type(claim_type);
        let added = match owner {
            ClaimOwner::User => self.store.add_user_claim(id, claim.clone()).await,
            ClaimOwner::Role => self.store.add_role_claim(id, claim.clone()).await,
        };
        added.map_err(|e| AdminError::Update {
            headline: format!(
                "Something went wrong while adding the claim for this {}",
                owner.kind()
            ),
            reasons: e.messages(),
        })?;

        info!(%id, claim_type = %claim.claim_type, kind = %owner.kind(), "Claim granted");
        Ok(claim)
    }

    /// Detach the first claim of the submitted type
    pub async fn remove_claim(&self, owner: ClaimOwner, id: &str, form: &ClaimForm) -> AdminResult<Claim> {
        self.owner_name(owner, id).await?;
        let claim_type = form.validate()?;

        let claims = self.owner_claims(owner, id).await?;
        let claim = claims
            .into_iter()
            .find(|c| c.claim_type == claim_type)
            .ok_or_else(|| AdminError::ClaimNotFound {
                kind: owner.kind(),
                id: id.to_string(),
                claim_type: claim_type.clone(),
            })?;

        let removed = match owner {
            ClaimOwner::User => self.store.remove_user_claim(id, &claim).await,
            ClaimOwner::Role => self.store.remove_role_claim(id, &claim).await,
        };
        removed.map_err(|e| AdminError::Delete {
            headline: format!(
                "Something went wrong while deleting the claim for this {}",
                owner.kind()
            ),
            reasons: e.messages(),
        })?;

        info!(%id, %claim_type, kind = %owner.kind(), "Claim revoked");
        Ok(claim)
    }

    // ─── Membership ───

    /// Users not yet in the role
    pub async fn candidate_users(&self, role_id: &str) -> AdminResult<UserRoleView> {
        let role = self.require_role(role_id).await?;
        let (_, outside) = self.partition_users(&role).await?;
        Ok(UserRoleView {
            role_id: role.id,
            role_name: role.name,
            users: outside,
        })
    }

    /// Users currently in the role
    pub async fn member_users(&self, role_id: &str) -> AdminResult<UserRoleView> {
        let role = self.require_role(role_id).await?;
        let (members, _) = self.partition_users(&role).await?;
        Ok(UserRoleView {
            role_id: role.id,
            role_name: role.name,
            users: members,
        })
    }

    pub async fn add_user_to_role(&self, role_id: &str, form: &UserRoleForm) -> AdminResult<()> {
        let role = self.require_role(role_id).await?;
        let user_id = form.validate()?;
        let user = self.require_user(&user_id).await?;

        self.store
            .add_user_to_role(&user.id, &role.name)
            .await
            .map_err(|e| AdminError::Membership { reasons: e.messages() })?;
        info!(user_id = %user.id, role_name = %role.name, "User added to role");
        Ok(())
    }

    /// No membership pre-check: the store decides whether the removal is valid
    pub async fn remove_user_from_role(&self, role_id: &str, form: &UserRoleForm) -> AdminResult<()> {
        let role = self.require_role(role_id).await?;
        let user_id = form.validate()?;
        let user = self.require_user(&user_id).await?;

        self.store
            .remove_user_from_role(&user.id, &role.name)
            .await
            .map_err(|e| AdminError::Membership { reasons: e.messages() })?;
        info!(user_id = %user.id, role_name = %role.name, "User removed from role");
        Ok(())
    }

    // ─── Helpers ───

    async fn require_user(&self, user_id: &str) -> AdminResult<User> {
        self.store
            .find_user_by_id(user_id)
            .await?
            .ok_or_else(|| AdminError::not_found(EntityKind::User, user_id))
    }

    async fn require_role(&self, role_id: &str) -> AdminResult<Role> {
        self.store
            .find_role_by_id(role_id)
            .await?
            .ok_or_else(|| AdminError::not_found(EntityKind::Role, role_id))
    }

    async fn owner_name(&self, owner: ClaimOwner, id: &str) -> AdminResult<String> {
        Ok(match owner {
            ClaimOwner::User => self.require_user(id).await?.user_name,
            ClaimOwner::Role => self.require_role(id).await?.name,
        })
    }

    async fn owner_claims(&self, owner: ClaimOwner, id: &str) -> AdminResult<Vec<Claim>> {
        Ok(match owner {
            ClaimOwner::User => self.store.get_user_claims(id).await?,
            ClaimOwner::Role => self.store.get_role_claims(id).await?,
        })
    }

    /// Split all users into (members, non-members) of `role`, one
    /// membership query per user
    async fn partition_users(&self, role: &Role) -> AdminResult<(Vec<User>, Vec<User>)> {
        let mut members = Vec::new();
        let mut outside = Vec::new();
        for user in self.store.list_users().await? {
            if self.store.is_user_in_role(&user.id, &role.name).await? {
                members.push(user);
            } else {
                outside.push(user);
            }
        }
        Ok((members, outside))
    }
}
