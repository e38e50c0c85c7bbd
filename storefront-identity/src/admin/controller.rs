//! AdminController: the presentation boundary
//!
//! Wraps [`AdminWorkflow`] and turns every result into an [`ActionOutcome`]:
//! a redirect to a listing on success, or the originating screen re-rendered
//! with the submitted input and the failure's messages. Nothing is thrown
//! past this layer.

use std::sync::Arc;

use tracing::warn;

use crate::identity::IdentityStore;

use super::error::{AdminError, EntityKind};
use super::forms::{AddUserForm, ClaimForm, EditUserForm, RoleForm, UserRoleForm};
use super::views::{ActionOutcome, EditRoleView, EditUserView, Redirect, View};
use super::workflow::{AdminWorkflow, ClaimOwner};

pub struct AdminController {
    workflow: AdminWorkflow,
}

impl AdminController {
    pub fn new(store: Arc<dyn IdentityStore>) -> Self {
        Self {
            workflow: AdminWorkflow::new(store),
        }
    }

    pub fn claim_catalog(&self) -> ActionOutcome {
        ActionOutcome::page(View::ClaimCatalog {
            claims: self.workflow.catalog(),
        })
    }

    // ─── Users ───

    pub async fn user_management(&self) -> ActionOutcome {
        self.listing(EntityKind::User, Vec::new()).await
    }

    pub fn add_user_page(&self) -> ActionOutcome {
        ActionOutcome::page(View::AddUser {
            form: AddUserForm::default(),
        })
    }

    pub async fn add_user(&self, form: AddUserForm) -> ActionOutcome {
        match self.workflow.create_user(&form).await {
            Ok(_) => ActionOutcome::Redirect(Redirect::UserManagement),
            Err(err) => ActionOutcome::page_with_errors(
                View::AddUser {
                    form: form.without_password(),
                },
                err.messages(),
            ),
        }
    }

    pub async fn edit_user_page(&self, user_id: &str) -> ActionOutcome {
        match self.workflow.load_user(user_id).await {
            Ok(view) => ActionOutcome::page(View::EditUser(view)),
            Err(err) if err.is_not_found() => ActionOutcome::Redirect(Redirect::UserManagement),
            Err(err) => self.listing(EntityKind::User, err.messages()).await,
        }
    }

    pub async fn edit_user(&self, user_id: &str, form: EditUserForm) -> ActionOutcome {
        let err = match self.workflow.edit_user(user_id, &form).await {
            Ok(_) => return ActionOutcome::Redirect(Redirect::UserManagement),
            Err(err) if err.is_not_found() => {
                return ActionOutcome::Redirect(Redirect::UserManagement)
            }
            Err(err) => err,
        };

        let claims = match self.workflow.load_user(user_id).await {
            Ok(current) => current.claims,
            Err(reload) => {
                log_reload_failure(&reload);
                Vec::new()
            }
        };
        ActionOutcome::page_with_errors(
            View::EditUser(EditUserView {
                id: user_id.to_string(),
                form,
                claims,
            }),
            err.messages(),
        )
    }

    pub async fn delete_user(&self, user_id: &str) -> ActionOutcome {
        match self.workflow.delete_user(user_id).await {
            Ok(()) => ActionOutcome::Redirect(Redirect::UserManagement),
            Err(err) => self.listing(EntityKind::User, err.messages()).await,
        }
    }

    // ─── Roles ───

    pub async fn role_management(&self) -> ActionOutcome {
        self.listing(EntityKind::Role, Vec::new()).await
    }

    pub fn add_role_page(&self) -> ActionOutcome {
        ActionOutcome::page(View::AddRole {
            form: RoleForm::default(),
        })
    }

    pub async fn add_role(&self, form: RoleForm) -> ActionOutcome {
        match self.workflow.create_role(&form).await {
            Ok(_) => ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => ActionOutcome::page_with_errors(View::AddRole { form }, err.messages()),
        }
    }

    pub async fn edit_role_page(&self, role_id: &str) -> ActionOutcome {
        match self.workflow.load_role(role_id).await {
            Ok(view) => ActionOutcome::page(View::EditRole(view)),
            Err(err) if err.is_not_found() => ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => self.listing(EntityKind::Role, err.messages()).await,
        }
    }

    pub async fn edit_role(&self, role_id: &str, form: RoleForm) -> ActionOutcome {
        let err = match self.workflow.edit_role(role_id, &form).await {
            Ok(_) => return ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) if err.is_not_found() => {
                return ActionOutcome::Redirect(Redirect::RoleManagement)
            }
            Err(err) => err,
        };

        let (users, claims) = match self.workflow.load_role(role_id).await {
            Ok(current) => (current.users, current.claims),
            Err(reload) => {
                log_reload_failure(&reload);
                (Vec::new(), Vec::new())
            }
        };
        ActionOutcome::page_with_errors(
            View::EditRole(EditRoleView {
                id: role_id.to_string(),
                role_name: form.role_name,
                users,
                claims,
            }),
            err.messages(),
        )
    }

    pub async fn delete_role(&self, role_id: &str) -> ActionOutcome {
        match self.workflow.delete_role(role_id).await {
            Ok(()) => ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => self.listing(EntityKind::Role, err.messages()).await,
        }
    }

    // ─── Claims ───

    pub async fn manage_claims_for_user(&self, user_id: &str) -> ActionOutcome {
        self.manage_claims(ClaimOwner::User, user_id).await
    }

    pub async fn add_claim_for_user(&self, user_id: &str, form: ClaimForm) -> ActionOutcome {
        let result = self.workflow.add_claim(ClaimOwner::User, user_id, &form).await;
        self.after_claim_change(ClaimOwner::User, user_id, result.map(|_| ())).await
    }

    pub async fn remove_claim_from_user(&self, user_id: &str, form: ClaimForm) -> ActionOutcome {
        let result = self.workflow.remove_claim(ClaimOwner::User, user_id, &form).await;
        self.after_claim_change(ClaimOwner::User, user_id, result.map(|_| ())).await
    }

    pub async fn manage_claims_for_role(&self, role_id: &str) -> ActionOutcome {
        self.manage_claims(ClaimOwner::Role, role_id).await
    }

    pub async fn add_claim_for_role(&self, role_id: &str, form: ClaimForm) -> ActionOutcome {
        let result = self.workflow.add_claim(ClaimOwner::Role, role_id, &form).await;
        self.after_claim_change(ClaimOwner::Role, role_id, result.map(|_| ())).await
    }

    pub async fn remove_claim_from_role(&self, role_id: &str, form: ClaimForm) -> ActionOutcome {
        let result = self.workflow.remove_claim(ClaimOwner::Role, role_id, &form).await;
        self.after_claim_change(ClaimOwner::Role, role_id, result.map(|_| ())).await
    }

    async fn manage_claims(&self, owner: ClaimOwner, id: &str) -> ActionOutcome {
        match self.workflow.claims_view(owner, id).await {
            Ok(view) => ActionOutcome::page(claims_screen(owner, view)),
            Err(err) if err.is_not_found() => ActionOutcome::Redirect(listing_of(owner.kind())),
            Err(err) => self.listing(owner.kind(), err.messages()).await,
        }
    }

    async fn after_claim_change(
        &self,
        owner: ClaimOwner,
        id: &str,
        result: Result<(), AdminError>,
    ) -> ActionOutcome {
        let err = match result {
            Ok(()) => return ActionOutcome::Redirect(listing_of(owner.kind())),
            Err(err) if err.is_not_found() => {
                return ActionOutcome::Redirect(listing_of(owner.kind()))
            }
            Err(err) => err,
        };

        match self.workflow.claims_view(owner, id).await {
            Ok(view) => ActionOutcome::page_with_errors(claims_screen(owner, view), err.messages()),
            Err(reload) => {
                log_reload_failure(&reload);
                self.listing(owner.kind(), err.messages()).await
            }
        }
    }

    // ─── Membership ───

    pub async fn add_user_to_role_page(&self, role_id: &str) -> ActionOutcome {
        match self.workflow.candidate_users(role_id).await {
            Ok(view) => ActionOutcome::page(View::AddUserToRole(view)),
            Err(err) if err.is_not_found() => ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => self.listing(EntityKind::Role, err.messages()).await,
        }
    }

    pub async fn add_user_to_role(&self, role_id: &str, form: UserRoleForm) -> ActionOutcome {
        let result = self.workflow.add_user_to_role(role_id, &form).await;
        self.after_membership_change(role_id, result, true).await
    }

    pub async fn remove_user_from_role_page(&self, role_id: &str) -> ActionOutcome {
        match self.workflow.member_users(role_id).await {
            Ok(view) => ActionOutcome::page(View::DeleteUserFromRole(view)),
            Err(err) if err.is_not_found() => ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => self.listing(EntityKind::Role, err.messages()).await,
        }
    }

    pub async fn remove_user_from_role(&self, role_id: &str, form: UserRoleForm) -> ActionOutcome {
        let result = self.workflow.remove_user_from_role(role_id, &form).await;
        self.after_membership_change(role_id, result, false).await
    }

    async fn after_membership_change(
        &self,
        role_id: &str,
        result: Result<(), AdminError>,
        adding: bool,
    ) -> ActionOutcome {
        let err = match result {
            Ok(()) => return ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(AdminError::NotFound {
                kind: EntityKind::Role,
                ..
            }) => return ActionOutcome::Redirect(Redirect::RoleManagement),
            Err(err) => err,
        };

        let reloaded = if adding {
            self.workflow.candidate_users(role_id).await.map(View::AddUserToRole)
        } else {
            self.workflow.member_users(role_id).await.map(View::DeleteUserFromRole)
        };
        match reloaded {
            Ok(view) => ActionOutcome::page_with_errors(view, err.messages()),
            Err(reload) => {
                log_reload_failure(&reload);
                self.listing(EntityKind::Role, err.messages()).await
            }
        }
    }

    // ─── Helpers ───

    /// Render a listing page; if the listing itself cannot be loaded, an
    /// empty one carrying the extra messages
    async fn listing(&self, kind: EntityKind, mut errors: Vec<String>) -> ActionOutcome {
        let view = match kind {
            EntityKind::User => self
                .workflow
                .list_users()
                .await
                .map(|users| View::UserManagement { users })
                .unwrap_or_else(|err| {
                    errors.extend(err.messages());
                    View::UserManagement { users: Vec::new() }
                }),
            EntityKind::Role => self
                .workflow
                .list_roles()
                .await
                .map(|roles| View::RoleManagement { roles })
                .unwrap_or_else(|err| {
                    errors.extend(err.messages());
                    View::RoleManagement { roles: Vec::new() }
                }),
        };
        ActionOutcome::page_with_errors(view, errors)
    }
}

fn listing_of(kind: EntityKind) -> Redirect {
    match kind {
        EntityKind::User => Redirect::UserManagement,
        EntityKind::Role => Redirect::RoleManagement,
    }
}

fn claims_screen(owner: ClaimOwner, view: super::views::ClaimsView) -> View {
    match owner {
        ClaimOwner::User => View::ManageClaimsForUser(view),
        ClaimOwner::Role => View::ManageClaimsForRole(view),
    }
}

fn log_reload_failure(err: &AdminError) {
    warn!(error = %err, "Could not reload state for re-render");
}
