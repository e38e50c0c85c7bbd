//! View-models handed to the presentation layer

use serde::Serialize;

use crate::identity::types::{Claim, Role, User, BIRTHDATE_FORMAT};

use super::forms::{AddUserForm, EditUserForm, RoleForm};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditUserView {
    pub id: String,
    pub form: EditUserForm,
    pub claims: Vec<Claim>,
}

impl EditUserView {
    pub fn from_user(user: &User, claims: Vec<Claim>) -> Self {
        Self {
            id: user.id.clone(),
            form: EditUserForm {
                user_name: user.user_name.clone(),
                email: user.email.clone(),
                birthdate: user.birthdate.format(BIRTHDATE_FORMAT).to_string(),
                city: user.city.clone(),
                country: user.country.clone(),
            },
            claims,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRoleView {
    pub id: String,
    pub role_name: String,
    /// User names of the role's members
    pub users: Vec<String>,
    pub claims: Vec<Claim>,
}

/// Claims of one user or role, plus the catalog to pick new ones from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimsView {
    pub id: String,
    pub name: String,
    pub claims: Vec<Claim>,
    pub all_claims: Vec<String>,
}

/// Users offered for adding to (or removing from) a role
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRoleView {
    pub role_id: String,
    pub role_name: String,
    pub users: Vec<User>,
}

/// Every screen the back-office can render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    UserManagement { users: Vec<User> },
    AddUser { form: AddUserForm },
    EditUser(EditUserView),
    RoleManagement { roles: Vec<Role> },
    AddRole { form: RoleForm },
    EditRole(EditRoleView),
    ManageClaimsForUser(ClaimsView),
    ManageClaimsForRole(ClaimsView),
    AddUserToRole(UserRoleView),
    DeleteUserFromRole(UserRoleView),
    ClaimCatalog { claims: Vec<String> },
}

/// A rendered screen plus the form-level messages to show on it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    #[serde(flatten)]
    pub view: View,
    pub errors: Vec<String>,
}

impl Page {
    pub fn new(view: View) -> Self {
        Self {
            view,
            errors: Vec::new(),
        }
    }

    pub fn with_errors(view: View, errors: Vec<String>) -> Self {
        Self { view, errors }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Listing a successful action sends the browser back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Redirect {
    UserManagement,
    RoleManagement,
}

impl Redirect {
    pub fn action_name(&self) -> &'static str {
        match self {
            Self::UserManagement => "UserManagement",
            Self::RoleManagement => "RoleManagement",
        }
    }
}

/// Result of one controller action
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    Redirect(Redirect),
    Render(Page),
}

impl ActionOutcome {
    pub fn page(view: View) -> Self {
        Self::Render(Page::new(view))
    }

    pub fn page_with_errors(view: View, errors: Vec<String>) -> Self {
        Self::Render(Page::with_errors(view, errors))
    }

    pub fn as_page(&self) -> Option<&Page> {
        match self {
            Self::Render(page) => Some(page),
            Self::Redirect(_) => None,
        }
    }

    pub fn redirect_target(&self) -> Option<Redirect> {
        match self {
            Self::Redirect(target) => Some(*target),
            Self::Render(_) => None,
        }
    }
}
