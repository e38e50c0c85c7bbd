//! Form submissions and their validation
//!
//! Forms hold raw strings exactly as submitted so a failed submission can be
//! re-rendered verbatim. `validate` trims, checks, and produces typed values;
//! it never touches the store.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::claims::ClaimCatalog;
use crate::identity::types::{NewUser, BIRTHDATE_FORMAT};

use super::error::AdminError;

/// Add-user form
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddUserForm {
    pub user_name: String,
    pub email: String,
    /// Never echoed back when the form is re-rendered
    #[serde(skip_serializing)]
    pub password: String,
    pub birthdate: String,
    pub city: String,
    pub country: String,
}

impl std::fmt::Debug for AddUserForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AddUserForm")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("birthdate", &self.birthdate)
            .field("city", &self.city)
            .field("country", &self.country)
            .finish()
    }
}

impl AddUserForm {
    pub fn validate(&self, today: NaiveDate) -> Result<NewUser, AdminError> {
        let mut errors = Vec::new();
        let profile = check_profile(
            &self.user_name,
            &self.email,
            &self.birthdate,
            today,
            &mut errors,
        );
        if self.password.is_empty() {
            errors.push("Please enter a password".into());
        }

        match profile {
            Some(birthdate) if errors.is_empty() => Ok(NewUser {
                user_name: self.user_name.trim().to_string(),
                email: self.email.trim().to_string(),
                password: self.password.clone(),
                birthdate,
                city: self.city.trim().to_string(),
                country: self.country.trim().to_string(),
            }),
            _ => Err(AdminError::Validation(errors)),
        }
    }

    /// Copy of the form safe to send back to the browser
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }
}

/// Edit-user form; the user id comes from the route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditUserForm {
    pub user_name: String,
    pub email: String,
    pub birthdate: String,
    pub city: String,
    pub country: String,
}

/// Validated, trimmed edit-user values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFields {
    pub user_name: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub city: String,
    pub country: String,
}

impl EditUserForm {
    pub fn validate(&self, today: NaiveDate) -> Result<UserFields, AdminError> {
        let mut errors = Vec::new();
        let birthdate = check_profile(
            &self.user_name,
            &self.email,
            &self.birthdate,
            today,
            &mut errors,
        );
        match birthdate {
            Some(birthdate) if errors.is_empty() => Ok(UserFields {
                user_name: self.user_name.trim().to_string(),
                email: self.email.trim().to_string(),
                birthdate,
                city: self.city.trim().to_string(),
                country: self.country.trim().to_string(),
            }),
            _ => Err(AdminError::Validation(errors)),
        }
    }
}

/// Add-role and edit-role form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleForm {
    pub role_name: String,
}

impl RoleForm {
    pub fn validate(&self) -> Result<String, AdminError> {
        non_blank(&self.role_name, "Please enter the role name")
    }
}

/// Add-claim / remove-claim form. Only the type is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClaimForm {
    pub claim_type: String,
}

impl ClaimForm {
    /// Validation for adding: the type must come from the catalog
    pub fn validate_for_add(&self, catalog: &ClaimCatalog) -> Result<String, AdminError> {
        let claim_type = self.validate()?;
        if !catalog.contains(&claim_type) {
            return Err(AdminError::validation(format!(
                "'{claim_type}' is not a recognised claim type"
            )));
        }
        Ok(claim_type)
    }

    pub fn validate(&self) -> Result<String, AdminError> {
        non_blank(&self.claim_type, "Please select a claim")
    }
}

/// Add-user-to-role / remove-user-from-role form; the role id comes from the route
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRoleForm {
    pub user_id: String,
}

impl UserRoleForm {
    pub fn validate(&self) -> Result<String, AdminError> {
        non_blank(&self.user_id, "Please select a user")
    }
}

fn non_blank(value: &str, message: &str) -> Result<String, AdminError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminError::validation(message));
    }
    Ok(trimmed.to_string())
}

/// Shared user-profile checks; pushes messages and returns the parsed birthdate
fn check_profile(
    user_name: &str,
    email: &str,
    birthdate: &str,
    today: NaiveDate,
    errors: &mut Vec<String>,
) -> Option<NaiveDate> {
    if user_name.trim().is_empty() {
        errors.push("Please enter the user name".into());
    }

    let email = email.trim();
    if email.is_empty() {
        errors.push("Please enter the email address".into());
    } else if !email.contains('@') {
        errors.push("Please enter a valid email address".into());
    }

    let birthdate = birthdate.trim();
    if birthdate.is_empty() {
        errors.push("Please enter the birth date".into());
        return None;
    }
    match NaiveDate::parse_from_str(birthdate, BIRTHDATE_FORMAT) {
        Ok(date) if date > today => {
            errors.push("Birth date cannot be in the future".into());
            None
        }
        Ok(date) => Some(date),
        Err(_) => {
            errors.push("Please enter a valid birth date (YYYY-MM-DD)".into());
            None
        }
    }
}
