//! Identity domain types: User, Role, Claim
//!
//! Serializable, cloneable, and cheap to pass around.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Well-known claim types written by the back-office itself
pub mod claim_types {
    /// Date of birth, recorded whenever a user's birthdate is edited
    pub const DATE_OF_BIRTH: &str =
        "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/dateofbirth";
}

/// Format used for date-of-birth claim values
pub const BIRTHDATE_FORMAT: &str = "%Y-%m-%d";

/// User record as held by the identity store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub user_name: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub city: String,
    pub country: String,
}

impl User {
    /// Claim carrying this user's birthdate
    pub fn birthdate_claim(&self) -> Claim {
        Claim::new(
            claim_types::DATE_OF_BIRTH,
            self.birthdate.format(BIRTHDATE_FORMAT).to_string(),
        )
    }
}

/// Payload for creating a user; the store hashes `password`
#[derive(Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub birthdate: NaiveDate,
    pub city: String,
    pub country: String,
}

impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("user_name", &self.user_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("birthdate", &self.birthdate)
            .field("city", &self.city)
            .field("country", &self.country)
            .finish()
    }
}

/// Role record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: String,
    pub name: String,
}

/// A (type, value) attribute attached to a user or a role
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl Claim {
    pub fn new(claim_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            claim_type: claim_type.into(),
            value: value.into(),
        }
    }

    /// Claim whose value repeats its type, as the add-claim screens produce
    pub fn of_type(claim_type: impl Into<String>) -> Self {
        let claim_type = claim_type.into();
        Self {
            value: claim_type.clone(),
            claim_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "u1".into(),
            user_name: "alice".into(),
            email: "alice@example.com".into(),
            birthdate: NaiveDate::from_ymd_opt(1990, 4, 2).unwrap(),
            city: "Brussels".into(),
            country: "Belgium".into(),
        }
    }

    #[test]
    fn test_birthdate_claim() {
        let claim = sample_user().birthdate_claim();
        assert_eq!(claim.claim_type, claim_types::DATE_OF_BIRTH);
        assert_eq!(claim.value, "1990-04-02");
    }

    #[test]
    fn test_claim_of_type_repeats_type() {
        let claim = Claim::of_type("CanEditPrices");
        assert_eq!(claim.value, "CanEditPrices");
    }

    #[test]
    fn test_claim_serialization() {
        let json = serde_json::to_string(&Claim::of_type("CanAddPie")).unwrap();
        assert_eq!(json, r#"{"type":"CanAddPie","value":"CanAddPie"}"#);
    }

    #[test]
    fn test_new_user_debug_hides_password() {
        let new_user = NewUser {
            user_name: "bob".into(),
            email: "bob@example.com".into(),
            password: "S3cret!pw".into(),
            birthdate: NaiveDate::from_ymd_opt(1985, 1, 1).unwrap(),
            city: String::new(),
            country: String::new(),
        };
        let rendered = format!("{new_user:?}");
        assert!(!rendered.contains("S3cret"));
    }
}
