//! Signup domain models.
//!
//! `DraftProfile` is what the screen edits; `UserRecord` is what ends up in
//! the profile store once an account exists.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier issued by the authentication service for a new account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("unknown gender '{}', expected 'male' or 'female'", other)),
        }
    }
}

/// The field set the user edits before submitting.
///
/// Lives only as long as the screen; it is reset after a successful
/// submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftProfile {
    pub lastname: String,
    pub firstname: String,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl DraftProfile {
    /// Builds the profile document persisted for a newly created account.
    ///
    /// Password fields are not part of the record.
    pub fn to_user_record(&self) -> UserRecord {
        UserRecord {
            lastname: self.lastname.clone(),
            firstname: self.firstname.clone(),
            email: self.email.clone(),
            birthdate: self.birthdate,
            gender: self.gender,
        }
    }
}

/// Profile document stored under the account's identifier.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub lastname: String,
    pub firstname: String,
    pub email: String,
    pub birthdate: NaiveDate,
    pub gender: Gender,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_record_copies_profile_fields() {
        let draft = DraftProfile {
            lastname: "Lovelace".to_string(),
            firstname: "Ada".to_string(),
            gender: Gender::Female,
            birthdate: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
            email: "ada@example.com".to_string(),
            password: "Analytical1".to_string(),
            confirm_password: "Analytical1".to_string(),
        };

        let record = draft.to_user_record();
        assert_eq!(record.lastname, "Lovelace");
        assert_eq!(record.firstname, "Ada");
        assert_eq!(record.email, "ada@example.com");
        assert_eq!(record.birthdate, draft.birthdate);
        assert_eq!(record.gender, Gender::Female);
    }

    #[test]
    fn test_user_record_json_shape() {
        let record = UserRecord {
            lastname: "Hopper".to_string(),
            firstname: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            birthdate: NaiveDate::from_ymd_opt(1906, 12, 9).unwrap(),
            gender: Gender::Female,
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["birthdate"], "1906-12-09");
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_gender_from_str() {
        assert_eq!("Male".parse::<Gender>().unwrap(), Gender::Male);
        assert_eq!(" female ".parse::<Gender>().unwrap(), Gender::Female);
        assert!("other".parse::<Gender>().is_err());
    }

    #[test]
    fn test_account_id_is_transparent() {
        let id = AccountId::new("uid-42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-42\"");
        assert_eq!(id.to_string(), "uid-42");
    }
}
