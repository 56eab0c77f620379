use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::validation::{self, Violations};

/// A user record as returned by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned ID
    pub user_id: i64,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_status: UserStatus,
    pub department: String,
}

/// Account status. Serialized as its single-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "I")]
    Inactive,
    #[serde(rename = "T")]
    Terminated,
}

impl UserStatus {
    pub const ALL: [UserStatus; 3] = [
        UserStatus::Active,
        UserStatus::Inactive,
        UserStatus::Terminated,
    ];

    /// Wire code ("A", "I" or "T")
    pub fn code(&self) -> &'static str {
        match self {
            UserStatus::Active => "A",
            UserStatus::Inactive => "I",
            UserStatus::Terminated => "T",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Terminated => "Terminated",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for UserStatus {
    type Err = String;

    /// Accepts only the exact codes, matching what the form validator allows
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserStatus::ALL
            .into_iter()
            .find(|status| status.code() == s)
            .ok_or_else(|| format!("invalid user status '{}' (expected A, I or T)", s))
    }
}

/// Body of a create or update request: the editable fields of a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_status: UserStatus,
    pub department: String,
}

impl From<&User> for UserPayload {
    fn from(user: &User) -> Self {
        Self {
            user_name: user.user_name.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            user_status: user.user_status,
            department: user.department.clone(),
        }
    }
}

/// Raw form values. Unlike [`UserPayload`] these may be invalid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub user_status: String,
    pub department: String,
}

impl UserFields {
    /// Validate and convert into a typed request body
    pub fn to_payload(&self) -> Result<UserPayload, Violations> {
        let violations = validation::validate_fields(self);
        if !violations.is_empty() {
            return Err(violations);
        }

        // Validation guarantees the status is one of the known codes
        let user_status = self.user_status.parse().map_err(|_| violations_for_status())?;

        Ok(UserPayload {
            user_name: self.user_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            user_status,
            department: self.department.clone(),
        })
    }

    /// Overwrite only the fields present in `patch`
    pub fn apply(&mut self, patch: &UserPatch) {
        if let Some(v) = &patch.user_name {
            self.user_name = v.clone();
        }
        if let Some(v) = &patch.first_name {
            self.first_name = v.clone();
        }
        if let Some(v) = &patch.last_name {
            self.last_name = v.clone();
        }
        if let Some(v) = &patch.email {
            self.email = v.clone();
        }
        if let Some(v) = &patch.user_status {
            self.user_status = v.clone();
        }
        if let Some(v) = &patch.department {
            self.department = v.clone();
        }
    }
}

fn violations_for_status() -> Violations {
    let mut violations = Violations::default();
    violations.insert(validation::Violation {
        field: validation::Field::UserStatus,
        rule: validation::Rule::Pattern,
    });
    violations
}

impl From<&UserPayload> for UserFields {
    fn from(payload: &UserPayload) -> Self {
        Self {
            user_name: payload.user_name.clone(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            email: payload.email.clone(),
            user_status: payload.user_status.code().to_string(),
            department: payload.department.clone(),
        }
    }
}

/// Partial set of form values; `None` leaves the form field untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl UserPatch {
    pub fn is_empty(&self) -> bool {
        self == &UserPatch::default()
    }
}

impl From<&User> for UserPatch {
    fn from(user: &User) -> Self {
        Self {
            user_name: Some(user.user_name.clone()),
            first_name: Some(user.first_name.clone()),
            last_name: Some(user.last_name.clone()),
            email: Some(user.email.clone()),
            user_status: Some(user.user_status.code().to_string()),
            department: Some(user.department.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_user() -> User {
        User {
            user_id: 100,
            user_name: "testuser1".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: "testuser1@example.com".to_string(),
            user_status: UserStatus::Active,
            department: "Engineering".to_string(),
        }
    }

    #[test]
    fn user_uses_snake_case_wire_names() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert_eq!(
            value,
            json!({
                "user_id": 100,
                "user_name": "testuser1",
                "first_name": "Test",
                "last_name": "User",
                "email": "testuser1@example.com",
                "user_status": "A",
                "department": "Engineering"
            })
        );
    }

    #[test]
    fn payload_has_no_user_id() {
        let payload = UserPayload::from(&sample_user());
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("user_id").is_none());
        assert_eq!(value["user_status"], "A");
    }

    #[test]
    fn unknown_status_is_rejected_when_decoding() {
        let result: std::result::Result<UserStatus, _> = serde_json::from_str("\"X\"");
        assert!(result.is_err());
        let status: UserStatus = serde_json::from_str("\"T\"").unwrap();
        assert_eq!(status, UserStatus::Terminated);
    }

    #[test]
    fn status_parse_is_exact() {
        assert_eq!("I".parse::<UserStatus>().unwrap(), UserStatus::Inactive);
        assert!("a".parse::<UserStatus>().is_err());
        assert!("AI".parse::<UserStatus>().is_err());
        assert!("".parse::<UserStatus>().is_err());
    }

    #[test]
    fn apply_patch_leaves_absent_fields_untouched() {
        let mut fields = UserFields {
            user_name: "old".to_string(),
            department: "Sales".to_string(),
            ..Default::default()
        };
        let patch = UserPatch {
            user_name: Some("x".to_string()),
            email: Some("x@example.com".to_string()),
            ..Default::default()
        };

        fields.apply(&patch);

        assert_eq!(fields.user_name, "x");
        assert_eq!(fields.email, "x@example.com");
        assert_eq!(fields.department, "Sales");
        assert_eq!(fields.first_name, "");
    }

    #[test]
    fn to_payload_converts_valid_fields() {
        let fields = UserFields::from(&UserPayload::from(&sample_user()));
        let payload = fields.to_payload().unwrap();
        assert_eq!(payload.user_status, UserStatus::Active);
        assert_eq!(payload.user_name, "testuser1");
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch::from(&sample_user()).is_empty());
    }
}
