use user_core::{validate_fields, Field, UserFields, UserPatch, UserPayload, Violations};

/// The six editable user fields plus their validation state
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    values: UserFields,
}

impl UserForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &UserFields {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        field.value(&self.values)
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::UserName => self.values.user_name = value,
            Field::FirstName => self.values.first_name = value,
            Field::LastName => self.values.last_name = value,
            Field::Email => self.values.email = value,
            Field::UserStatus => self.values.user_status = value,
            Field::Department => self.values.department = value,
        }
    }

    /// Overwrite the fields present in `patch`, leave the rest as they are
    pub fn patch(&mut self, patch: &UserPatch) {
        self.values.apply(patch);
    }

    pub fn violations(&self) -> Violations {
        validate_fields(&self.values)
    }

    pub fn is_valid(&self) -> bool {
        self.violations().is_empty()
    }

    /// The request body, or the violated constraints
    pub fn payload(&self) -> Result<UserPayload, Violations> {
        self.values.to_payload()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use user_core::{Rule, UserStatus};

    #[test]
    fn new_form_is_invalid() {
        let form = UserForm::new();
        assert!(!form.is_valid());
        assert_eq!(form.violations().len(), Field::ALL.len());
    }

    #[test]
    fn setting_every_field_makes_it_valid() {
        let mut form = UserForm::new();
        form.set(Field::UserName, "testuser");
        form.set(Field::FirstName, "Test");
        form.set(Field::LastName, "User");
        form.set(Field::Email, "testuser@example.com");
        form.set(Field::UserStatus, "I");
        form.set(Field::Department, "Engineering");

        assert!(form.is_valid());
        let payload = form.payload().unwrap();
        assert_eq!(payload.user_status, UserStatus::Inactive);
        assert_eq!(form.value(Field::Email), "testuser@example.com");
    }

    #[test]
    fn payload_reports_violations() {
        let mut form = UserForm::new();
        form.patch(&UserPatch {
            user_name: Some("x".to_string()),
            first_name: Some("X".to_string()),
            last_name: Some("Y".to_string()),
            email: Some("not-an-email".to_string()),
            user_status: Some("A".to_string()),
            department: Some("Ops".to_string()),
        });

        let violations = form.payload().unwrap_err();
        assert_eq!(violations.len(), 1);
        assert!(violations.contains(Field::Email, Rule::Email));
    }
}
