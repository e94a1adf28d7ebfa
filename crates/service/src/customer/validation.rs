use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::domain::CustomerInput;

/// Column width of `customer.name` and `customer.email`.
pub const MAX_FIELD_LEN: usize = 255;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)+$",
    )
    .expect("email pattern compiles")
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

/// Every field that failed, in declaration order (`name` before `email`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> &[FieldError] { &self.0 }

    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| format!("{}: {}", e.field, e.message)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

pub fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        return Some(FieldError::new("name", "must not be blank"));
    }
    if name.chars().count() > MAX_FIELD_LEN {
        return Some(FieldError::new("name", format!("must be at most {MAX_FIELD_LEN} characters")));
    }
    None
}

pub fn validate_email(email: &str) -> Option<FieldError> {
    if email.trim().is_empty() {
        return Some(FieldError::new("email", "must not be blank"));
    }
    if email.chars().count() > MAX_FIELD_LEN {
        return Some(FieldError::new("email", format!("must be at most {MAX_FIELD_LEN} characters")));
    }
    if !EMAIL_RE.is_match(email) {
        return Some(FieldError::new("email", "must be a well-formed email address"));
    }
    None
}

/// Shared by create and update.
pub fn validate_customer(input: &CustomerInput) -> Result<(), ValidationErrors> {
    let errors: Vec<FieldError> = [validate_name(&input.name), validate_email(&input.email)]
        .into_iter()
        .flatten()
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_customer() {
        let input = CustomerInput::new("John Doe", "john@example.com");
        assert!(validate_customer(&input).is_ok());
    }

    #[test]
    fn reports_both_fields_for_empty_name_and_bad_email() {
        let err = validate_customer(&CustomerInput::new("", "bad")).unwrap_err();
        assert_eq!(err.fields().len(), 2);
        assert_eq!(err.fields()[0].field, "name");
        assert_eq!(err.fields()[1].field, "email");
        assert_eq!(err.to_string(), "name: must not be blank; email: must be a well-formed email address");
    }

    #[test]
    fn blank_name_is_rejected() {
        assert!(validate_name("   ").is_some());
        assert!(validate_name("Jane").is_none());
    }

    #[test]
    fn overlong_fields_are_rejected() {
        let long = "a".repeat(MAX_FIELD_LEN + 1);
        assert!(validate_name(&long).is_some());
        let email = format!("{}@example.com", "a".repeat(MAX_FIELD_LEN));
        assert!(validate_email(&email).is_some());
    }

    #[test]
    fn email_syntax() {
        for ok in ["john@example.com", "john.doe+tag@mail.example.co.uk", "a_b%c@x-y.io"] {
            assert!(validate_email(ok).is_none(), "{ok} should be valid");
        }
        for bad in ["bad", "a@b", "@example.com", "john@", "john @example.com", "john@-example.com", "john@example..com", ""] {
            assert!(validate_email(bad).is_some(), "{bad} should be invalid");
        }
    }

    #[test]
    fn missing_email_reports_blank() {
        let err = validate_customer(&CustomerInput::new("Jane", "")).unwrap_err();
        assert!(err.has_field("email"));
        assert!(!err.has_field("name"));
        assert_eq!(err.fields()[0].message, "must not be blank");
    }
}
