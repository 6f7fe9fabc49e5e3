//! Field-level validation of user candidates
//!
//! Rules are checked independently and every violation is reported:
//! - `name` is a non-empty string
//! - `email` is a non-empty string containing `@`
//! - `age` is present and is a non-negative integer
//!
//! Validation is pure and deterministic. It never coerces types: `"30"` and
//! `30.0` are not integers.

use serde_json::Value;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";
pub const AGE_REQUIRED: &str = "Age is required";
pub const AGE_INVALID: &str = "Age must be a positive integer";

/// Validates a user candidate, returning every violated rule in rule order.
///
/// An empty result means the candidate may be persisted. A non-object
/// candidate fails every presence rule.
pub fn validate_user(candidate: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(error) = check_name(candidate.get("name")) {
        errors.push(error.to_string());
    }
    if let Some(error) = check_email(candidate.get("email")) {
        errors.push(error.to_string());
    }
    if let Some(error) = check_age(candidate.get("age")) {
        errors.push(error.to_string());
    }

    errors
}

fn check_name(name: Option<&Value>) -> Option<&'static str> {
    match name {
        Some(Value::String(s)) if !s.is_empty() => None,
        _ => Some(NAME_REQUIRED),
    }
}

fn check_email(email: Option<&Value>) -> Option<&'static str> {
    match email {
        None | Some(Value::Null) => Some(EMAIL_REQUIRED),
        Some(Value::String(s)) if s.is_empty() => Some(EMAIL_REQUIRED),
        Some(Value::String(s)) if s.contains('@') => None,
        Some(_) => Some(EMAIL_INVALID),
    }
}

fn check_age(age: Option<&Value>) -> Option<&'static str> {
    match age {
        None => Some(AGE_REQUIRED),
        Some(value) => match value.as_i64() {
            Some(age) if age >= 0 => None,
            _ => Some(AGE_INVALID),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_candidate_has_no_errors() {
        let candidate = json!({"name": "Ann", "email": "ann@x.com", "age": 30});
        assert!(validate_user(&candidate).is_empty());
    }

    #[test]
    fn test_zero_age_is_accepted() {
        let candidate = json!({"name": "Baby", "email": "baby@x.com", "age": 0});
        assert!(validate_user(&candidate).is_empty());
    }

    #[test]
    fn test_whitespace_name_is_accepted() {
        let candidate = json!({"name": " ", "email": "a@b", "age": 1});
        assert!(validate_user(&candidate).is_empty());
    }

    #[test]
    fn test_empty_object_reports_all_missing_fields() {
        assert_eq!(
            validate_user(&json!({})),
            vec![NAME_REQUIRED, EMAIL_REQUIRED, AGE_REQUIRED]
        );
    }

    #[test]
    fn test_errors_are_collected_not_short_circuited() {
        let candidate = json!({"name": "", "email": "no-at-sign", "age": -1});
        assert_eq!(
            validate_user(&candidate),
            vec![NAME_REQUIRED, EMAIL_INVALID, AGE_INVALID]
        );
    }

    #[test]
    fn test_null_fields() {
        let candidate = json!({"name": null, "email": null, "age": null});
        assert_eq!(
            validate_user(&candidate),
            vec![NAME_REQUIRED, EMAIL_REQUIRED, AGE_INVALID]
        );
    }

    #[test]
    fn test_email_presence_and_format_are_exclusive() {
        let errors = validate_user(&json!({"name": "Ann", "email": "", "age": 1}));
        assert_eq!(errors, vec![EMAIL_REQUIRED]);

        let errors = validate_user(&json!({"name": "Ann", "email": "ann.x.com", "age": 1}));
        assert_eq!(errors, vec![EMAIL_INVALID]);
    }

    #[test]
    fn test_non_string_email_is_invalid_format() {
        let errors = validate_user(&json!({"name": "Ann", "email": 42, "age": 1}));
        assert_eq!(errors, vec![EMAIL_INVALID]);
    }

    #[test]
    fn test_non_string_name_is_required_error() {
        let errors = validate_user(&json!({"name": 7, "email": "a@b", "age": 1}));
        assert_eq!(errors, vec![NAME_REQUIRED]);
    }

    #[test]
    fn test_age_type_is_not_coerced() {
        for age in [json!("30"), json!(30.0), json!(30.5), json!(true), json!([30])] {
            let errors = validate_user(&json!({"name": "Ann", "email": "a@b", "age": age}));
            assert_eq!(errors, vec![AGE_INVALID], "age = {}", age);
        }
    }

    #[test]
    fn test_age_beyond_i64_is_rejected() {
        let errors = validate_user(&json!({"name": "Ann", "email": "a@b", "age": u64::MAX}));
        assert_eq!(errors, vec![AGE_INVALID]);
    }

    #[test]
    fn test_non_object_candidate_fails_presence_rules() {
        assert_eq!(validate_user(&json!([1, 2, 3])).len(), 3);
    }

    #[test]
    fn test_validation_is_deterministic() {
        let candidate = json!({"name": "", "email": "x", "age": -5});
        let first = validate_user(&candidate);
        for _ in 0..100 {
            assert_eq!(validate_user(&candidate), first);
        }
    }
}
