//! The `User` entity and its validated candidate form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::validation::validate_user;

/// Surrogate key assigned by the store.
pub type UserId = i64;

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub age: i64,
}

/// A candidate that passed validation and may be written to the store.
///
/// Only constructible through [`NewUser::from_candidate`], so store write
/// paths never see unvalidated input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    name: String,
    email: String,
    age: i64,
}

impl NewUser {
    /// Validates a raw JSON candidate.
    ///
    /// # Errors
    ///
    /// Returns every violated rule, in rule order, when the candidate is not
    /// acceptable for persistence.
    pub fn from_candidate(candidate: &Value) -> Result<Self, Vec<String>> {
        let errors = validate_user(candidate);
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate_user guarantees these shapes.
        let name = candidate.get("name").and_then(Value::as_str);
        let email = candidate.get("email").and_then(Value::as_str);
        let age = candidate.get("age").and_then(Value::as_i64);

        match (name, email, age) {
            (Some(name), Some(email), Some(age)) => Ok(Self {
                name: name.to_string(),
                email: email.to_string(),
                age,
            }),
            _ => Err(vec!["Validation failed".to_string()]),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    /// Attaches a store-assigned id.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            age: self.age,
        }
    }
}
