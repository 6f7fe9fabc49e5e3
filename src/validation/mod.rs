//! Candidate validation.
//!
//! Validation occurs before any storage access; invalid candidates never
//! reach the store.

mod validator;

pub use validator::{
    validate_user, AGE_INVALID, AGE_REQUIRED, EMAIL_INVALID, EMAIL_REQUIRED, NAME_REQUIRED,
};
