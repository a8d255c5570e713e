//! Teacher account rules.

use crate::error::CoreError;

pub const SCHOOL_TYPE_PRIMARY: &str = "primary";
pub const SCHOOL_TYPE_INTERMEDIATE: &str = "intermediate";
pub const SCHOOL_TYPE_SECONDARY: &str = "secondary";

/// All valid school types.
pub const VALID_SCHOOL_TYPES: &[&str] = &[
    SCHOOL_TYPE_PRIMARY,
    SCHOOL_TYPE_INTERMEDIATE,
    SCHOOL_TYPE_SECONDARY,
];

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate that a school type string is one of the known types.
pub fn validate_school_type(school_type: &str) -> Result<(), CoreError> {
    if VALID_SCHOOL_TYPES.contains(&school_type) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown school type: '{school_type}'. Valid types: {}",
            VALID_SCHOOL_TYPES.join(", ")
        )))
    }
}
