//! Student field rules.

use crate::error::CoreError;

pub const GENDER_MALE: &str = "male";
pub const GENDER_FEMALE: &str = "female";

/// All valid genders.
pub const VALID_GENDERS: &[&str] = &[GENDER_MALE, GENDER_FEMALE];

/// Validate that a gender string is one of the recorded values.
pub fn validate_gender(gender: &str) -> Result<(), CoreError> {
    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Unknown gender: '{gender}'. Valid values: {}",
            VALID_GENDERS.join(", ")
        )))
    }
}
