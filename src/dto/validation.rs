//! Validation helpers for DTOs.

use validator::ValidationError;

use crate::state::score::{is_valid_name, is_valid_score};

/// Validates that a submitted player name has at least one visible character.
///
/// Over-long names are not an error; they are truncated when the score is recorded.
pub fn validate_player_name(name: &str) -> Result<(), ValidationError> {
    if !is_valid_name(name) {
        let mut err = ValidationError::new("name_required");
        err.message = Some("Name is required".into());
        return Err(err);
    }

    Ok(())
}

/// Validates that a submitted score is not negative.
pub fn validate_score(score: i32) -> Result<(), ValidationError> {
    if !is_valid_score(score) {
        let mut err = ValidationError::new("score_range");
        err.message = Some("Invalid score".into());
        return Err(err);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_player_name() {
        assert!(validate_player_name("Ann").is_ok());
        assert!(validate_player_name("  Ann  ").is_ok());
        assert!(validate_player_name("abcdefghijklmnopqrstuvwxyz").is_ok()); // truncated later
        assert!(validate_player_name("").is_err());
        assert!(validate_player_name("   ").is_err());
    }

    #[test]
    fn test_validate_score() {
        assert!(validate_score(0).is_ok());
        assert!(validate_score(i32::MAX).is_ok());
        let err = validate_score(-1).unwrap_err();
        assert_eq!(err.code, "score_range");
    }
}
