//! Input validation.

use validator::ValidateEmail;

/// Syntactic email check. Malformed input is simply `false`.
pub fn valid_email(email: &str) -> bool {
  email.validate_email()
}
