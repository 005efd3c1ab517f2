// Simulated login gate. Credentials are checked for shape only; nothing is
// authenticated.

use tracing::{debug, info};

use crate::config::CredentialPolicy;
use crate::error::ValidationError;
use crate::notifier::Notification;
use crate::state::{Overlay, UiState};

pub const WELCOME_MESSAGE: &str = "Welcome! You can now book your stay.";
pub const LOGGED_OUT_MESSAGE: &str = "You have been logged out.";

// Lengths count UTF-16 code units, matching the browser's `value.length`
fn input_len(input: &str) -> usize {
    input.encode_utf16().count()
}

// Coarse check: '@' and '.' present and a minimum length. Not RFC 5322.
pub fn validate_email(email: &str, policy: &CredentialPolicy) -> Result<(), ValidationError> {
    if !email.contains('@') || !email.contains('.') || input_len(email) < policy.min_email_len {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str, policy: &CredentialPolicy) -> Result<(), ValidationError> {
    if input_len(password) < policy.min_password_len {
        return Err(ValidationError::WeakPassword {
            min_len: policy.min_password_len,
        });
    }
    Ok(())
}

// Email first, then password; only the first failure is reported
pub fn validate_credentials(
    email: &str,
    password: &str,
    policy: &CredentialPolicy,
) -> Result<(), ValidationError> {
    validate_email(email, policy)?;
    validate_password(password, policy)
}

pub struct SessionGate<'a> {
    policy: &'a CredentialPolicy,
}

impl<'a> SessionGate<'a> {
    pub fn new(policy: &'a CredentialPolicy) -> Self {
        Self { policy }
    }

    pub fn login(
        &self,
        state: &mut UiState,
        email: &str,
        password: &str,
    ) -> Result<Notification, ValidationError> {
        state.login.error = None;

        if let Err(e) = validate_credentials(email, password, self.policy) {
            debug!("Login rejected: {:?}", e);
            state.login.error = Some(e.clone());
            return Err(e);
        }

        state.set_logged_in(true);
        state.set_overlay(Overlay::Login, false);
        info!("User logged in");
        Ok(Notification::success(WELCOME_MESSAGE))
    }

    // No-op while logged out
    pub fn logout(&self, state: &mut UiState) -> Option<Notification> {
        if !state.session.is_logged_in {
            return None;
        }

        state.set_logged_in(false);
        state.set_overlay(Overlay::Login, false);
        info!("User logged out");
        Some(Notification::warning(LOGGED_OUT_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifier::Severity;
    use test_case::test_case;

    #[test_case("bad-email", "longenough1", Err(ValidationError::InvalidEmail); "no at sign")]
    #[test_case("user@example", "longenough1", Err(ValidationError::InvalidEmail); "no dot")]
    #[test_case("a@.b", "longenough1", Err(ValidationError::InvalidEmail); "too short")]
    #[test_case("a@b.c", "longenough1", Ok(()); "minimum length")]
    #[test_case("user@example.com", "short", Err(ValidationError::WeakPassword { min_len: 8 }); "weak password")]
    #[test_case("bad-email", "short", Err(ValidationError::InvalidEmail); "email checked first")]
    #[test_case("user@example.com", "12345678", Ok(()); "exact password length")]
    #[test_case("user@example.com", "longenough1", Ok(()); "valid")]
    #[test_case("a@.\u{1F600}", "longenough1", Ok(()); "astral char counts twice in email")]
    #[test_case("user@example.com", "123456\u{1F600}", Ok(()); "astral char counts twice in password")]
    #[test_case("user@example.com", "12345\u{1F600}", Err(ValidationError::WeakPassword { min_len: 8 }); "astral char still short")]
    fn test_validate_credentials(email: &str, password: &str, expected: Result<(), ValidationError>) {
        let policy = CredentialPolicy::default();
        assert_eq!(validate_credentials(email, password, &policy), expected);
    }

    #[test]
    fn test_login_success_updates_state() {
        let policy = CredentialPolicy::default();
        let gate = SessionGate::new(&policy);
        let mut state = UiState::new();
        state.set_overlay(Overlay::Login, true);
        state.login.error = Some(ValidationError::InvalidEmail);

        let notification = gate
            .login(&mut state, "user@example.com", "longenough1")
            .unwrap();

        assert!(state.session.is_logged_in);
        assert!(state.session_view().booking_form_visible);
        assert!(!state.login_overlay_visible);
        assert!(state.login.error.is_none());
        assert_eq!(notification.severity, Severity::Success);
    }

    #[test]
    fn test_login_failure_keeps_overlay_open() {
        let policy = CredentialPolicy::default();
        let gate = SessionGate::new(&policy);
        let mut state = UiState::new();
        state.set_overlay(Overlay::Login, true);

        let result = gate.login(&mut state, "user@example.com", "short");

        assert!(result.is_err());
        assert!(!state.session.is_logged_in);
        assert!(state.login_overlay_visible);
        assert_eq!(
            state.login.error.as_ref().map(|e| e.to_string()),
            Some("Password must be at least 8 characters long.".to_string())
        );
    }

    #[test]
    fn test_logout_only_when_logged_in() {
        let policy = CredentialPolicy::default();
        let gate = SessionGate::new(&policy);
        let mut state = UiState::new();

        assert!(gate.logout(&mut state).is_none());

        gate.login(&mut state, "user@example.com", "longenough1")
            .unwrap();
        let notification = gate.logout(&mut state).unwrap();

        assert_eq!(notification.severity, Severity::Warning);
        assert!(!state.session.is_logged_in);
        assert!(!state.session_view().booking_form_visible);
    }

    #[test]
    fn test_stricter_policy() {
        let policy = CredentialPolicy {
            min_email_len: 10,
            min_password_len: 12,
        };
        assert_eq!(
            validate_credentials("a@b.cd", "longenough1", &policy),
            Err(ValidationError::InvalidEmail)
        );
        assert_eq!(
            validate_credentials("user@example.com", "longenough1", &policy),
            Err(ValidationError::WeakPassword { min_len: 12 })
        );
    }
}
