use argon2::password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::rngs::OsRng;
use crate::error::{JournalError, Result};

/// Password gate in front of account selection.
///
/// Only the argon2 PHC string is ever stored; an unset hash means the journal is open.
pub struct AccessGate;

impl AccessGate {
    pub fn hash_password(password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    pub fn verify(stored_hash: Option<&str>, password: &str) -> Result<()> {
        let Some(stored_hash) = stored_hash else {
            return Ok(());
        };

        let parsed = PasswordHash::new(stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(password_hash::Error::Password) => {
                log::warn!("Rejected access attempt with incorrect password");
                Err(JournalError::AccessDenied)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_password_passes() {
        let hash = AccessGate::hash_password("kuncinya-displin").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(AccessGate::verify(Some(&hash), "kuncinya-displin").is_ok());
    }

    #[test]
    fn test_wrong_password_is_denied() {
        let hash = AccessGate::hash_password("secret").unwrap();
        let err = AccessGate::verify(Some(&hash), "Secret").unwrap_err();
        assert!(matches!(err, JournalError::AccessDenied));
    }

    #[test]
    fn test_no_password_configured_is_open() {
        assert!(AccessGate::verify(None, "").is_ok());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = AccessGate::hash_password("secret").unwrap();
        let b = AccessGate::hash_password("secret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_corrupt_hash_is_an_error_not_access() {
        let err = AccessGate::verify(Some("not-a-phc-string"), "secret").unwrap_err();
        assert!(matches!(err, JournalError::HashError(_)));
    }
}
