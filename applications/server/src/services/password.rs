/// Password hashing and strength policy
use crate::error::{Result, ServerError};

/// Minimum number of characters in an acceptable password
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

pub const MIN_BCRYPT_COST: u32 = 4;
pub const MAX_BCRYPT_COST: u32 = 31;

pub const WEAK_PASSWORD_MESSAGE: &str = "Password must have at least one uppercase, one lowercase, one digit, and one special character and at least 8 characters";

pub const LONG_PASSWORD_MESSAGE: &str = "Password must be at most 72 bytes long";

/// One-way salted password codec backed by bcrypt
#[derive(Debug, Clone)]
pub struct PasswordCodec {
    cost: u32,
    // Verified against when the account is unknown, so both failure paths do
    // the same amount of work.
    decoy: String,
}

impl PasswordCodec {
    pub fn new(cost: u32) -> Result<Self> {
        let decoy = bcrypt::hash("decoy-password-never-issued", cost)
            .map_err(|e| ServerError::fatal(format!("bcrypt unavailable: {e}")))?;
        Ok(Self { cost, decoy })
    }

    /// Hash a password using bcrypt with a fresh random salt
    ///
    /// Input longer than [`MAX_PASSWORD_BYTES`] is refused rather than
    /// silently truncated.
    pub fn hash(&self, password: &str) -> Result<String> {
        if password.len() > MAX_PASSWORD_BYTES {
            return Err(ServerError::validation(LONG_PASSWORD_MESSAGE));
        }

        bcrypt::hash(password, self.cost)
            .map_err(|e| ServerError::fatal(format!("password hashing failed: {e}")))
    }

    /// Verify a password against a digest
    ///
    /// A malformed digest never matches.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        bcrypt::verify(password, digest).unwrap_or_else(|e| {
            tracing::debug!("Rejecting malformed password digest: {}", e);
            false
        })
    }

    /// Burn one verification without a real digest
    pub fn verify_decoy(&self, password: &str) -> bool {
        let _ = self.verify(password, &self.decoy);
        false
    }
}

/// Check a candidate password against the strength policy
///
/// Requires at least [`MIN_PASSWORD_LENGTH`] characters including an uppercase
/// letter, a lowercase letter, a digit and a special character, and at most
/// [`MAX_PASSWORD_BYTES`] bytes.
pub fn validate_password_strength(password: &str) -> Result<()> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ServerError::validation(LONG_PASSWORD_MESSAGE));
    }

    let long_enough = password.chars().count() >= MIN_PASSWORD_LENGTH;
    let has_upper = password.chars().any(char::is_uppercase);
    let has_lower = password.chars().any(char::is_lowercase);
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password
        .chars()
        .any(|c| !c.is_alphanumeric() && !c.is_whitespace());

    if long_enough && has_upper && has_lower && has_digit && has_special {
        Ok(())
    } else {
        Err(ServerError::validation(WEAK_PASSWORD_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codec() -> PasswordCodec {
        PasswordCodec::new(MIN_BCRYPT_COST).unwrap()
    }

    #[test]
    fn test_password_hashing() {
        let codec = codec();
        let password = "My_secure_password1";

        let hash = codec.hash(password).unwrap();
        assert!(codec.verify(password, &hash));
        assert!(!codec.verify("wrong_password", &hash));
    }

    #[test]
    fn same_password_hashes_differently() {
        let codec = codec();
        let first = codec.hash("Test@123456").unwrap();
        let second = codec.hash("Test@123456").unwrap();

        assert_ne!(first, second, "Hashes should differ due to random salt");
        assert!(codec.verify("Test@123456", &first));
        assert!(codec.verify("Test@123456", &second));
    }

    #[test]
    fn malformed_digest_is_false_not_error() {
        let codec = codec();
        assert!(!codec.verify("password", "not-a-valid-hash"));
        assert!(!codec.verify("password", ""));
    }

    #[test]
    fn decoy_never_matches() {
        assert!(!codec().verify_decoy("decoy-password-never-issued"));
    }

    #[test]
    fn strong_passwords_pass() {
        for password in ["Test@123456", "Password@123456", "aB3$efgh"] {
            assert!(validate_password_strength(password).is_ok(), "{password}");
        }
    }

    #[test]
    fn weak_passwords_fail_with_message() {
        for password in [
            "123456",       // digits only
            "aB3$efg",      // seven characters
            "password@123", // no uppercase
            "PASSWORD@123", // no lowercase
            "Password@abc", // no digit
            "Password1234", // no special character
            "Pass word12",  // whitespace is not special
            "",
        ] {
            match validate_password_strength(password) {
                Err(ServerError::Validation(msg)) => assert_eq!(msg, WEAK_PASSWORD_MESSAGE),
                other => panic!("{password:?} should be rejected, got {other:?}"),
            }
        }
    }

    #[test]
    fn passwords_past_bcrypt_limit_are_refused() {
        let codec = codec();
        let prefix = format!("Aa1!{}", "x".repeat(80));
        let first = format!("{prefix}ONE");
        let second = format!("{prefix}TWO");

        for password in [&first, &second] {
            match validate_password_strength(password) {
                Err(ServerError::Validation(msg)) => assert_eq!(msg, LONG_PASSWORD_MESSAGE),
                other => panic!("over-long password accepted: {other:?}"),
            }
            assert!(matches!(codec.hash(password), Err(ServerError::Validation(_))));
        }

        // Exactly at the limit is still fine
        let at_limit = format!("Aa1!{}", "x".repeat(MAX_PASSWORD_BYTES - 4));
        assert_eq!(at_limit.len(), MAX_PASSWORD_BYTES);
        assert!(validate_password_strength(&at_limit).is_ok());
        let hash = codec.hash(&at_limit).unwrap();
        assert!(codec.verify(&at_limit, &hash));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(8))]

        /// Property: a password always verifies against its own hash
        #[test]
        fn hash_then_verify_round_trips(password in "[A-Za-z0-9!@#$%^&*]{8,24}") {
            let codec = codec();
            let hash = codec.hash(&password).unwrap();
            prop_assert!(codec.verify(&password, &hash));
        }

        /// Property: a different password never verifies
        #[test]
        fn different_password_never_verifies(
            first in "[A-Za-z0-9]{8,72}",
            second in "[A-Za-z0-9]{8,72}",
        ) {
            prop_assume!(first != second);
            let codec = codec();
            let hash = codec.hash(&second).unwrap();
            prop_assert!(!codec.verify(&first, &hash));
        }
    }
}
