use std::fmt;
use std::str::FromStr;

use auth::Principal;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;

/// Account aggregate entity.
///
/// A principal that can log in with a password.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub name: Option<String>,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Identity carried by this account's access tokens.
    pub fn principal(&self) -> Principal {
        Principal {
            id: self.id.0,
            email: self.email.as_str().to_string(),
            name: self.name.clone(),
        }
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored trimmed
/// and lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Minimum password length in bytes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Plain text password that satisfies the registration policy.
///
/// At least 8 bytes with an uppercase letter, a lowercase letter and a
/// digit. Only enforced for new passwords; login accepts whatever was
/// stored before the policy existed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Create a new password checked against the policy.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 8 bytes
    /// * `MissingUppercase` / `MissingLowercase` / `MissingDigit` - Required
    ///   character class absent (checked in that order)
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort);
        }

        if !password.chars().any(char::is_uppercase) {
            return Err(PasswordPolicyError::MissingUppercase);
        }
        if !password.chars().any(char::is_lowercase) {
            return Err(PasswordPolicyError::MissingLowercase);
        }
        if !password.chars().any(char::is_numeric) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(Password(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    /// Plain text password (will be hashed by service)
    pub password: Password,
    pub name: Option<String>,
}

/// Command to log in with email and password
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Authenticated account with a freshly issued access token.
#[derive(Debug, Clone)]
pub struct Session {
    pub account: Account,
    pub access_token: String,
    /// Seconds until the access token expires
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_email() {
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_valid_password() {
        let password = Password::new("Passw0rd".to_string()).unwrap();
        assert_eq!(password.as_str(), "Passw0rd");
    }

    #[test]
    fn test_password_policy() {
        let cases = [
            ("", PasswordPolicyError::TooShort),
            ("Pass0rd", PasswordPolicyError::TooShort),
            ("password1", PasswordPolicyError::MissingUppercase),
            ("PASSWORD1", PasswordPolicyError::MissingLowercase),
            ("Password", PasswordPolicyError::MissingDigit),
        ];

        for (password, expected) in cases {
            assert_eq!(
                Password::new(password.to_string()),
                Err(expected.clone()),
                "unexpected result for {password:?}"
            );
        }
    }

    #[test]
    fn test_password_length_counts_bytes() {
        // Seven characters, nine bytes.
        assert!(Password::new("Ää1abcd".to_string()).is_ok());
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("Passw0rd".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("Passw0rd"));
    }

    #[test]
    fn test_principal() {
        let account = Account {
            id: AccountId::new(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            name: Some("Alice".to_string()),
            password_hash: String::new(),
            created_at: Utc::now(),
        };

        let principal = account.principal();
        assert_eq!(principal.id, account.id.0);
        assert_eq!(principal.email, "alice@example.com");
        assert_eq!(principal.name.as_deref(), Some("Alice"));
    }
}
