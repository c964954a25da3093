//! Authentication core
//!
//! Provides the credential and token primitives the dashboard API is built on:
//! - Password hashing (Argon2id, self-describing encoded format)
//! - RSA key material (generation, PEM import/export)
//! - RS256 access token issuance and verification
//! - Authentication coordination for login flows
//!
//! Nothing in this crate performs I/O, reads configuration or holds mutable
//! state. Every type can be shared across threads once built.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```no_run
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Access Tokens
//! ```no_run
//! use auth::{JwtHandler, KeyPair};
//! use uuid::Uuid;
//!
//! let key_pair = KeyPair::generate().unwrap();
//! let handler = JwtHandler::new(&key_pair).unwrap();
//! let token = handler.issue(Uuid::new_v4(), "alice@example.com", Some("Alice")).unwrap();
//! let claims = handler.verify(&token).unwrap();
//! assert_eq!(claims.email, "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```no_run
//! use auth::{Authenticator, KeyPair, Principal};
//! use uuid::Uuid;
//!
//! let auth = Authenticator::new(&KeyPair::generate().unwrap()).unwrap();
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and generate token
//! let principal = Principal {
//!     id: Uuid::new_v4(),
//!     email: "alice@example.com".to_string(),
//!     name: None,
//! };
//! let result = auth.authenticate("password123", &hash, &principal).unwrap();
//!
//! // Validate token
//! let claims = auth.validate_token(&result.access_token).unwrap();
//! assert_eq!(claims.principal_id, principal.id);
//! ```

pub mod authenticator;
pub mod jwt;
pub mod keys;
pub mod password;

#[cfg(test)]
mod testutil;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use authenticator::Principal;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use keys::KeyError;
pub use keys::KeyPair;
pub use password::PasswordError;
pub use password::PasswordHasher;
