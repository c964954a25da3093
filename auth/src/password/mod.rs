pub mod argon2id;
pub mod errors;

pub use argon2id::PasswordHasher;
pub use errors::PasswordError;
