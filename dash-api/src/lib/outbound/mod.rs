pub mod password_pool;
pub mod repositories;

pub use password_pool::PasswordPool;
