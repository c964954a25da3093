pub mod config;
pub mod domain;
pub mod inbound;
pub mod keys;
pub mod outbound;

#[cfg(test)]
mod testutil;

pub use domain::account;
pub use inbound::http::middleware::AuthenticatedIdentity;
