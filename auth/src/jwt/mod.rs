pub mod claims;
pub mod errors;
pub mod handler;

pub use claims::Claims;
pub use claims::ACCESS_TOKEN_TTL_MINUTES;
pub use claims::TOKEN_ISSUER;
pub use errors::JwtError;
pub use handler::JwtHandler;
