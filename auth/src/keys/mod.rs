pub mod errors;
pub mod key_pair;

pub use errors::KeyError;
pub use key_pair::KeyPair;
