use std::sync::Arc;
use std::sync::OnceLock;

use auth::Authenticator;
use auth::KeyPair;

// 4096-bit generation takes seconds; share one pair per test binary.
pub(crate) fn test_key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| KeyPair::generate().expect("Failed to generate key pair"))
}

pub(crate) fn test_authenticator() -> Arc<Authenticator> {
    static AUTHENTICATOR: OnceLock<Arc<Authenticator>> = OnceLock::new();
    Arc::clone(AUTHENTICATOR.get_or_init(|| {
        Arc::new(Authenticator::new(test_key_pair()).expect("Failed to create authenticator"))
    }))
}
