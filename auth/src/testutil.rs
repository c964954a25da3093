use std::sync::OnceLock;

use crate::keys::KeyPair;

// 4096-bit generation takes seconds; share one pair per test binary.
pub(crate) fn test_key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| KeyPair::generate().expect("Failed to generate key pair"))
}

pub(crate) fn other_key_pair() -> &'static KeyPair {
    static KEY_PAIR: OnceLock<KeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| KeyPair::generate().expect("Failed to generate key pair"))
}
