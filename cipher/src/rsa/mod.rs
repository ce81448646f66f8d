//! Textbook RSA: probabilistic prime generation, key-pair derivation,
//! the compact key token format and the raw modpow primitives.
//!
//! This is deliberately the unpadded scheme (no OAEP, no PKCS#1 v1.5):
//! a message whose integer value reaches the modulus is reduced and
//! cannot be recovered. Callers own that precondition.

mod prime;
pub use prime::{probably_prime, PrimeGenerator};

mod key;
pub use key::{KeyFactory, PrivateKey, PublicKey};

pub mod codec;

mod ops;
pub use ops::{decrypt, encrypt};
