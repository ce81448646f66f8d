mod error;
pub use error::CipherError;

mod rand;
pub use crate::rand::{DefaultRand, Rand};

pub mod rsa;
pub use rsa::{KeyFactory, PrimeGenerator, PrivateKey, PublicKey};
