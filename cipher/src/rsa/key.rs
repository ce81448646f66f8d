use crate::rsa::{codec, PrimeGenerator};
use crate::CipherError;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{Euclid, One};
use std::fmt::{Display, Formatter};

/// The encrypting half of a pair: `{N, E}`. A key without an email is
/// this machine's own; one with an email belongs to that peer.
#[derive(Clone, Debug, PartialOrd, PartialEq, Ord, Eq)]
pub struct PublicKey {
    // n = p * q
    n: BigUint,
    // prime encryption exponent, e * d = 1 % (p-1)(q-1)
    e: BigUint,
    email: Option<String>,
}

/// The decrypting half: `{N, D}` plus the peers this key has exchanged
/// public keys with. N and D never change after construction; only the
/// peer list grows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    n: BigUint,
    // d = e^{-1} % (p-1)(q-1)
    d: BigUint,
    emails: Vec<String>,
}

impl PublicKey {
    /// note: not to check that `n` and `e` are right RSA parameters
    pub fn new_uncheck(n: BigUint, e: BigUint) -> Self {
        Self { n, e, email: None }
    }

    pub fn with_email(n: BigUint, e: BigUint, email: String) -> Self {
        Self {
            n,
            e,
            email: Some(email),
        }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// e
    pub fn exponent(&self) -> &BigUint {
        &self.e
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// The compact `[len|e][len|n]` token, base64 encoded.
    pub fn encode64(&self) -> String {
        codec::encode(&self.e, &self.n)
    }

    pub fn decode64(token: &str) -> Result<Self, CipherError> {
        let (e, n) = codec::decode(token)?;
        Ok(Self::new_uncheck(n, e))
    }

    pub fn decode64_for(token: &str, email: String) -> Result<Self, CipherError> {
        let (e, n) = codec::decode(token)?;
        Ok(Self::with_email(n, e, email))
    }
}

impl PrivateKey {
    /// note: not to check that `n` and `d` are right RSA parameters
    pub fn new_uncheck(n: BigUint, d: BigUint) -> Self {
        Self {
            n,
            d,
            emails: Vec::new(),
        }
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// d
    pub fn exponent(&self) -> &BigUint {
        &self.d
    }

    pub fn emails(&self) -> &[String] {
        self.emails.as_slice()
    }

    /// Appends a peer. Duplicates are kept as-is; the list is an
    /// append-only log, not a set.
    pub fn add_email(&mut self, email: impl Into<String>) {
        self.emails.push(email.into());
    }

    pub fn knows(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e == email)
    }

    pub fn encode64(&self) -> String {
        codec::encode(&self.d, &self.n)
    }

    pub fn decode64(token: &str, emails: Vec<String>) -> Result<Self, CipherError> {
        let (d, n) = codec::decode(token)?;
        Ok(Self {
            n,
            d,
            emails,
        })
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{n={:#x}, e={:#x}}}", self.n, self.e)
    }
}

impl Display for PrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{n={:#x}, d={:#x}, emails={:?}}}",
            self.n, self.d, self.emails
        )
    }
}

/// Derives full key pairs by racing the prime generator for p, q and
/// the 16-bit public exponent.
pub struct KeyFactory {
    workers: usize,
    test_rounds: usize,
}

impl Default for KeyFactory {
    fn default() -> Self {
        Self {
            workers: (num_cpus::get() * 2).max(1),
            test_rounds: 10,
        }
    }
}

impl KeyFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn test_rounds(mut self, rounds: usize) -> Self {
        self.test_rounds = rounds.max(1);
        self
    }

    /// `keysize` is split 70/30 between p and q, the p share rounded
    /// down to a whole byte, so the two factors differ in width while
    /// `p * q` stays close to `keysize` bits.
    pub fn generate_key_pair(&self, keysize: usize) -> (PublicKey, PrivateKey) {
        let psize = (keysize * 7 / 10) & !7;
        let qsize = keysize - psize;

        let p = self.prime(psize);
        let q = self.prime(qsize);
        let n = &p * &q;
        let totient = (&p - 1u32) * (&q - 1u32);

        // A prime 16-bit e still shares a factor with the totient when
        // e divides p-1 or q-1; resample until the inverse exists.
        let (e, d) = loop {
            let e = self.prime(16);
            if let Some(d) = mod_inverse(&e, &totient) {
                break (e, d);
            }
        };

        (
            PublicKey::new_uncheck(n.clone(), e),
            PrivateKey::new_uncheck(n, d),
        )
    }

    fn prime(&self, bits: usize) -> BigUint {
        PrimeGenerator::new(bits)
            .workers(self.workers)
            .test_rounds(self.test_rounds)
            .generate()
    }
}

/// The unique x in [0, n) with a*x = 1 % n, or None when gcd(a, n) != 1.
pub(crate) fn mod_inverse(a: &BigUint, n: &BigUint) -> Option<BigUint> {
    let (a, n) = (BigInt::from(a % n), BigInt::from(n.clone()));
    let g = a.extended_gcd(&n);
    g.gcd.is_one().then(|| {
        g.x.rem_euclid(&n)
            .to_biguint()
            .expect("rem_euclid result is never negative")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rsa::{decrypt, encrypt};

    #[test]
    fn mod_inverse_textbook_pair() {
        // p=61, q=53: n=3233, totient=3120, e=17 -> d=2753
        let (e, totient) = (BigUint::from(17u32), BigUint::from(3120u32));
        let d = mod_inverse(&e, &totient).unwrap();
        assert_eq!(d, BigUint::from(2753u32));
        assert!(((&e * &d) % &totient).is_one());
    }

    #[test]
    fn mod_inverse_rejects_shared_factor() {
        assert_eq!(
            mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)),
            None
        );
    }

    #[test]
    fn split_is_seventy_thirty_bytes() {
        // keysize 32: floor(0.7*32)=22 -> 16, q fills the rest
        let psize = (32usize * 7 / 10) & !7;
        assert_eq!(psize, 16);
        assert_eq!(32 - psize, 16);

        let psize = (64usize * 7 / 10) & !7;
        assert_eq!(psize, 40);
        assert_eq!(64 - psize, 24);
    }

    #[test]
    fn generated_pair_inverts() {
        let (public, private) = KeyFactory::new().generate_key_pair(32);
        assert_eq!(public.modulus(), private.modulus());
        assert!(public.modulus().bits() <= 32);
        // both 16-bit factors fill their top byte, so n clears 16 bits
        assert!(public.modulus().bits() > 16);

        let msg = "hi";
        let ciphertext = encrypt(msg, &public);
        assert_eq!(decrypt(&ciphertext, &private).unwrap(), msg);
    }

    #[test]
    fn private_key_email_log_keeps_duplicates() {
        let mut key = PrivateKey::new_uncheck(BigUint::from(3233u32), BigUint::from(2753u32));
        assert!(!key.knows("alice@example.com"));

        key.add_email("alice@example.com");
        key.add_email("bob@example.com");
        key.add_email("alice@example.com");
        assert!(key.knows("alice@example.com"));
        assert_eq!(key.emails().len(), 3);
    }

    #[test]
    fn key_token_round_trip() {
        let public = PublicKey::new_uncheck(BigUint::from(3233u32), BigUint::from(17u32));
        let decoded = PublicKey::decode64(&public.encode64()).unwrap();
        assert_eq!(decoded, public);

        let private = PrivateKey::new_uncheck(BigUint::from(3233u32), BigUint::from(2753u32));
        let decoded = PrivateKey::decode64(&private.encode64(), vec!["a@b.c".into()]).unwrap();
        assert_eq!(decoded.modulus(), private.modulus());
        assert_eq!(decoded.exponent(), private.exponent());
        assert_eq!(decoded.emails(), ["a@b.c".to_string()]);
    }
}
