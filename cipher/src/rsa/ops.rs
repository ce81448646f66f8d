use crate::rsa::{PrivateKey, PublicKey};
use crate::CipherError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use num_bigint::BigUint;

/// $c = m^e \mod n$ over the plaintext's UTF-8 bytes read as a
/// big-endian integer, returned as base64.
///
/// There is no padding: the plaintext's byte length must stay strictly
/// below the modulus's minimal byte length, or the reduction is lossy
/// and the ciphertext will not decrypt back. That precondition is the
/// caller's; nothing here detects or repairs a too-long message.
pub fn encrypt(plaintext: &str, key: &PublicKey) -> String {
    let m = BigUint::from_bytes_be(plaintext.as_bytes());
    let c = m.modpow(key.exponent(), key.modulus());
    BASE64.encode(c.to_bytes_be())
}

/// $m = c^d \mod n$, the inverse of [`encrypt`] for in-range messages.
pub fn decrypt(ciphertext: &str, key: &PrivateKey) -> Result<String, CipherError> {
    let raw = BASE64
        .decode(ciphertext)
        .map_err(|e| CipherError::InvalidBase64(e.to_string()))?;
    let c = BigUint::from_bytes_be(raw.as_slice());
    let m = c.modpow(key.exponent(), key.modulus());
    String::from_utf8(m.to_bytes_be()).map_err(|e| CipherError::NotUtf8(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // p=61, q=53: n=3233, e=17, d=2753
    fn textbook_pair() -> (PublicKey, PrivateKey) {
        let n = BigUint::from(3233u32);
        (
            PublicKey::new_uncheck(n.clone(), BigUint::from(17u32)),
            PrivateKey::new_uncheck(n, BigUint::from(2753u32)),
        )
    }

    // 64-bit primes, wide enough for a few characters of payload
    fn wide_pair() -> (PublicKey, PrivateKey) {
        let p = BigUint::from(13496181268022124907u64);
        let q = BigUint::from(10953742525620032441u64);
        let n = &p * &q;
        let totient = (&p - 1u32) * (&q - 1u32);
        let e = BigUint::from(65537u32);
        let d = crate::rsa::key::mod_inverse(&e, &totient).unwrap();
        (
            PublicKey::new_uncheck(n.clone(), e),
            PrivateKey::new_uncheck(n, d),
        )
    }

    #[test]
    fn round_trip_within_modulus() {
        let (public, private) = wide_pair();
        for msg in ["a", "hello, rsa", "ünïcode ok", "0123456789012"] {
            let ciphertext = encrypt(msg, &public);
            assert_eq!(decrypt(&ciphertext, &private).unwrap(), msg, "`{msg}`");
        }
    }

    #[test]
    fn tiny_modulus_round_trips_one_byte() {
        let (public, private) = textbook_pair();
        // "a" = 0x61 = 97 < 3233
        let ciphertext = encrypt("a", &public);
        assert_eq!(decrypt(&ciphertext, &private).unwrap(), "a");
    }

    #[test]
    fn oversized_plaintext_is_lossy_not_detected() {
        let (public, private) = textbook_pair();
        // two bytes: 0x6869 = 26729 >= 3233, reduced mod n on encrypt
        let msg = "hi";
        let ciphertext = encrypt(msg, &public);
        match decrypt(&ciphertext, &private) {
            Ok(recovered) => assert_ne!(recovered, msg),
            // the reduced value need not decode as UTF-8 at all
            Err(CipherError::NotUtf8(_)) => {}
            Err(e) => panic!("unexpected decode failure: {e}"),
        }
    }

    #[test]
    fn decrypt_rejects_garbage() {
        let (_, private) = textbook_pair();
        assert!(matches!(
            decrypt("@@@@", &private),
            Err(CipherError::InvalidBase64(_))
        ));
    }
}
