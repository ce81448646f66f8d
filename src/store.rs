//! Key files on disk. Every key, local or peer, lives in its own JSON
//! envelope `{"email": E, "key": K}` where `K` is the base64 key token:
//! `E` is `""` for the local public key, the peer's address for a
//! stored peer key, and the whole authorized-peer array for the local
//! private key.

use crate::error::MsgrError;
use cipher::{PrivateKey, PublicKey};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const PUBLIC_KEY_FILE: &str = "public.key";
pub const PRIVATE_KEY_FILE: &str = "private.key";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEnvelope {
    pub email: EmailTag,
    pub key: String,
}

/// The `email` field is a single address on public-key envelopes and an
/// array on the private one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailTag {
    One(String),
    Many(Vec<String>),
}

/// Reads and writes the key files under one base directory, the current
/// working directory by default.
pub struct KeyStore {
    dir: PathBuf,
}

impl KeyStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn current() -> anyhow::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    pub fn save_public(&self, key: &PublicKey) -> anyhow::Result<()> {
        let envelope = KeyEnvelope {
            email: EmailTag::One(key.email().unwrap_or_default().to_string()),
            key: key.encode64(),
        };
        self.write(PUBLIC_KEY_FILE, &envelope)
    }

    pub fn load_public(&self) -> anyhow::Result<PublicKey> {
        let envelope = self.read(PUBLIC_KEY_FILE)?;
        Ok(PublicKey::decode64(&envelope.key)?)
    }

    pub fn save_private(&self, key: &PrivateKey) -> anyhow::Result<()> {
        let envelope = KeyEnvelope {
            email: EmailTag::Many(key.emails().to_vec()),
            key: key.encode64(),
        };
        self.write(PRIVATE_KEY_FILE, &envelope)
    }

    pub fn load_private(&self) -> anyhow::Result<PrivateKey> {
        let envelope = self.read(PRIVATE_KEY_FILE)?;
        let emails = match envelope.email {
            EmailTag::Many(emails) => emails,
            EmailTag::One(email) if email.is_empty() => Vec::new(),
            EmailTag::One(email) => vec![email],
        };
        Ok(PrivateKey::decode64(&envelope.key, emails)?)
    }

    /// Stores a peer's key under `<email>.key`, overwriting any older one.
    pub fn save_peer(&self, email: &str, token: &str) -> anyhow::Result<()> {
        let envelope = KeyEnvelope {
            email: EmailTag::One(email.to_string()),
            key: token.to_string(),
        };
        self.write(&Self::peer_file(email), &envelope)
    }

    pub fn load_peer(&self, email: &str) -> anyhow::Result<PublicKey> {
        let name = Self::peer_file(email);
        if !self.dir.join(&name).exists() {
            return Err(MsgrError::PeerKeyNotFound(email.to_string()).into());
        }

        let envelope = self.read(&name)?;
        Ok(PublicKey::decode64_for(&envelope.key, email.to_string())?)
    }

    fn peer_file(email: &str) -> String {
        format!("{email}.key")
    }

    fn write(&self, name: &str, envelope: &KeyEnvelope) -> anyhow::Result<()> {
        let json = serde_json::to_string(envelope)?;
        std::fs::write(self.dir.join(name), json)?;
        Ok(())
    }

    fn read(&self, name: &str) -> anyhow::Result<KeyEnvelope> {
        let path = self.dir.join(name);
        if !path.exists() {
            return Err(MsgrError::KeyNotFound(name.to_string()).into());
        }

        let json = std::fs::read(&path)?;
        Ok(serde_json::from_slice(json.as_slice())?)
    }

    pub fn dir(&self) -> &Path {
        self.dir.as_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipher::KeyFactory;

    fn scratch_store(tag: &str) -> KeyStore {
        let dir = std::env::temp_dir().join(format!("msgr-store-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        KeyStore::new(dir)
    }

    #[test]
    fn envelope_email_shapes() {
        let one: KeyEnvelope =
            serde_json::from_str(r#"{"email":"a@b.c","key":"AA=="}"#).unwrap();
        assert_eq!(one.email, EmailTag::One("a@b.c".to_string()));

        let many: KeyEnvelope =
            serde_json::from_str(r#"{"email":["a@b.c","d@e.f"],"key":"AA=="}"#).unwrap();
        assert_eq!(
            many.email,
            EmailTag::Many(vec!["a@b.c".to_string(), "d@e.f".to_string()])
        );

        let local = KeyEnvelope {
            email: EmailTag::One(String::new()),
            key: "AA==".to_string(),
        };
        assert_eq!(
            serde_json::to_string(&local).unwrap(),
            r#"{"email":"","key":"AA=="}"#
        );
    }

    #[test]
    fn key_pair_survives_the_disk() {
        let store = scratch_store("pair");
        let (public, mut private) = KeyFactory::new().generate_key_pair(64);
        private.add_email("peer@example.com");

        store.save_public(&public).unwrap();
        store.save_private(&private).unwrap();

        let loaded = store.load_public().unwrap();
        assert_eq!(loaded.modulus(), public.modulus());
        assert_eq!(loaded.exponent(), public.exponent());

        let loaded = store.load_private().unwrap();
        assert_eq!(loaded.exponent(), private.exponent());
        assert_eq!(loaded.emails(), ["peer@example.com".to_string()]);
    }

    #[test]
    fn peer_keys_file_per_address() {
        let store = scratch_store("peer");
        let (public, _) = KeyFactory::new().generate_key_pair(64);

        store.save_peer("alice@example.com", &public.encode64()).unwrap();
        let loaded = store.load_peer("alice@example.com").unwrap();
        assert_eq!(loaded.email(), Some("alice@example.com"));
        assert_eq!(loaded.modulus(), public.modulus());

        let missing = store.load_peer("bob@example.com").unwrap_err();
        assert!(missing.to_string().contains("bob@example.com"));
    }

    #[test]
    fn missing_local_keys_name_the_file() {
        let store = scratch_store("missing");
        let err = store.load_public().unwrap_err();
        assert!(err.to_string().contains(PUBLIC_KEY_FILE));
    }
}
