use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum MsgrError {
    #[error("The key file `{0}` does not exist, run `keyGen` first")]
    KeyNotFound(String),

    #[error("No public key stored for `{0}`, run `getKey {0}` first")]
    PeerKeyNotFound(String),

    #[error("Message for `{0}` can't be decoded, that key was never exchanged from here")]
    NotOurPeer(String),

    #[error("Server answered `{status}` for {what}")]
    ServerStatus { what: String, status: u16 },

    #[error("Server has no {0}")]
    ServerEmpty(String),
}
