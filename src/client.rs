//! The key-directory service. Four endpoints, JSON bodies, nothing
//! streamed; the blocking client is plenty for a one-shot CLI.

use crate::error::MsgrError;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireKey {
    pub email: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub email: String,
    pub content: String,
}

pub struct KeyServer {
    base: Url,
    http: Client,
}

impl KeyServer {
    pub fn new(base: &str) -> anyhow::Result<Self> {
        Ok(Self {
            base: Url::parse(base)?,
            http: Client::new(),
        })
    }

    pub fn key_get(&self, email: &str) -> anyhow::Result<WireKey> {
        let response = self.http.get(self.endpoint("Key", email)?).send()?;
        let key: WireKey = Self::checked(response, format!("key of `{email}`"))?.json()?;
        if key.key.is_empty() {
            return Err(MsgrError::ServerEmpty(format!("key for `{email}`")).into());
        }
        Ok(key)
    }

    pub fn key_put(&self, email: &str, key: &WireKey) -> anyhow::Result<()> {
        let response = self
            .http
            .put(self.endpoint("Key", email)?)
            .json(key)
            .send()?;
        Self::checked(response, format!("key of `{email}`"))?;
        Ok(())
    }

    pub fn message_get(&self, email: &str) -> anyhow::Result<WireMessage> {
        let response = self.http.get(self.endpoint("Message", email)?).send()?;
        let msg: WireMessage =
            Self::checked(response, format!("message for `{email}`"))?.json()?;
        if msg.content.is_empty() {
            return Err(MsgrError::ServerEmpty(format!("message for `{email}`")).into());
        }
        Ok(msg)
    }

    pub fn message_put(&self, email: &str, msg: &WireMessage) -> anyhow::Result<()> {
        let response = self
            .http
            .put(self.endpoint("Message", email)?)
            .json(msg)
            .send()?;
        Self::checked(response, format!("message for `{email}`"))?;
        Ok(())
    }

    fn endpoint(&self, kind: &str, email: &str) -> anyhow::Result<Url> {
        Ok(self.base.join(&format!("{kind}/{email}"))?)
    }

    fn checked(response: Response, what: String) -> anyhow::Result<Response> {
        if !response.status().is_success() {
            return Err(MsgrError::ServerStatus {
                what,
                status: response.status().as_u16(),
            }
            .into());
        }
        Ok(response)
    }
}
