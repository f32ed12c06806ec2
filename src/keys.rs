use reqwest::Method;

use crate::client::{Client, Transport};
use crate::error::{Error, Result};
use crate::models::{ApiKey, NewKeyRequest};

const KEYS_PATH: &str = "/api/keys";

impl<T: Transport> Client<T> {
    /// Creates a key named `name`.
    ///
    /// The returned record is the only place the plaintext secret appears.
    /// Works without an API key configured.
    pub fn generate_key(&self, name: &str) -> Result<ApiKey> {
        let body = serde_json::to_vec(&NewKeyRequest { name })
            .map_err(|e| Error::encode("key request", e))?;
        self.execute_json(Method::POST, KEYS_PATH, Some(body.as_slice()), "api key")
    }

    pub fn list_keys(&self) -> Result<Vec<ApiKey>> {
        self.execute_json(Method::GET, KEYS_PATH, None, "api key list")
    }

    /// Revokes the key this client authenticates with.
    ///
    /// The server identifies the key from the `X-API-Key` header and keeps the
    /// record with `revoked` set.
    pub fn revoke_key(&self) -> Result<()> {
        self.execute(Method::DELETE, KEYS_PATH, None)?;
        Ok(())
    }
}
