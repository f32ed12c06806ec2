use serde::{Deserialize, Serialize};

/// A catalogued photo of a species, owned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: i64,
    pub species_name: String,
    pub gps_long: f64,
    pub gps_lat: f64,
    pub image_path: String,
    pub user_id: i64,
}

/// An API key record as returned by `/api/keys`.
///
/// `key` holds the plaintext secret only in the response to key creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    pub id: i64,
    #[serde(default)]
    pub key: String,
    pub name: String,
    pub created_at: String,
    pub expires_at: String,
    /// `None` until the key is used for the first time.
    #[serde(default)]
    pub last_used: Option<String>,
    #[serde(default)]
    pub revoked: bool,
}

const VISIBLE_KEY_PREFIX: usize = 8;

impl ApiKey {
    /// Secret suitable for listings: the first 8 characters followed by `...`.
    pub fn masked_key(&self) -> String {
        if self.key.chars().count() <= VISIBLE_KEY_PREFIX {
            return "*".repeat(VISIBLE_KEY_PREFIX);
        }
        let prefix: String = self.key.chars().take(VISIBLE_KEY_PREFIX).collect();
        format!("{prefix}...")
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct NewKeyRequest<'a> {
    pub(crate) name: &'a str,
}
