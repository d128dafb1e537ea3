use serde::{Deserialize, Serialize};

/// A back-office staff user (referrer of clients)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub access_level: i32,
}
