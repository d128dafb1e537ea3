//! HTTP client for the managed object store

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::{ObjectStorage, ObjectStorageError, Result};

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Object store reached over plain HTTP: PUT to upload, HEAD to resolve
#[derive(Clone)]
pub struct HttpObjectStore {
    client: Client,
    base_url: String,
}

impl HttpObjectStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ObjectStorageError::from)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn object_url(&self, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|seg| urlencoding::encode(seg).into_owned())
            .collect();
        format!("{}/objects/{}", self.base_url, encoded.join("/"))
    }
}

#[async_trait]
impl ObjectStorage for HttpObjectStore {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> Result<()> {
        self.client
            .put(self.object_url(path))
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn get_url(&self, path: &str) -> Result<String> {
        let url = self.object_url(path);
        let resp = self.client.head(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ObjectStorageError::NotFound(path.to_string()));
        }
        resp.error_for_status()?;
        Ok(url)
    }
}
