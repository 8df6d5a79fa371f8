//! Brochure file management against a Databricks volume.
//!
//! Uploads and deletions go through the workspace Files API. Like the
//! warehouse client, a volume client only exists when the workspace is
//! authenticated; otherwise document endpoints report offline.

use serde::Deserialize;
use thiserror::Error;

use crate::config::DatabricksConfig;

const FILES_PATH: &str = "/api/2.0/fs/files";
const DIRECTORIES_PATH: &str = "/api/2.0/fs/directories";

#[derive(Debug, Deserialize)]
struct DirectoryListing {
    #[serde(default)]
    contents: Vec<DirectoryEntry>,
}

#[derive(Debug, Deserialize)]
struct DirectoryEntry {
    name: String,
    #[serde(default)]
    is_directory: bool,
}

/// Error type for volume operations.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("Databricks host or token not configured")]
    NotConfigured,

    #[error("invalid filename {0:?}")]
    InvalidFilename(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Files API returned status {status}: {body}")]
    Api { status: u16, body: String },
}

/// Client for the volume holding uploaded brochures.
#[derive(Debug, Clone)]
pub struct VolumeClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    volume_path: String,
}

impl VolumeClient {
    pub fn from_config(db: &DatabricksConfig) -> Result<Self, VolumeError> {
        if !db.is_authenticated() {
            return Err(VolumeError::NotConfigured);
        }
        let token = db.token.clone().ok_or(VolumeError::NotConfigured)?;
        Ok(Self::new(db.api_base(), token, db.volume_path.clone()))
    }

    pub fn new(base_url: String, token: String, volume_path: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
            volume_path,
        }
    }

    /// Volume path files land under.
    pub fn volume_path(&self) -> &str {
        &self.volume_path
    }

    /// Upload a file, overwriting any previous version. Returns the full
    /// volume path of the stored file.
    pub async fn upload(&self, filename: &str, content: Vec<u8>) -> Result<String, VolumeError> {
        let full_path = self.full_path(filename)?;
        let url = format!("{}{}{}", self.base_url, FILES_PATH, full_path);

        let response = self
            .http
            .put(&url)
            .query(&[("overwrite", "true")])
            .bearer_auth(&self.token)
            .body(content)
            .send()
            .await?;

        self.check(response).await?;
        tracing::info!(path = %full_path, "Uploaded brochure to volume");
        Ok(full_path)
    }

    /// Delete a previously uploaded file.
    pub async fn delete(&self, filename: &str) -> Result<(), VolumeError> {
        let full_path = self.full_path(filename)?;
        let url = format!("{}{}{}", self.base_url, FILES_PATH, full_path);

        let response = self.http.delete(&url).bearer_auth(&self.token).send().await?;
        self.check(response).await?;
        tracing::info!(path = %full_path, "Deleted brochure from volume");
        Ok(())
    }

    /// Names of the files currently in the volume. A volume that does not
    /// exist yet lists as empty.
    pub async fn list(&self) -> Result<Vec<String>, VolumeError> {
        let url = format!("{}{}{}", self.base_url, DIRECTORIES_PATH, self.volume_path);

        let response = self.http.get(&url).bearer_auth(&self.token).send().await?;
        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VolumeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let listing: DirectoryListing = response.json().await?;
        Ok(listing
            .contents
            .into_iter()
            .filter(|entry| !entry.is_directory)
            .map(|entry| entry.name)
            .collect())
    }

    fn full_path(&self, filename: &str) -> Result<String, VolumeError> {
        if filename.is_empty() || filename.contains('/') || filename.contains("..") {
            return Err(VolumeError::InvalidFilename(filename.to_string()));
        }
        Ok(format!("{}/{}", self.volume_path, filename))
    }

    async fn check(&self, response: reqwest::Response) -> Result<(), VolumeError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(VolumeError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> VolumeClient {
        VolumeClient::new(
            "https://example".to_string(),
            "token".to_string(),
            "/Volumes/insurance/fa_pricing/user_uploaded_brochures".to_string(),
        )
    }

    #[test]
    fn full_path_joins_volume_and_filename() {
        let path = client().full_path("brochure.pdf").unwrap();
        assert_eq!(
            path,
            "/Volumes/insurance/fa_pricing/user_uploaded_brochures/brochure.pdf"
        );
    }

    #[test]
    fn traversal_and_nested_names_are_rejected() {
        assert!(client().full_path("../etc/passwd").is_err());
        assert!(client().full_path("a/b.pdf").is_err());
        assert!(client().full_path("").is_err());
    }
}
