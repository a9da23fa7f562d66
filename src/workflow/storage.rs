use crate::error::UploadError;
use crate::workflow::types::{SelectedImage, UploadResult};
use chrono::Utc;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

/// Bucket every original lands in.
const BUCKET: &str = "images";
/// Key prefix for untouched uploads.
const KEY_PREFIX: &str = "originals";

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Thin client for the object store's REST surface. Public URLs are derived
/// locally from the key; no confirmation round trip.
#[derive(Clone)]
pub struct StorageClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl StorageClient {
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    /// Writes the image under a fresh timestamped key and returns the
    /// public URL the upscale service will read it from. Upsert is on, so
    /// an existing key with the same name is overwritten.
    pub async fn upload_original(
        &self,
        image: &SelectedImage,
    ) -> Result<UploadResult, UploadError> {
        let (file_name, object_path) =
            timestamped_key(&image.file_name, Utc::now().timestamp_millis());
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, BUCKET, object_path
        );

        let response = self
            .client
            .post(&url)
            .timeout(UPLOAD_TIMEOUT)
            .bearer_auth(&self.api_key)
            .header("apikey", &self.api_key)
            .header("x-upsert", "true")
            .header(CONTENT_TYPE, image.media_type.mime())
            .body(image.bytes.clone())
            .send()
            .await?;

        if !response.status().is_success() {
            let code = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::Rejected { code, body });
        }

        Ok(UploadResult {
            public_url: self.public_url(&object_path),
            object_path,
            file_name,
        })
    }

    pub fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, BUCKET, object_path
        )
    }
}

/// Builds the timestamped name and full object path for one upload attempt.
/// Millisecond stamps keep keys apart in practice; two uploads of the same
/// name in the same millisecond would still collide, and the second one
/// wins via upsert.
fn timestamped_key(file_name: &str, timestamp_ms: i64) -> (String, String) {
    let stamped = format!("{}-{}", timestamp_ms, file_name);
    let path = format!("{}/{}", KEY_PREFIX, stamped);
    (stamped, path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamped_key_layout() {
        let (name, path) = timestamped_key("photo.png", 1700000000000);
        assert_eq!(name, "1700000000000-photo.png");
        assert_eq!(path, "originals/1700000000000-photo.png");
    }

    #[test]
    fn test_public_url_derivation() {
        let client = StorageClient::new("https://abc.supabase.co", "anon-key");
        assert_eq!(
            client.public_url("originals/1700000000000-photo.png"),
            "https://abc.supabase.co/storage/v1/object/public/images/originals/1700000000000-photo.png"
        );
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = StorageClient::new("https://abc.supabase.co/", "anon-key");
        assert_eq!(
            client.public_url("originals/x.png"),
            "https://abc.supabase.co/storage/v1/object/public/images/originals/x.png"
        );
    }
}
