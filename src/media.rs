//! Image hosting seam. Uploads go to the CDN, the public URL comes from
//! a second call to the storage API.

use crate::content::slugify;
use anyhow::{anyhow, Context, Result};
use log::info;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::env;

pub struct MediaClient {
    http: reqwest::Client,
    upload_url: String,
    api_key: String,
    storage_url: String,
}

/// What the client receives after an upload.
#[derive(Serialize, Debug)]
pub struct ServerMedia {
    pub file_name: String,
    pub url: String,
}

/// What the client sends to upload an image.
#[derive(Deserialize, Debug)]
pub struct UploadRequest<'a> {
    pub file_name: &'a str,
    pub content_type: &'a str,
    /// Base64-encoded image bytes.
    pub data: &'a str,
}

#[derive(Deserialize)]
struct PublicUrl {
    url: String,
}

impl MediaClient {
    pub fn from_env() -> Self {
        MediaClient {
            http: reqwest::Client::new(),
            upload_url: env::var("CDN_UPLOAD_URL").expect("CDN_UPLOAD_URL must be set"),
            api_key: env::var("CDN_API_KEY").expect("CDN_API_KEY must be set"),
            storage_url: env::var("CDN_STORAGE_URL").expect("CDN_STORAGE_URL must be set"),
        }
    }

    /// Push one image to the CDN, then ask the storage API for its
    /// public URL. No timeout is set on either call.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> Result<ServerMedia> {
        info!("uploading {} ({} bytes) to CDN", file_name, data.len());

        let target = format!("{}/{}", self.upload_url.trim_end_matches('/'), file_name);
        let response = self
            .http
            .post(&target)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, content_type)
            .body(data)
            .send()
            .await
            .context("CDN upload request failed")?;
        if !response.status().is_success() {
            return Err(anyhow!(
                "CDN rejected upload of {}: {}",
                file_name,
                response.status()
            ));
        }

        let meta = format!(
            "{}/{}/public-url",
            self.storage_url.trim_end_matches('/'),
            file_name
        );
        let public: PublicUrl = self
            .http
            .get(&meta)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .context("storage public-url request failed")?
            .error_for_status()
            .context("storage rejected the public-url request")?
            .json()
            .await
            .context("storage returned a malformed public-url body")?;

        Ok(ServerMedia {
            file_name: file_name.to_string(),
            url: public.url,
        })
    }
}

/// CDN object name for an uploaded file: slugified stem, original
/// extension kept when present.
pub fn safe_file_name(original: &str) -> String {
    match original.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            format!("{}.{}", slugify(stem), slugify(ext))
        }
        _ => slugify(original),
    }
}

#[test]
fn file_names_are_slugified_keeping_the_extension() {
    assert_eq!(safe_file_name("Lake Bled (1).PNG"), "lake-bled-1.png");
}

#[test]
fn file_name_without_extension_is_slugified_whole() {
    assert_eq!(safe_file_name("Piran Harbour"), "piran-harbour");
}

#[test]
fn hidden_file_names_do_not_produce_empty_stems() {
    assert_eq!(safe_file_name(".env"), "env");
}
