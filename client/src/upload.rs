//! Media upload adapter for the third-party storage provider.
//!
//! The provider authenticates uploads by an unsigned preset bound to an
//! account, and rejects requests that carry this application's own bearer
//! token. Every upload therefore goes out with the Authorization header
//! explicitly removed.

use crate::config::UploadConfig;
use crate::error::{ClientError, Result, INVALID_UPLOAD_RESPONSE, UPLOAD_FAILED};
use crate::http::{HttpClient, RequestOptions};
use async_trait::async_trait;
use common::ResumeFile;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Deserialize;
use tracing::{debug, error, info};

/// Uploads a file and returns its public URL
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(&self, file: Option<ResumeFile>) -> Result<String>;
}

#[derive(Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CloudUploader {
    http: HttpClient,
    config: UploadConfig,
}

impl CloudUploader {
    pub fn new(http: HttpClient, config: UploadConfig) -> Self {
        Self { http, config }
    }

    pub fn endpoint(&self) -> String {
        self.config.endpoint()
    }

    /// No Authorization, and no JSON content type so the multipart boundary is set by the body.
    fn request_options() -> RequestOptions {
        RequestOptions::without_auth().remove(CONTENT_TYPE)
    }

    fn form(&self, file: ResumeFile) -> Result<Form> {
        let mut part = Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| ClientError::Upload(format!("invalid content type: {e}")))?;
        }

        Ok(Form::new()
            .part("file", part)
            .text("upload_preset", self.config.upload_preset.clone()))
    }
}

#[async_trait]
impl MediaUploader for CloudUploader {
    async fn upload(&self, file: Option<ResumeFile>) -> Result<String> {
        let file = file.ok_or_else(|| {
            error!("Upload attempted without a file");
            ClientError::NoFileProvided
        })?;

        let url = self.endpoint();
        let file_name = file.file_name.clone();
        let size = file.bytes.len();
        let form = self.form(file)?;

        debug!(%url, file = %file_name, size, "uploading file");
        let response = self
            .http
            .request(Method::POST, &url, &Self::request_options())
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Error uploading file to cloud");
                ClientError::Upload(UPLOAD_FAILED.to_string())
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!(error = %e, "Error reading upload response");
            ClientError::Upload(UPLOAD_FAILED.to_string())
        })?;

        if !status.is_success() {
            let message = provider_message(&body).unwrap_or_else(|| UPLOAD_FAILED.to_string());
            error!(status = status.as_u16(), %message, "Error uploading file to cloud");
            return Err(ClientError::Upload(message));
        }

        let secure_url = serde_json::from_str::<UploadResponse>(&body)
            .ok()
            .and_then(|r| r.secure_url)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| {
                error!(body = %body, "Upload response has no secure_url");
                ClientError::malformed(INVALID_UPLOAD_RESPONSE)
            })?;

        info!(file = %file_name, url = %secure_url, "file uploaded");
        Ok(secure_url)
    }
}

/// The provider reports failures as `{"error": {"message": ..}}`; older
/// endpoints use a top-level `message`.
fn provider_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}
