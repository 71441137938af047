//! GoodJob client - REST services for the job board backend
//!
//! Wraps the jobs and applications endpoints of the backend and the
//! third-party upload provider used for résumés.

pub mod applications;
pub mod config;
pub mod error;
pub mod http;
pub mod jobs;
pub mod token;
pub mod upload;

use std::sync::Arc;

// Re-export commonly used types
pub use applications::ApplicationService;
pub use config::{ClientConfig, ResourceType, UploadConfig};
pub use error::{ClientError, Result};
pub use http::{HeaderOverride, HttpClient, RequestOptions};
pub use jobs::JobsService;
pub use token::{CredentialStore, FileStore, MemoryStore, StoredTokens, TokenProvider};
pub use upload::{CloudUploader, MediaUploader};

/// Every service wired to one shared HTTP client
#[derive(Clone)]
pub struct GoodJob {
    pub jobs: JobsService,
    pub applications: ApplicationService,
}

impl GoodJob {
    /// Build the services from a configuration.
    ///
    /// When `tokens` is `None` and the configuration names a token file,
    /// credentials are read from that file.
    pub fn new(config: &ClientConfig, tokens: Option<Arc<dyn TokenProvider>>) -> Result<Self> {
        let tokens = tokens.or_else(|| {
            config
                .token_file
                .as_ref()
                .map(|path| Arc::new(StoredTokens::new(FileStore::new(path))) as Arc<dyn TokenProvider>)
        });

        let http = HttpClient::new(config.base_url.clone(), tokens)?;
        let uploader = Arc::new(CloudUploader::new(http.clone(), config.upload.clone()));

        Ok(Self {
            jobs: JobsService::new(http.clone()),
            applications: ApplicationService::new(http, uploader),
        })
    }
}
