use crate::error::{ClientError, Result};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_UPLOAD_URL: &str = "https://api.cloudinary.com/v1_1";
pub const DEFAULT_CLOUD_NAME: &str = "dqf2xhz2e";
pub const DEFAULT_UPLOAD_PRESET: &str = "goodjob";

/// Delivery type segment of the upload URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResourceType {
    #[default]
    Raw,
    Auto,
    Image,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Raw => "raw",
            ResourceType::Auto => "auto",
            ResourceType::Image => "image",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" => Ok(ResourceType::Raw),
            "auto" => Ok(ResourceType::Auto),
            "image" => Ok(ResourceType::Image),
            other => Err(ClientError::config(format!(
                "unknown upload resource type: {other}"
            ))),
        }
    }
}

/// Settings for the third-party media upload provider
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Provider API root, without the account segment
    pub base_url: String,
    /// Account the unsigned preset is bound to
    pub cloud_name: String,
    pub upload_preset: String,
    pub resource_type: ResourceType,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPLOAD_URL.to_string(),
            cloud_name: DEFAULT_CLOUD_NAME.to_string(),
            upload_preset: DEFAULT_UPLOAD_PRESET.to_string(),
            resource_type: ResourceType::Raw,
        }
    }
}

impl UploadConfig {
    /// Full upload endpoint, e.g. `https://api.cloudinary.com/v1_1/<account>/raw/upload`
    pub fn endpoint(&self) -> String {
        format!(
            "{}/{}/{}/upload",
            self.base_url.trim_end_matches('/'),
            self.cloud_name,
            self.resource_type
        )
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL; endpoint paths are appended to it
    pub base_url: String,

    pub upload: UploadConfig,

    /// JSON file holding persisted credentials, if any
    pub token_file: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            upload: UploadConfig::default(),
            token_file: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = Some(path.into());
        self
    }

    /// Build a configuration from `GOODJOB_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// Unset or blank variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = ClientConfig::default();

        if let Some(url) = var("GOODJOB_API_URL") {
            config.base_url = url;
        }
        if let Some(url) = var("GOODJOB_UPLOAD_URL") {
            config.upload.base_url = url;
        }
        if let Some(name) = var("GOODJOB_CLOUD_NAME") {
            config.upload.cloud_name = name;
        }
        if let Some(preset) = var("GOODJOB_UPLOAD_PRESET") {
            config.upload.upload_preset = preset;
        }
        if let Some(kind) = var("GOODJOB_UPLOAD_RESOURCE") {
            config.upload.resource_type = kind.parse()?;
        }
        if let Some(path) = var("GOODJOB_TOKEN_FILE") {
            config.token_file = Some(PathBuf::from(path));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_client_config_default() {
        let cfg = ClientConfig::default();
        assert_eq!(cfg.base_url, "http://localhost:8080/api");
        assert_eq!(cfg.upload.upload_preset, "goodjob");
        assert_eq!(cfg.upload.resource_type, ResourceType::Raw);
        assert!(cfg.token_file.is_none());
    }

    #[test]
    fn test_upload_endpoint_joins_segments() {
        let upload = UploadConfig {
            base_url: "https://uploads.example/v1_1/".to_string(),
            cloud_name: "acme".to_string(),
            ..Default::default()
        };
        assert_eq!(
            upload.endpoint(),
            "https://uploads.example/v1_1/acme/raw/upload"
        );
    }

    #[test]
    fn test_from_lookup_applies_overrides() {
        let cfg = ClientConfig::from_lookup(lookup(&[
            ("GOODJOB_API_URL", "https://jobs.example/api"),
            ("GOODJOB_CLOUD_NAME", "acme"),
            ("GOODJOB_UPLOAD_RESOURCE", "auto"),
            ("GOODJOB_TOKEN_FILE", "/tmp/tokens.json"),
        ]))
        .unwrap();
        assert_eq!(cfg.base_url, "https://jobs.example/api");
        assert_eq!(cfg.upload.cloud_name, "acme");
        assert_eq!(cfg.upload.resource_type, ResourceType::Auto);
        assert_eq!(cfg.token_file, Some(PathBuf::from("/tmp/tokens.json")));
    }

    #[test]
    fn test_from_lookup_ignores_blank_values() {
        let cfg = ClientConfig::from_lookup(lookup(&[("GOODJOB_API_URL", "  ")])).unwrap();
        assert_eq!(cfg.base_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_from_lookup_rejects_unknown_resource_type() {
        let err = ClientConfig::from_lookup(lookup(&[("GOODJOB_UPLOAD_RESOURCE", "video")]))
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }
}
