use serde::{Deserialize, Serialize};
use std::fmt;

/// Review state of a job application
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Reviewing,
    Approved,
    Rejected,
    Withdrawn,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Reviewing => "REVIEWING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Withdrawn => "WITHDRAWN",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body sent to create an application once the résumé has been uploaded
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    pub job_id: i64,
    pub applicant_id: i64,
    pub cover_letter: String,
    pub resume_url: String,
}

/// An application as returned by the backend.
///
/// Listing endpoints return a flattened view; the create endpoint returns
/// the stored record, so only `id` is guaranteed.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: i64,
    #[serde(default)]
    pub job_id: Option<i64>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub applicant_id: Option<i64>,
    #[serde(default)]
    pub applicant_name: Option<String>,
    #[serde(default)]
    pub applicant_email: Option<String>,
    #[serde(default)]
    pub employer_id: Option<i64>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub applied_at: Option<String>,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    #[serde(default)]
    pub employer_viewed: Option<bool>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
}

/// Résumé picked by the applicant. Consumed by the upload; never stored.
#[derive(Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            content_type: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

impl fmt::Debug for ResumeFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResumeFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .field("content_type", &self.content_type)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_camel_case() {
        let request = ApplicationRequest {
            job_id: 3,
            applicant_id: 9,
            cover_letter: "Hello".to_string(),
            resume_url: "https://cdn.example/cv.pdf".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "jobId": 3,
                "applicantId": 9,
                "coverLetter": "Hello",
                "resumeUrl": "https://cdn.example/cv.pdf"
            })
        );
    }

    #[test]
    fn test_application_ignores_nested_records() {
        let app: Application = serde_json::from_str(
            r#"{"id": 1, "job": {"jobId": 3}, "coverLetter": "Hi", "status": "REVIEWING"}"#,
        )
        .unwrap();
        assert_eq!(app.id, 1);
        assert_eq!(app.status, Some(ApplicationStatus::Reviewing));
        assert!(app.job_id.is_none());
    }

    #[test]
    fn test_resume_debug_omits_bytes() {
        let file = ResumeFile::new("cv.pdf", vec![1, 2, 3]).with_content_type("application/pdf");
        let debug = format!("{:?}", file);
        assert!(debug.contains("len: 3"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
