//! Job applications: submit with résumé upload, and list/update.

use crate::error::Result;
use crate::http::HttpClient;
use crate::upload::MediaUploader;
use common::{Application, ApplicationRequest, ApplicationStatus, ResumeFile};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct ApplicationService {
    http: HttpClient,
    uploader: Arc<dyn MediaUploader>,
}

impl ApplicationService {
    pub fn new(http: HttpClient, uploader: Arc<dyn MediaUploader>) -> Self {
        Self { http, uploader }
    }

    /// Upload the résumé, then create the application referencing its URL.
    ///
    /// The two steps are not transactional. If the upload fails nothing is
    /// submitted. If the submission fails the uploaded file stays on the
    /// storage provider; its URL is logged so it can be cleaned up by hand.
    pub async fn apply_for_job(
        &self,
        job_id: i64,
        applicant_id: i64,
        cover_letter: impl Into<String>,
        resume_file: Option<ResumeFile>,
    ) -> Result<Application> {
        let resume_url = self.uploader.upload(resume_file).await.map_err(|e| {
            error!(job_id, applicant_id, error = %e, "Error applying for job: resume upload failed");
            e
        })?;

        let request = ApplicationRequest {
            job_id,
            applicant_id,
            cover_letter: cover_letter.into(),
            resume_url,
        };

        match self.http.post::<_, Application>("/applications", &request).await {
            Ok(application) => {
                info!(job_id, applicant_id, application_id = application.id, "application submitted");
                Ok(application)
            }
            Err(e) => {
                error!(job_id, applicant_id, error = %e, "Error applying for job");
                warn!(resume_url = %request.resume_url, "uploaded resume left orphaned after failed submission");
                Err(e)
            }
        }
    }

    /// `GET /applications/applicant/{id}`
    pub async fn get_applications_by_applicant(&self, applicant_id: i64) -> Result<Vec<Application>> {
        self.http
            .get(&format!("/applications/applicant/{}", applicant_id), &[])
            .await
            .map_err(|e| {
                error!(applicant_id, error = %e, "Error fetching applications");
                e
            })
    }

    /// `GET /applications/job/{id}`
    pub async fn get_applications_by_job(&self, job_id: i64) -> Result<Vec<Application>> {
        self.http
            .get(&format!("/applications/job/{}", job_id), &[])
            .await
            .map_err(|e| {
                error!(job_id, error = %e, "Error fetching job applications");
                e
            })
    }

    /// `GET /applications/employer/{id}`
    pub async fn get_applications_by_employer(&self, employer_id: i64) -> Result<Vec<Application>> {
        self.http
            .get(&format!("/applications/employer/{}", employer_id), &[])
            .await
            .map_err(|e| {
                error!(employer_id, error = %e, "Error fetching employer applications");
                e
            })
    }

    /// `PUT /applications/{id}/status?status=`
    pub async fn update_application_status(
        &self,
        application_id: i64,
        status: ApplicationStatus,
    ) -> Result<Application> {
        self.http
            .put(
                &format!("/applications/{}/status", application_id),
                &[("status", status.to_string())],
            )
            .await
            .map_err(|e| {
                error!(application_id, %status, error = %e, "Error updating application status");
                e
            })
    }

    /// `PUT /applications/{id}/view`
    pub async fn mark_application_viewed(&self, application_id: i64) -> Result<Application> {
        self.http
            .put(&format!("/applications/{}/view", application_id), &[])
            .await
            .map_err(|e| {
                error!(application_id, error = %e, "Error marking application viewed");
                e
            })
    }
}
