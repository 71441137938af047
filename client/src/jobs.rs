//! Job listing, counting and search.

use crate::error::Result;
use crate::http::HttpClient;
use common::{Job, JobCounts, JobListQuery, JobPage, JobSearchQuery, JobStatistics};
use serde::Deserialize;
use tracing::{error, info};

// Some deployments return a bare array for the listing endpoint.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageOrList<T> {
    Page(JobPage<T>),
    List(Vec<T>),
}

#[derive(Debug, Clone)]
pub struct JobsService {
    http: HttpClient,
}

impl JobsService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// `GET /jobs?page=&size=&status=`
    pub async fn list_jobs(&self, query: &JobListQuery) -> Result<JobPage<Job>> {
        let params = list_params(query);
        let response: PageOrList<Job> = self.http.get("/jobs", &params).await.map_err(|e| {
            error!(page = query.page, size = query.size, status = %query.status, error = %e, "Error fetching jobs");
            e
        })?;

        Ok(match response {
            PageOrList::Page(page) => page,
            PageOrList::List(items) => JobPage::from_unpaged(items, query.page, query.size),
        })
    }

    /// `GET /jobs/count`
    pub async fn count_jobs(&self) -> Result<JobCounts> {
        self.http.get("/jobs/count", &[]).await.map_err(|e| {
            error!(error = %e, "Error fetching job counts");
            e
        })
    }

    /// `GET /jobs/search` with only the parameters that carry a filter
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> Result<JobPage<Job>> {
        let params = search_params(query);
        let page: JobPage<Job> = self
            .http
            .get("/jobs/search", &params)
            .await
            .map_err(|e| {
                error!(error = %e, "Error searching jobs");
                e
            })?;

        info!(
            keyword = query.keyword.as_deref().unwrap_or(""),
            results = page.content.len(),
            total = page.total_elements,
            "job search complete"
        );
        Ok(page)
    }

    /// `GET /jobs/{id}`
    pub async fn get_job(&self, job_id: i64) -> Result<Job> {
        self.http
            .get(&format!("/jobs/{}", job_id), &[])
            .await
            .map_err(|e| {
                error!(job_id, error = %e, "Error fetching job");
                e
            })
    }

    /// `GET /jobs/statistics`
    pub async fn job_statistics(&self) -> Result<JobStatistics> {
        self.http.get("/jobs/statistics", &[]).await.map_err(|e| {
            error!(error = %e, "Error fetching job statistics");
            e
        })
    }
}

/// page and size are sent verbatim; status always goes out, `ALL` included.
fn list_params(query: &JobListQuery) -> Vec<(&'static str, String)> {
    vec![
        ("page", query.page.to_string()),
        ("size", query.size.to_string()),
        ("status", query.status.to_string()),
    ]
}

/// Page index 0 is valid and must survive; an empty keyword, a zero size and
/// the `ALL` status mean "no filter" and are left out.
fn search_params(query: &JobSearchQuery) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    if let Some(keyword) = query.keyword.as_deref().filter(|k| !k.is_empty()) {
        params.push(("keyword", keyword.to_string()));
    }
    if let Some(page) = query.page {
        params.push(("page", page.to_string()));
    }
    if let Some(size) = query.size.filter(|s| *s > 0) {
        params.push(("size", size.to_string()));
    }
    if let Some(status) = query.status.filter(|s| !s.is_all()) {
        params.push(("status", status.to_string()));
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StatusFilter;
    use mockito::{Matcher, Server};

    const PAGE_BODY: &str = r#"{
        "content": [{"jobId": 1, "title": "Backend Developer", "status": "APPROVED"}],
        "totalPages": 3,
        "totalElements": 17,
        "number": 0,
        "size": 8,
        "empty": false
    }"#;

    fn service(url: String) -> JobsService {
        JobsService::new(HttpClient::new(url, None).unwrap())
    }

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_list_params_default_status_all() {
        let params = list_params(&JobListQuery::new(2, 20));
        assert_eq!(
            params,
            vec![
                ("page", "2".to_string()),
                ("size", "20".to_string()),
                ("status", "ALL".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_params_keep_page_zero() {
        let params = search_params(&JobSearchQuery {
            page: Some(0),
            ..Default::default()
        });
        assert_eq!(params, vec![("page", "0".to_string())]);
    }

    #[test]
    fn test_search_params_omit_all_status() {
        let params = search_params(&JobSearchQuery {
            status: Some(StatusFilter::All),
            ..Default::default()
        });
        assert!(params.is_empty());

        let params = search_params(&JobSearchQuery {
            status: Some(StatusFilter::Pending),
            ..Default::default()
        });
        assert_eq!(params, vec![("status", "PENDING".to_string())]);
    }

    #[test]
    fn test_search_params_omit_empty_keyword_and_zero_size() {
        let params = search_params(&JobSearchQuery {
            keyword: Some(String::new()),
            page: None,
            size: Some(0),
            status: None,
        });
        assert!(params.is_empty());
    }

    #[test]
    fn test_search_params_order() {
        let params = search_params(&JobSearchQuery {
            keyword: Some("rust developer".to_string()),
            page: Some(1),
            size: Some(10),
            status: Some(StatusFilter::Approved),
        });
        assert_eq!(keys(&params), vec!["keyword", "page", "size", "status"]);
        assert_eq!(params[0].1, "rust developer");
    }

    #[tokio::test]
    async fn test_list_jobs_sends_page_size_status() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "0".into()),
                Matcher::UrlEncoded("size".into(), "8".into()),
                Matcher::UrlEncoded("status".into(), "ALL".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PAGE_BODY)
            .create_async()
            .await;

        let page = service(server.url())
            .list_jobs(&JobListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].title, "Backend Developer");
        assert_eq!(page.total_elements, 17);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_list_jobs_paginates_bare_array() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"[{"jobId":1,"title":"a"},{"jobId":2,"title":"b"},{"jobId":3,"title":"c"}]"#,
            )
            .create_async()
            .await;

        let page = service(server.url())
            .list_jobs(&JobListQuery::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].job_id, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_jobs_propagates_server_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body(r#"{"message":"boom"}"#)
            .create_async()
            .await;

        let err = service(server.url())
            .list_jobs(&JobListQuery::default())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_count_jobs() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs/count")
            .with_status(200)
            .with_body(r#"[{"status":"PENDING","count":2},{"status":"APPROVED","count":6}]"#)
            .create_async()
            .await;

        let counts = service(server.url()).count_jobs().await.unwrap();
        assert_eq!(counts.total, 8);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.approved, 6);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_count_jobs_error_shaped_body_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/count")
            .with_status(200)
            .with_body(r#"{"error":"Internal Server Error","path":"/api/jobs/count"}"#)
            .create_async()
            .await;

        let err = service(server.url()).count_jobs().await.unwrap_err();
        assert!(matches!(err, crate::ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_job_statistics_empty_object_is_malformed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/statistics")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let err = service(server.url()).job_statistics().await.unwrap_err();
        assert!(matches!(err, crate::ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_search_jobs_exact_query() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs/search")
            .match_query(Matcher::Exact("keyword=java&page=0&size=10".into()))
            .with_status(200)
            .with_body(PAGE_BODY)
            .create_async()
            .await;

        let query = JobSearchQuery {
            keyword: Some("java".to_string()),
            page: Some(0),
            size: Some(10),
            status: Some(StatusFilter::All),
        };
        let page = service(server.url()).search_jobs(&query).await.unwrap();
        assert_eq!(page.total_pages, 3);

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_jobs_rejects_page_without_content() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/jobs/search")
            .with_status(200)
            .with_body(r#"{"totalPages": 0}"#)
            .create_async()
            .await;

        let err = service(server.url())
            .search_jobs(&JobSearchQuery::default())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ClientError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_get_job_and_statistics() {
        let mut server = Server::new_async().await;
        let job_mock = server
            .mock("GET", "/jobs/42")
            .with_status(200)
            .with_body(r#"{"jobId":42,"title":"SRE","location":"Hanoi"}"#)
            .create_async()
            .await;
        let stats_mock = server
            .mock("GET", "/jobs/statistics")
            .with_status(200)
            .with_body(r#"{"totalViews":120,"totalApplies":9}"#)
            .create_async()
            .await;

        let jobs = service(server.url());
        let job = jobs.get_job(42).await.unwrap();
        assert_eq!(job.location.as_deref(), Some("Hanoi"));
        let stats = jobs.job_statistics().await.unwrap();
        assert_eq!(stats.total_views, 120);
        assert_eq!(stats.total_applies, 9);

        job_mock.assert_async().await;
        stats_mock.assert_async().await;
    }
}
