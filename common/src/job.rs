use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Moderation status of a posted job
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Pending,
    Approved,
    Rejected,
    Deleted,
}

/// Status filter used by list and search queries.
///
/// `All` is a sentinel understood by the listing endpoint; the search
/// endpoint expects it to be left out entirely.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Approved,
    Rejected,
    Deleted,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "ALL",
            StatusFilter::Pending => "PENDING",
            StatusFilter::Approved => "APPROVED",
            StatusFilter::Rejected => "REJECTED",
            StatusFilter::Deleted => "DELETED",
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, StatusFilter::All)
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for StatusFilter {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "ALL" => Ok(StatusFilter::All),
            "PENDING" => Ok(StatusFilter::Pending),
            "APPROVED" => Ok(StatusFilter::Approved),
            "REJECTED" => Ok(StatusFilter::Rejected),
            "DELETED" => Ok(StatusFilter::Deleted),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A job posting as returned by the backend
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub job_id: i64,
    pub title: String,
    #[serde(default)]
    pub employer_id: Option<i64>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub company_logo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub salary_currency: Option<String>,
    #[serde(default)]
    pub apply_count: Option<i64>,
    #[serde(default)]
    pub view_count: Option<i64>,
    #[serde(default)]
    pub posted_at: Option<String>,
    #[serde(default)]
    pub expire_at: Option<String>,
    #[serde(default)]
    pub is_salary_public: Option<bool>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub status: Option<JobStatus>,
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One page of results, shaped like the backend's paged responses
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct JobPage<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub empty: bool,
}

impl<T> JobPage<T> {
    /// Slices an unpaginated list into the requested page.
    ///
    /// Some endpoints answer with a bare array instead of a page object;
    /// this keeps callers working against a single shape.
    pub fn from_unpaged(mut items: Vec<T>, page: u32, size: u32) -> Self {
        let total = items.len();
        let start = (page as usize).saturating_mul(size as usize).min(total);
        let end = start.saturating_add(size as usize).min(total);
        let content: Vec<T> = items.drain(start..end).collect();
        let total_pages = if size == 0 {
            0
        } else {
            total.div_ceil(size as usize) as u64
        };

        JobPage {
            empty: content.is_empty(),
            content,
            total_pages,
            total_elements: total as u64,
            number: page,
            size,
        }
    }
}

/// Paginated listing query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobListQuery {
    pub page: u32,
    pub size: u32,
    pub status: StatusFilter,
}

impl Default for JobListQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: 8,
            status: StatusFilter::All,
        }
    }
}

impl JobListQuery {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }
}

/// Keyword search query. Every field is optional; see `JobsService::search_jobs`
/// for which ones end up on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSearchQuery {
    pub keyword: Option<String>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status: Option<StatusFilter>,
}

/// Number of jobs in each moderation status
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(try_from = "CountsWire")]
pub struct JobCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
    pub deleted: u64,
}

#[derive(Deserialize)]
struct StatusCount {
    status: JobStatus,
    count: u64,
}

#[derive(Deserialize)]
struct CountsTotals {
    total: Option<u64>,
    pending: Option<u64>,
    approved: Option<u64>,
    rejected: Option<u64>,
    deleted: Option<u64>,
}

// The counts endpoint has answered both as a list of {status, count}
// rows and as a flat object over time.
#[derive(Deserialize)]
#[serde(untagged)]
enum CountsWire {
    ByStatus(Vec<StatusCount>),
    Totals(CountsTotals),
}

impl TryFrom<CountsWire> for JobCounts {
    type Error = String;

    fn try_from(wire: CountsWire) -> Result<Self, Self::Error> {
        match wire {
            CountsWire::ByStatus(rows) => {
                let mut counts = JobCounts::default();
                for row in rows {
                    let slot = match row.status {
                        JobStatus::Pending => &mut counts.pending,
                        JobStatus::Approved => &mut counts.approved,
                        JobStatus::Rejected => &mut counts.rejected,
                        JobStatus::Deleted => &mut counts.deleted,
                    };
                    *slot = slot
                        .checked_add(row.count)
                        .ok_or_else(|| format!("{:?} count overflows u64", row.status))?;
                    counts.total = counts
                        .total
                        .checked_add(row.count)
                        .ok_or_else(|| "total job count overflows u64".to_string())?;
                }
                Ok(counts)
            }
            CountsWire::Totals(t) => {
                let fields = [t.total, t.pending, t.approved, t.rejected, t.deleted];
                if fields.iter().all(Option::is_none) {
                    return Err("job counts object has no known status field".to_string());
                }
                Ok(JobCounts {
                    total: t.total.unwrap_or(0),
                    pending: t.pending.unwrap_or(0),
                    approved: t.approved.unwrap_or(0),
                    rejected: t.rejected.unwrap_or(0),
                    deleted: t.deleted.unwrap_or(0),
                })
            }
        }
    }
}

/// Aggregate view/apply counters across all jobs
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct JobStatistics {
    pub total_views: u64,
    pub total_applies: u64,
}
