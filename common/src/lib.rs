//! Shared data model for the GoodJob client.
//!
//! Everything here mirrors the JSON the job-board backend speaks (camelCase
//! field names, upper-case status enums), so the same types are decoded by
//! the `client` crate and printed by the `goodjob` CLI.

mod application;
mod job;
mod salary;

pub use application::{Application, ApplicationRequest, ApplicationStatus, ResumeFile};
pub use job::{
    Job, JobCounts, JobListQuery, JobPage, JobSearchQuery, JobStatistics, JobStatus,
    StatusFilter, UnknownStatus,
};
pub use salary::{SalaryRange, salary_bounds};
