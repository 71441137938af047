use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Salary bracket offered by the search filter, in VND.
///
/// Only the mapping lives here; the search endpoint does not take it yet.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SalaryRange {
    #[serde(rename = "UNDER_10M")]
    Under10M,
    #[serde(rename = "10M_20M")]
    From10MTo20M,
    #[serde(rename = "20M_30M")]
    From20MTo30M,
    #[serde(rename = "ABOVE_30M")]
    Above30M,
}

impl SalaryRange {
    /// Lower and upper bound; `None` means unbounded on that side.
    pub fn bounds(&self) -> (Option<u64>, Option<u64>) {
        match self {
            SalaryRange::Under10M => (Some(0), Some(10_000_000)),
            SalaryRange::From10MTo20M => (Some(10_000_000), Some(20_000_000)),
            SalaryRange::From20MTo30M => (Some(20_000_000), Some(30_000_000)),
            SalaryRange::Above30M => (Some(30_000_000), None),
        }
    }
}

impl FromStr for SalaryRange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "UNDER_10M" => Ok(SalaryRange::Under10M),
            "10M_20M" => Ok(SalaryRange::From10MTo20M),
            "20M_30M" => Ok(SalaryRange::From20MTo30M),
            "ABOVE_30M" => Ok(SalaryRange::Above30M),
            _ => Err(()),
        }
    }
}

/// Maps a raw filter value to bounds; absent or unrecognized values are unbounded.
pub fn salary_bounds(raw: Option<&str>) -> (Option<u64>, Option<u64>) {
    raw.and_then(|value| value.parse::<SalaryRange>().ok())
        .map(|range| range.bounds())
        .unwrap_or((None, None))
}
