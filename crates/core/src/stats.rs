//! Aggregation of the memo list for dashboards and charts.
//!
//! Both aggregates produce plain label/value series; drawing bars, lines,
//! and colors is the embedding application's concern. Callers pass whatever
//! memo slice they want aggregated, typically the currently filtered list.

use crate::datefmt::thai_short_date;
use crate::memo::Memo;
use chrono::{Datelike, NaiveDate};
use memoreg_types::NonEmptyText;

/// Granularity of the time-bucketed aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBucket {
    /// One bucket per calendar day, keyed by the short Thai date.
    Day,
    /// One bucket per calendar month, keyed `YYYY-MM`.
    Month,
    /// One bucket per calendar year, keyed `YYYY`.
    Year,
}

impl TimeBucket {
    fn key_for(self, date: NaiveDate) -> String {
        match self {
            TimeBucket::Day => thai_short_date(date),
            TimeBucket::Month => format!("{:04}-{:02}", date.year(), date.month()),
            TimeBucket::Year => format!("{:04}", date.year()),
        }
    }
}

/// Headline numbers for the dashboard: the list total plus one count per
/// department.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub by_department: Vec<(String, u64)>,
}

/// Counts memos per known department.
///
/// The series follows the department list's order and reports an explicit
/// zero for departments with no matching memos. Memos referencing a
/// department that is no longer in the list are counted nowhere.
pub fn department_counts(memos: &[Memo], departments: &[NonEmptyText]) -> Vec<(String, u64)> {
    departments
        .iter()
        .map(|dept| {
            let count = memos
                .iter()
                .filter(|memo| memo.department == dept.as_str())
                .count() as u64;
            (dept.as_str().to_owned(), count)
        })
        .collect()
}

/// Computes the dashboard headline numbers for a memo slice.
pub fn dashboard(memos: &[Memo], departments: &[NonEmptyText]) -> DashboardStats {
    DashboardStats {
        total: memos.len(),
        by_department: department_counts(memos, departments),
    }
}

/// Counts memos per time bucket at the given granularity.
///
/// Buckets appear in chronological order of first occurrence after sorting
/// the memos by date ascending. Memos whose date does not parse contribute
/// no bucket.
pub fn time_bucket_counts(memos: &[Memo], bucket: TimeBucket) -> Vec<(String, u64)> {
    let mut dated: Vec<NaiveDate> = memos
        .iter()
        .filter_map(|memo| {
            let date = memo.calendar_date();
            if date.is_none() {
                tracing::debug!(
                    "skipping memo {} with unparseable date {:?}",
                    memo.id,
                    memo.date
                );
            }
            date
        })
        .collect();
    dated.sort();

    let mut series: Vec<(String, u64)> = Vec::new();
    for date in dated {
        let key = bucket.key_for(date);
        match series.iter_mut().find(|(label, _)| *label == key) {
            Some((_, count)) => *count += 1,
            None => series.push((key, 1)),
        }
    }
    series
}
