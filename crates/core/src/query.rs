//! Filtering, sorting, and pagination of the memo list.
//!
//! Everything here is a pure function over a memo slice: the repository
//! owns the data, callers own the filter and sort state, and this module
//! computes the visible page.

use crate::constants::PAGE_SIZE;
use crate::memo::Memo;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Filter specification. Absent fields impose no constraint; active
/// predicates combine with logical AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoFilter {
    /// Case-insensitive substring match against the subject.
    pub subject: Option<String>,
    /// Exact teacher name.
    pub teacher: Option<String>,
    /// Exact department name.
    pub department: Option<String>,
    /// Inclusive lower bound on the memo date.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on the memo date.
    pub end_date: Option<NaiveDate>,
}

impl MemoFilter {
    /// Whether `memo` passes every active predicate.
    ///
    /// When either date bound is active, a memo whose date does not parse
    /// fails the filter.
    pub fn matches(&self, memo: &Memo) -> bool {
        if let Some(needle) = &self.subject {
            if !memo
                .subject
                .to_lowercase()
                .contains(&needle.to_lowercase())
            {
                return false;
            }
        }
        if let Some(teacher) = &self.teacher {
            if &memo.teacher != teacher {
                return false;
            }
        }
        if let Some(department) = &self.department {
            if &memo.department != department {
                return false;
            }
        }
        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(date) = memo.calendar_date() else {
                return false;
            };
            if let Some(start) = self.start_date {
                if date < start {
                    return false;
                }
            }
            if let Some(end) = self.end_date {
                if date > end {
                    return false;
                }
            }
        }
        true
    }
}

/// The sortable memo fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    MemoNumber,
    Date,
    Teacher,
    Subject,
    Department,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Sort key plus direction.
///
/// The default matches the list's initial presentation: newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub key: SortKey,
    pub order: SortOrder,
}

impl Default for SortSpec {
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            order: SortOrder::Descending,
        }
    }
}

impl SortSpec {
    /// Applies a header click: the same key toggles the direction, a new
    /// key resets to ascending.
    pub fn click(&mut self, key: SortKey) {
        self.order = if self.key == key && self.order == SortOrder::Ascending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };
        self.key = key;
    }
}

/// One visible page of the filtered, sorted memo list.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPage {
    /// The memos on this page, at most `page_size` of them.
    pub memos: Vec<Memo>,
    /// The 1-based page actually served, after clamping.
    pub page: usize,
    /// Total pages for the filtered list; at least 1 even when empty.
    pub total_pages: usize,
    /// Size of the whole filtered list, across all pages.
    pub total: usize,
}

/// Runs a filter/sort/page specification against the full memo list.
///
/// `page` is 1-based and clamps into range instead of erroring. A
/// `page_size` of zero is treated as one. [`PAGE_SIZE`] is the standard
/// list page size.
pub fn run(
    memos: &[Memo],
    filter: &MemoFilter,
    sort: SortSpec,
    page: usize,
    page_size: usize,
) -> QueryPage {
    let mut filtered: Vec<Memo> = memos
        .iter()
        .filter(|memo| filter.matches(memo))
        .cloned()
        .collect();
    // Stable sort, so equal keys keep their insertion order.
    filtered.sort_by(|a, b| sort.order.apply(compare(a, b, sort.key)));

    let page_size = page_size.max(1);
    let total = filtered.len();
    let total_pages = total.div_ceil(page_size).max(1);
    let page = page.clamp(1, total_pages);

    let start = (page - 1) * page_size;
    let memos = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    QueryPage {
        memos,
        page,
        total_pages,
        total,
    }
}

/// Runs a specification with the standard page size.
pub fn run_default(memos: &[Memo], filter: &MemoFilter, sort: SortSpec, page: usize) -> QueryPage {
    run(memos, filter, sort, page, PAGE_SIZE)
}

// Text fields order lexicographically. Dates order chronologically when both
// sides parse, falling back to the raw strings when they do not.
fn compare(a: &Memo, b: &Memo, key: SortKey) -> Ordering {
    match key {
        SortKey::MemoNumber => a.memo_number.cmp(&b.memo_number),
        SortKey::Date => match (a.calendar_date(), b.calendar_date()) {
            (Some(da), Some(db)) => da.cmp(&db),
            _ => a.date.cmp(&b.date),
        },
        SortKey::Teacher => a.teacher.cmp(&b.teacher),
        SortKey::Subject => a.subject.cmp(&b.subject),
        SortKey::Department => a.department.cmp(&b.department),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memo::{MemoDraft, MemoId};

    fn memo(number: &str, date: &str, teacher: &str, subject: &str, department: &str) -> Memo {
        MemoDraft {
            memo_number: number.into(),
            date: date.into(),
            teacher: teacher.into(),
            subject: subject.into(),
            department: department.into(),
        }
        .into_memo(MemoId::new(), None)
    }

    fn date(raw: &str) -> NaiveDate {
        raw.parse().expect("test date")
    }

    fn numbers(page: &QueryPage) -> Vec<&str> {
        page.memos.iter().map(|m| m.memo_number.as_str()).collect()
    }

    #[test]
    fn date_range_bounds_are_inclusive() {
        let memos = vec![
            memo("m1", "2024-01-05", "t", "s", "A"),
            memo("m2", "2024-02-10", "t", "s", "A"),
            memo("m3", "2024-02-20", "t", "s", "A"),
        ];
        let filter = MemoFilter {
            start_date: Some(date("2024-02-01")),
            end_date: Some(date("2024-02-28")),
            ..Default::default()
        };

        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(page.total, 2);
        assert_eq!(numbers(&page), vec!["m3", "m2"]);

        // Boundary dates themselves are included.
        let filter = MemoFilter {
            start_date: Some(date("2024-02-10")),
            end_date: Some(date("2024-02-20")),
            ..Default::default()
        };
        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn subject_filter_is_a_case_insensitive_substring() {
        let memos = vec![
            memo("m1", "2024-01-05", "t", "Budget Approval", "A"),
            memo("m2", "2024-01-06", "t", "field trip", "A"),
        ];
        let filter = MemoFilter {
            subject: Some("BUDGET".into()),
            ..Default::default()
        };
        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(numbers(&page), vec!["m1"]);
    }

    #[test]
    fn teacher_and_department_filters_match_exactly() {
        let memos = vec![
            memo("m1", "2024-01-05", "ครูสมชาย", "s", "A"),
            memo("m2", "2024-01-06", "ครูสมชาย ใจดี", "s", "A"),
            memo("m3", "2024-01-07", "ครูสมชาย", "s", "B"),
        ];

        let filter = MemoFilter {
            teacher: Some("ครูสมชาย".into()),
            department: Some("A".into()),
            ..Default::default()
        };
        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(numbers(&page), vec!["m1"]);

        // No filters at all passes everything through.
        let page = run_default(&memos, &MemoFilter::default(), SortSpec::default(), 1);
        assert_eq!(page.total, 3);
    }

    #[test]
    fn unparseable_dates_fail_active_date_bounds_only() {
        let memos = vec![
            memo("m1", "2024-01-05", "t", "s", "A"),
            memo("m2", "someday", "t", "s", "A"),
        ];

        let filter = MemoFilter {
            start_date: Some(date("2023-01-01")),
            ..Default::default()
        };
        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(numbers(&page), vec!["m1"]);

        let page = run_default(&memos, &MemoFilter::default(), SortSpec::default(), 1);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn ascending_and_descending_sorts_are_reverses() {
        let memos = vec![
            memo("m2", "2024-02-10", "b", "s2", "A"),
            memo("m1", "2024-01-05", "a", "s1", "A"),
            memo("m3", "2024-02-20", "c", "s3", "A"),
        ];

        let asc = run_default(
            &memos,
            &MemoFilter::default(),
            SortSpec {
                key: SortKey::Date,
                order: SortOrder::Ascending,
            },
            1,
        );
        let desc = run_default(
            &memos,
            &MemoFilter::default(),
            SortSpec {
                key: SortKey::Date,
                order: SortOrder::Descending,
            },
            1,
        );

        let mut reversed = numbers(&asc);
        reversed.reverse();
        assert_eq!(numbers(&desc), reversed);
        assert_eq!(numbers(&asc), vec!["m1", "m2", "m3"]);
    }

    #[test]
    fn every_field_is_sortable() {
        let memos = vec![
            memo("002", "2024-02-10", "b", "beta", "Y"),
            memo("001", "2024-01-05", "a", "alpha", "X"),
        ];
        for key in [
            SortKey::MemoNumber,
            SortKey::Date,
            SortKey::Teacher,
            SortKey::Subject,
            SortKey::Department,
        ] {
            let page = run_default(
                &memos,
                &MemoFilter::default(),
                SortSpec {
                    key,
                    order: SortOrder::Ascending,
                },
                1,
            );
            assert_eq!(numbers(&page), vec!["001", "002"], "key {key:?}");
        }
    }

    #[test]
    fn pagination_covers_the_whole_list_exactly_once() {
        let memos: Vec<Memo> = (0..25)
            .map(|i| memo(&format!("{i:03}"), "2024-01-05", "t", "s", "A"))
            .collect();
        let sort = SortSpec {
            key: SortKey::MemoNumber,
            order: SortOrder::Ascending,
        };

        let first = run_default(&memos, &MemoFilter::default(), sort, 1);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 25);

        let mut seen = Vec::new();
        for page in 1..=first.total_pages {
            let result = run_default(&memos, &MemoFilter::default(), sort, page);
            seen.extend(
                result
                    .memos
                    .iter()
                    .map(|m| m.memo_number.clone()),
            );
        }
        let full = run(&memos, &MemoFilter::default(), sort, 1, 25);
        let expected: Vec<String> = full.memos.iter().map(|m| m.memo_number.clone()).collect();
        assert_eq!(seen, expected);
    }

    #[test]
    fn out_of_range_pages_clamp() {
        let memos: Vec<Memo> = (0..15)
            .map(|i| memo(&format!("{i:03}"), "2024-01-05", "t", "s", "A"))
            .collect();
        let sort = SortSpec {
            key: SortKey::MemoNumber,
            order: SortOrder::Ascending,
        };

        let low = run_default(&memos, &MemoFilter::default(), sort, 0);
        assert_eq!(low.page, 1);
        assert_eq!(low.memos.len(), 10);

        let high = run_default(&memos, &MemoFilter::default(), sort, 99);
        assert_eq!(high.page, 2);
        assert_eq!(high.memos.len(), 5);
    }

    #[test]
    fn an_empty_result_still_has_one_page() {
        let filter = MemoFilter {
            subject: Some("nothing matches this".into()),
            ..Default::default()
        };
        let memos = vec![memo("m1", "2024-01-05", "t", "s", "A")];

        let page = run_default(&memos, &filter, SortSpec::default(), 1);
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.memos.is_empty());
    }

    #[test]
    fn header_clicks_toggle_and_reset_direction() {
        let mut sort = SortSpec::default();
        assert_eq!(sort.key, SortKey::Date);
        assert_eq!(sort.order, SortOrder::Descending);

        // A new key always starts ascending.
        sort.click(SortKey::Teacher);
        assert_eq!(sort.key, SortKey::Teacher);
        assert_eq!(sort.order, SortOrder::Ascending);

        // The same key toggles.
        sort.click(SortKey::Teacher);
        assert_eq!(sort.order, SortOrder::Descending);
        sort.click(SortKey::Teacher);
        assert_eq!(sort.order, SortOrder::Ascending);

        sort.click(SortKey::Date);
        assert_eq!(sort.key, SortKey::Date);
        assert_eq!(sort.order, SortOrder::Ascending);
    }
}
