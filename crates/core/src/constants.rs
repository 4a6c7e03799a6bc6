//! Constants used throughout the memoreg core crate.

use memoreg_types::NonEmptyText;

/// Store key holding the serialized memo collection.
pub const MEMOS_KEY: &str = "memos";

/// Store key holding the serialized department name list.
pub const DEPARTMENTS_KEY: &str = "departments";

/// Fixed number of memos per list page.
pub const PAGE_SIZE: usize = 10;

/// Department names a fresh installation starts with.
pub const SEED_DEPARTMENTS: [&str; 4] = [
    "งานบริหารวิชาการ",
    "งานบริหารงบประมาณ",
    "งานบริหารบุคลากร",
    "งานบริหารทั่วไป",
];

/// The seeded department set as owned values.
pub fn seed_departments() -> Vec<NonEmptyText> {
    SEED_DEPARTMENTS
        .iter()
        .map(|name| NonEmptyText::new(name).expect("seed names are non-empty"))
        .collect()
}
