//! Thai civil date formatting.
//!
//! The registry's audience reads Thai dates: day, Thai month name, and the
//! Buddhist-era year. These helpers produce the display strings; callers
//! that need another locale format the parsed date themselves.

use crate::memo::parse_date;
use chrono::{Datelike, NaiveDate};

/// Offset between the Common Era and the Buddhist Era used by Thai civil
/// dates.
const BUDDHIST_ERA_OFFSET: i32 = 543;

const THAI_MONTHS: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// Formats a date as the short Thai form, `D/M/YYYY` with a Buddhist-era
/// year, e.g. `5/1/2567`.
pub fn thai_short_date(date: NaiveDate) -> String {
    format!(
        "{}/{}/{}",
        date.day(),
        date.month(),
        date.year() + BUDDHIST_ERA_OFFSET
    )
}

/// Formats a stored date string as the long Thai form, e.g.
/// `5 มกราคม 2567`. Unparseable input renders as `Invalid Date`.
pub fn thai_long_date(raw: &str) -> String {
    match parse_date(raw) {
        Some(date) => format!(
            "{} {} {}",
            date.day(),
            THAI_MONTHS[date.month0() as usize],
            date.year() + BUDDHIST_ERA_OFFSET
        ),
        None => "Invalid Date".to_owned(),
    }
}
