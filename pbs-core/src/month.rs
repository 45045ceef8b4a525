use chrono::{Datelike, NaiveDate};

/// Build the first-of-month date for a year/month pair.
///
/// Returns `None` when the month is outside 1-12.
pub fn month_start(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Walk `months` calendar months from `date`, landing on the first of the
/// target month. Negative offsets walk backwards. The day component of the
/// input is dropped.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    // month is always 1-12 and day 1 exists in every month
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}
