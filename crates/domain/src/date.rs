use chrono::prelude::*;

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month - 1 {
        0 => 31,
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        2 => 31,
        3 => 30,
        4 => 31,
        5 => 30,
        6 => 31,
        7 => 31,
        8 => 30,
        9 => 31,
        10 => 30,
        11 => 31,
        _ => panic!("Invalid month"),
    }
}

/// Construct a date from components, clamping the day down to the last
/// valid day of the month. Day 0 becomes day 1, never the previous month.
pub(crate) fn clamped_date(year: i32, month: u32, day: u32) -> NaiveDate {
    let day = day.max(1).min(get_month_length(year, month));
    NaiveDate::from_ymd_opt(year, month, day).expect("Clamped day to be valid for month")
}

/// Shift a date by `months` (negative allowed), rolling the year in either
/// direction. The day is clamped to the length of the resulting month, so
/// Jan 31 + 1 month lands on Feb 29 in a leap year and Feb 28 otherwise.
pub fn add_months(base: NaiveDate, months: i32) -> NaiveDate {
    let month_index = base.year() * 12 + base.month0() as i32 + months;
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    clamped_date(year, month, base.day())
}

pub fn format_date(date: &NaiveDate) -> String {
    format!("{}-{:02}-{:02}", date.year(), date.month(), date.day())
}
