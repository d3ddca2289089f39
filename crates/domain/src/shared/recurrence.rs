use crate::date::{add_months, clamped_date};
use chrono::{Datelike, Duration, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// How a recurring task repeats. Each frequency only carries the fields
/// that are meaningful for it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum RecurrenceFrequency {
    Daily,
    Weekly {
        /// Weekday indices, Monday = 0 through Sunday = 6. Out-of-range
        /// entries are ignored; an empty set falls back to the anchor's
        /// weekday.
        #[serde(default, rename = "weeklyDays")]
        weekly_days: Vec<i64>,
    },
    Monthly {
        /// Day of month 1-31, clamped down to the month's actual length.
        #[serde(default, rename = "monthlyDay")]
        monthly_day: Option<u32>,
    },
    Yearly {
        #[serde(default, rename = "yearlyMonth")]
        yearly_month: Option<u32>,
        #[serde(default, rename = "yearlyDay")]
        yearly_day: Option<u32>,
    },
    Custom {
        #[serde(rename = "customUnit")]
        unit: CustomUnit,
    },
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CustomUnit {
    Days,
    Weeks,
    Months,
}

/// When a recurrence stops producing occurrences.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum RecurrenceEnd {
    Never,
    After {
        occurrences: i64,
    },
    OnDate {
        date: NaiveDate,
    },
}

impl Default for RecurrenceEnd {
    fn default() -> Self {
        Self::Never
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceOptions {
    pub enabled: bool,
    #[serde(flatten)]
    pub freq: RecurrenceFrequency,
    #[serde(default = "default_interval")]
    pub interval: i64,
    #[serde(default)]
    pub end: RecurrenceEnd,
}

fn default_interval() -> i64 {
    1
}

impl Default for RecurrenceOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            freq: RecurrenceFrequency::Daily,
            interval: 1,
            end: RecurrenceEnd::Never,
        }
    }
}

impl RecurrenceOptions {
    /// Intervals below 1 are treated as 1.
    pub fn normalized_interval(&self) -> i64 {
        self.interval.max(1)
    }

    /// The first occurrence on or after `anchor`.
    pub fn first_occurrence(&self, anchor: NaiveDate) -> NaiveDate {
        let interval = self.normalized_interval();
        match &self.freq {
            RecurrenceFrequency::Daily => anchor,
            RecurrenceFrequency::Weekly { weekly_days } => {
                let days = normalized_weekly_days(weekly_days, weekday_index(anchor));
                align_weekly(anchor, &days, interval)
            }
            RecurrenceFrequency::Monthly { monthly_day } => {
                align_monthly(anchor, interval, *monthly_day)
            }
            RecurrenceFrequency::Yearly {
                yearly_month,
                yearly_day,
            } => align_yearly(anchor, interval, *yearly_month, *yearly_day),
            RecurrenceFrequency::Custom { unit } => match unit {
                // Stepping for day/week units happens in next_occurrence
                CustomUnit::Days | CustomUnit::Weeks => anchor,
                CustomUnit::Months => align_monthly(anchor, interval, None),
            },
        }
    }

    /// The next occurrence strictly after `current`. Every arm moves at
    /// least one day forward, so walking occurrences cannot stall.
    pub fn next_occurrence(&self, current: NaiveDate) -> NaiveDate {
        let interval = self.normalized_interval();
        match &self.freq {
            RecurrenceFrequency::Daily => current + Duration::days(interval),
            RecurrenceFrequency::Weekly { weekly_days } => {
                let days = normalized_weekly_days(weekly_days, weekday_index(current));
                advance_weekly(current, &days, interval)
            }
            RecurrenceFrequency::Monthly { monthly_day } => {
                advance_monthly(current, interval, *monthly_day)
            }
            RecurrenceFrequency::Yearly {
                yearly_month,
                yearly_day,
            } => advance_yearly(current, interval, *yearly_month, *yearly_day),
            RecurrenceFrequency::Custom { unit } => match unit {
                CustomUnit::Days => current + Duration::days(interval),
                CustomUnit::Weeks => current + Duration::days(interval * 7),
                CustomUnit::Months => advance_monthly(current, interval, None),
            },
        }
    }
}

// Monday = 0, matching the weeklyDays convention
fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

fn normalized_weekly_days(days: &[i64], fallback: u32) -> Vec<u32> {
    let days: Vec<u32> = days
        .iter()
        .copied()
        .filter(|d| (0..=6).contains(d))
        .map(|d| d as u32)
        .sorted()
        .dedup()
        .collect();
    if days.is_empty() {
        vec![fallback]
    } else {
        days
    }
}

fn align_weekly(anchor: NaiveDate, days: &[u32], interval: i64) -> NaiveDate {
    let weekday = weekday_index(anchor);
    for &day in days {
        if day >= weekday {
            return anchor + Duration::days((day - weekday) as i64);
        }
    }
    anchor + Duration::days(interval * 7 - (weekday - days[0]) as i64)
}

fn advance_weekly(current: NaiveDate, days: &[u32], interval: i64) -> NaiveDate {
    let weekday = weekday_index(current);
    for &day in days {
        if day > weekday {
            return current + Duration::days((day - weekday) as i64);
        }
    }
    current + Duration::days(interval * 7 - (weekday - days[0]) as i64)
}

fn align_monthly(anchor: NaiveDate, interval: i64, monthly_day: Option<u32>) -> NaiveDate {
    let day = monthly_day.unwrap_or_else(|| anchor.day());
    let candidate = clamped_date(anchor.year(), anchor.month(), day);
    if candidate < anchor {
        add_months(candidate, interval as i32)
    } else {
        candidate
    }
}

fn advance_monthly(current: NaiveDate, interval: i64, monthly_day: Option<u32>) -> NaiveDate {
    let day = monthly_day.unwrap_or_else(|| current.day());
    let next = add_months(current, interval as i32);
    clamped_date(next.year(), next.month(), day)
}

fn align_yearly(
    anchor: NaiveDate,
    interval: i64,
    yearly_month: Option<u32>,
    yearly_day: Option<u32>,
) -> NaiveDate {
    let month = yearly_month.unwrap_or_else(|| anchor.month()).max(1).min(12);
    let day = yearly_day.unwrap_or_else(|| anchor.day());
    let candidate = clamped_date(anchor.year(), month, day);
    if candidate < anchor {
        clamped_date(anchor.year() + interval as i32, month, day)
    } else {
        candidate
    }
}

fn advance_yearly(
    current: NaiveDate,
    interval: i64,
    yearly_month: Option<u32>,
    yearly_day: Option<u32>,
) -> NaiveDate {
    let month = yearly_month.unwrap_or_else(|| current.month()).max(1).min(12);
    let day = yearly_day.unwrap_or_else(|| current.day());
    clamped_date(current.year() + interval as i32, month, day)
}
