use crate::shared::entity::{Entity, ID};
use crate::shared::recurrence::{RecurrenceEnd, RecurrenceOptions};
use chrono::{NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Task {
    pub id: ID,
    pub name: String,
    pub description: String,
    pub project_id: Option<ID>,
    pub status: TaskStatus,
    /// Priority 1 (lowest) through 10 (highest)
    pub priority: i64,
    /// Millisecond timestamps. Tasks whose dates could not be parsed at the
    /// store boundary carry `None` and are excluded from deadline scans.
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub assigned_to: Vec<ID>,
    pub deleted: bool,
    pub recurrence: Option<RecurrenceOptions>,
    pub created: i64,
    pub updated: i64,
}

impl Entity for Task {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Unassigned,
    Ongoing,
    UnderReview,
    Completed,
    Cancelled,
    OnHold,
}

impl Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Unassigned => "unassigned",
            Self::Ongoing => "ongoing",
            Self::UnderReview => "under_review",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::OnHold => "on_hold",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unassigned" => Ok(Self::Unassigned),
            "ongoing" => Ok(Self::Ongoing),
            "under_review" => Ok(Self::UnderReview),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            "on_hold" => Ok(Self::OnHold),
            _ => Err(format!("Invalid task status: {}", s)),
        }
    }
}

fn ts_to_date(ts: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(ts).single().map(|dt| dt.date_naive())
}

impl Task {
    /// Deleted and completed tasks never qualify for deadline scanning.
    pub fn is_active(&self) -> bool {
        !self.deleted && self.status != TaskStatus::Completed
    }

    pub fn start_date(&self, tz: &Tz) -> Option<NaiveDate> {
        self.start_ts.and_then(|ts| ts_to_date(ts, tz))
    }

    pub fn end_date(&self, tz: &Tz) -> Option<NaiveDate> {
        self.end_ts.and_then(|ts| ts_to_date(ts, tz))
    }

    /// Display category for the task priority, used in reminder emails.
    pub fn priority_category(&self) -> &'static str {
        if self.priority >= 8 {
            "High"
        } else if self.priority >= 4 {
            "Medium"
        } else {
            "Low"
        }
    }

    /// Resolve the due date that currently applies to this task.
    ///
    /// Non-recurring tasks are due on their end date (start date when no end
    /// date is set). Recurring tasks walk the occurrence chain from the
    /// start date until the first occurrence on or after `as_of`, bounded by
    /// `max_iterations` and by the recurrence end condition. When the cap or
    /// the end condition cuts the walk short, the last computed occurrence
    /// is returned so the caller always gets a usable date.
    ///
    /// Returns `(due_date, is_recurring)`; `due_date` is `None` when the
    /// task has no parsable dates to work from.
    pub fn effective_due_date(
        &self,
        as_of: NaiveDate,
        tz: &Tz,
        max_iterations: usize,
    ) -> (Option<NaiveDate>, bool) {
        let recurrence = match &self.recurrence {
            Some(recurrence) if recurrence.enabled => recurrence,
            _ => return (self.end_date(tz).or_else(|| self.start_date(tz)), false),
        };

        let anchor = match self.start_date(tz).or_else(|| self.end_date(tz)) {
            Some(anchor) => anchor,
            None => return (None, true),
        };

        let mut occurrence = recurrence.first_occurrence(anchor);
        let mut produced: i64 = 1;
        let mut iterations = 0;

        while occurrence < as_of && iterations < max_iterations {
            if let RecurrenceEnd::After { occurrences } = &recurrence.end {
                // Values below 1 are pathological and ignored
                if *occurrences >= 1 && produced >= *occurrences {
                    break;
                }
            }
            let next = recurrence.next_occurrence(occurrence);
            if let RecurrenceEnd::OnDate { date } = &recurrence.end {
                if next > *date {
                    break;
                }
            }
            occurrence = next;
            produced += 1;
            iterations += 1;
        }

        (Some(occurrence), true)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::recurrence::RecurrenceFrequency;
    use chrono::Utc;
    use chrono_tz::UTC;

    const MAX_ITERATIONS: usize = 500;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn ts(year: i32, month: u32, day: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
            .unwrap()
            .timestamp_millis()
    }

    fn task_factory(start_ts: Option<i64>, end_ts: Option<i64>) -> Task {
        Task {
            id: Default::default(),
            name: "Quarterly report".into(),
            description: "".into(),
            project_id: None,
            status: TaskStatus::Ongoing,
            priority: 5,
            start_ts,
            end_ts,
            assigned_to: Vec::new(),
            deleted: false,
            recurrence: None,
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn non_recurring_task_is_due_on_end_date() {
        let task = task_factory(Some(ts(2024, 1, 10)), Some(ts(2024, 1, 15)));
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 15)));
        assert!(!recurring);
    }

    #[test]
    fn disabled_recurrence_behaves_like_non_recurring() {
        let mut task = task_factory(Some(ts(2024, 1, 10)), Some(ts(2024, 1, 15)));
        task.recurrence = Some(RecurrenceOptions {
            enabled: false,
            ..Default::default()
        });
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 15)));
        assert!(!recurring);
    }

    #[test]
    fn non_recurring_task_without_end_date_uses_start_date() {
        let task = task_factory(Some(ts(2024, 1, 15)), None);
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 15)));
        assert!(!recurring);
    }

    #[test]
    fn task_without_dates_has_no_due_date() {
        let task = task_factory(None, None);
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, None);
        assert!(!recurring);
    }

    #[test]
    fn recurring_task_without_dates_has_no_due_date() {
        let mut task = task_factory(None, None);
        task.recurrence = Some(Default::default());
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, None);
        assert!(recurring);
    }

    #[test]
    fn daily_recurrence_catches_up_to_current_date() {
        let mut task = task_factory(Some(ts(2024, 1, 10)), Some(ts(2024, 1, 10)));
        task.recurrence = Some(Default::default());
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 12)));
        assert!(recurring);
    }

    #[test]
    fn weekly_recurrence_resolves_to_occurrence_on_current_date() {
        // 2024-01-01 is a Monday; Mon/Wed/Fri pattern puts an occurrence on
        // Wednesday 2024-01-10
        let mut task = task_factory(Some(ts(2024, 1, 1)), None);
        task.recurrence = Some(RecurrenceOptions {
            freq: RecurrenceFrequency::Weekly {
                weekly_days: vec![0, 2, 4],
            },
            ..Default::default()
        });
        let (due, recurring) = task.effective_due_date(date(2024, 1, 10), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 10)));
        assert!(recurring);
    }

    #[test]
    fn weekly_recurrence_skips_to_next_listed_weekday() {
        // Tue/Thu/Sat pattern from Monday 2024-01-01; the first occurrence
        // on or after Friday 2024-01-12 is Saturday 2024-01-13
        let mut task = task_factory(Some(ts(2024, 1, 1)), None);
        task.recurrence = Some(RecurrenceOptions {
            freq: RecurrenceFrequency::Weekly {
                weekly_days: vec![1, 3, 5],
            },
            ..Default::default()
        });
        let (due, recurring) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 13)));
        assert!(recurring);
    }

    #[test]
    fn end_after_occurrences_limits_the_walk() {
        let mut task = task_factory(Some(ts(2024, 1, 10)), None);
        task.recurrence = Some(RecurrenceOptions {
            end: RecurrenceEnd::After { occurrences: 5 },
            ..Default::default()
        });
        let (due, recurring) = task.effective_due_date(date(2024, 1, 20), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 14)));
        assert!(recurring);
    }

    #[test]
    fn end_after_below_one_is_ignored() {
        let mut task = task_factory(Some(ts(2024, 1, 10)), None);
        task.recurrence = Some(RecurrenceOptions {
            end: RecurrenceEnd::After { occurrences: 0 },
            ..Default::default()
        });
        let (due, _) = task.effective_due_date(date(2024, 1, 12), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 12)));
    }

    #[test]
    fn end_on_date_never_produces_later_occurrences() {
        let mut task = task_factory(Some(ts(2024, 1, 10)), None);
        task.recurrence = Some(RecurrenceOptions {
            end: RecurrenceEnd::OnDate {
                date: date(2024, 1, 20),
            },
            ..Default::default()
        });
        let (due, recurring) = task.effective_due_date(date(2024, 2, 1), &UTC, MAX_ITERATIONS);
        assert_eq!(due, Some(date(2024, 1, 20)));
        assert!(recurring);
    }

    #[test]
    fn iteration_cap_returns_best_effort_occurrence() {
        let mut task = task_factory(Some(ts(2024, 1, 1)), None);
        task.recurrence = Some(Default::default());
        let (due, recurring) = task.effective_due_date(date(2024, 1, 30), &UTC, 3);
        assert_eq!(due, Some(date(2024, 1, 4)));
        assert!(recurring);
    }

    #[test]
    fn priority_maps_to_display_category() {
        let mut task = task_factory(None, None);
        task.priority = 9;
        assert_eq!(task.priority_category(), "High");
        task.priority = 5;
        assert_eq!(task.priority_category(), "Medium");
        task.priority = 2;
        assert_eq!(task.priority_category(), "Low");
    }

    #[test]
    fn completed_and_deleted_tasks_are_inactive() {
        let mut task = task_factory(None, None);
        assert!(task.is_active());
        task.status = TaskStatus::Completed;
        assert!(!task.is_active());
        task.status = TaskStatus::Ongoing;
        task.deleted = true;
        assert!(!task.is_active());
    }
}
