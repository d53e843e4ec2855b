//! Pure reducers over task and submission snapshots.
//!
//! Every function here is a total, idempotent fold over data the caller
//! has already fetched and scoped; nothing in this module touches a port
//! or a clock. Recomputing over the same inputs yields the same output,
//! which is what lets the live layer re-aggregate on every refresh
//! without ordering concerns.
//!
//! All rate math is integer-only. Percentages are computed with
//! [`rounded_percent`] and grade bands with cross-multiplied comparisons,
//! so results are exact and a zero denominator reads as zero rather than
//! a division error.

use crate::roster::domain::UserId;
use crate::task::domain::{
    DerivedStatus, Submission, SubmissionStatus, Task, TaskCategory, TaskId,
};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};


/// Number of calendar-day buckets in a submission trend.
pub const TREND_DAYS: usize = 7;

/// Returns `numerator / denominator` as a percentage rounded to the
/// nearest integer.
///
/// A zero denominator yields 0; an empty cohort has no completion rate
/// rather than an undefined one.
#[must_use]
pub const fn rounded_percent(numerator: u64, denominator: u64) -> u32 {
    if denominator == 0 {
        return 0;
    }
    let scaled = (100 * numerator + denominator / 2) / denominator;
    if scaled > u32::MAX as u64 {
        u32::MAX
    } else {
        #[expect(clippy::cast_possible_truncation, reason = "bounded above")]
        {
            scaled as u32
        }
    }
}

/// Section-wide completion rate in `[0, 100]`.
///
/// The numerator is the number of `(task, student)` pairs with a
/// submitted record; the denominator is `tasks × active students`. Only
/// submissions that reached [`SubmissionStatus::Submitted`] or a later
/// review state count; untouched placeholder rows do not.
#[must_use]
pub fn completion_rate(tasks: &[Task], submissions: &[Submission], active_students: usize) -> u32 {
    let task_ids: HashSet<TaskId> = tasks.iter().map(Task::id).collect();
    let submitted = submissions
        .iter()
        .filter(|submission| {
            task_ids.contains(&submission.task()) && has_been_submitted(submission)
        })
        .count();
    let denominator = (tasks.len() as u64) * (active_students as u64);
    rounded_percent(submitted as u64, denominator)
}

/// Completion state of one task across its whole section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStatus {
    /// Every active student has submitted.
    Completed,
    /// Incomplete with the due instant in the past.
    Overdue,
    /// Incomplete and not yet late, or without a due instant.
    Pending,
}

/// Per-task completion summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskCompletion {
    /// Task the summary describes.
    pub task: TaskId,
    /// Section-wide completion state.
    pub status: CompletionStatus,
    /// Students who have submitted.
    pub submitted: usize,
    /// Active students expected to submit.
    pub expected: usize,
}

/// Summarizes each task's completion across the section.
///
/// A task is completed once every active student has submitted, overdue
/// when incomplete past its due instant, and pending otherwise. With no
/// active students nothing can complete; such tasks read pending or
/// overdue by due date alone.
#[must_use]
pub fn completion_breakdown(
    tasks: &[Task],
    submissions: &[Submission],
    active_students: usize,
    now: DateTime<Utc>,
) -> Vec<TaskCompletion> {
    let mut submitted_per_task: HashMap<TaskId, usize> = HashMap::new();
    for submission in submissions {
        if has_been_submitted(submission) {
            *submitted_per_task.entry(submission.task()).or_default() += 1;
        }
    }
    tasks
        .iter()
        .map(|task| {
            let submitted = submitted_per_task.get(&task.id()).copied().unwrap_or(0);
            let complete = active_students > 0 && submitted >= active_students;
            let status = if complete {
                CompletionStatus::Completed
            } else if task.due().is_some_and(|due| due < now) {
                CompletionStatus::Overdue
            } else {
                CompletionStatus::Pending
            };
            TaskCompletion {
                task: task.id(),
                status,
                submitted,
                expected: active_students,
            }
        })
        .collect()
}

/// One bar of a category histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    /// Coursework category.
    pub category: TaskCategory,
    /// Number of tasks in the category.
    pub count: usize,
}

/// Counts tasks per category over every configured category.
///
/// The result always holds one entry per category in
/// [`TaskCategory::ALL`] order, zero-filled, so chart axes stay stable
/// regardless of which categories the section actually uses.
#[must_use]
pub fn category_histogram(tasks: &[Task]) -> Vec<CategoryCount> {
    let mut counts: HashMap<TaskCategory, usize> = HashMap::new();
    for task in tasks {
        *counts.entry(task.category()).or_default() += 1;
    }
    TaskCategory::ALL
        .into_iter()
        .map(|category| CategoryCount {
            category,
            count: counts.get(&category).copied().unwrap_or(0),
        })
        .collect()
}

/// Grade band a student's mean falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    /// Mean grade of 85 or above.
    Excellent,
    /// Mean grade of 70 or above.
    Good,
    /// Mean grade below 70.
    NeedsImprovement,
}

/// A student's aggregate grade standing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentPerformance {
    /// Graded student.
    pub user: UserId,
    /// Band the mean grade falls into.
    pub band: PerformanceBand,
    /// Number of graded submissions behind the mean.
    pub graded: usize,
}

/// Bands each student by the mean of their present grades.
///
/// Students with no graded submission are excluded rather than banded at
/// zero. The band thresholds compare `sum >= threshold * count`, which is
/// the exact integer form of `mean >= threshold`. Results are sorted by
/// student identifier for deterministic output.
#[must_use]
pub fn performance_buckets(submissions: &[Submission]) -> Vec<StudentPerformance> {
    let mut totals: HashMap<UserId, (u64, u64)> = HashMap::new();
    for submission in submissions {
        if let Some(grade) = submission.grade() {
            let entry = totals.entry(submission.user()).or_default();
            entry.0 += u64::from(grade.value());
            entry.1 += 1;
        }
    }
    let mut banded: Vec<StudentPerformance> = totals
        .into_iter()
        .map(|(user, (sum, count))| {
            let band = if sum >= 85 * count {
                PerformanceBand::Excellent
            } else if sum >= 70 * count {
                PerformanceBand::Good
            } else {
                PerformanceBand::NeedsImprovement
            };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "count is a submission tally"
            )]
            StudentPerformance {
                user,
                band,
                graded: count as usize,
            }
        })
        .collect();
    banded.sort_by_key(|performance| performance.user);
    banded
}

/// One calendar-day bucket of a submission trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// UTC calendar date of the bucket.
    pub date: NaiveDate,
    /// Submissions whose submission instant falls on the date.
    pub count: usize,
}

/// Buckets submissions into a trailing seven-day window ending today.
///
/// Returns exactly [`TREND_DAYS`] points, oldest first and today last,
/// zero-filled. A submission counts toward the bucket matching the UTC
/// calendar date of its submission instant; rows that were never
/// submitted carry no instant and are skipped.
#[must_use]
pub fn submission_trend(submissions: &[Submission], today: NaiveDate) -> Vec<TrendPoint> {
    let mut per_day: HashMap<NaiveDate, usize> = HashMap::new();
    for submission in submissions {
        if let Some(instant) = submission.submitted_at() {
            *per_day.entry(instant.date_naive()).or_default() += 1;
        }
    }
    let window = TimeDelta::days(TREND_DAYS as i64 - 1);
    (today - window)
        .iter_days()
        .take(TREND_DAYS)
        .map(|date| TrendPoint {
            date,
            count: per_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}

/// Totals per derived status for a stats strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Tasks outstanding and not yet late.
    pub pending: usize,
    /// Tasks with a submitted record.
    pub submitted: usize,
    /// Tasks past due with no submission record.
    pub overdue: usize,
}

impl StatusCounts {
    /// Returns the total number of counted tasks.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.pending + self.submitted + self.overdue
    }
}

/// Tallies derived statuses for a stats strip.
#[must_use]
pub fn status_counts<I>(statuses: I) -> StatusCounts
where
    I: IntoIterator<Item = DerivedStatus>,
{
    let mut counts = StatusCounts::default();
    for status in statuses {
        match status {
            DerivedStatus::Pending => counts.pending += 1,
            DerivedStatus::Submitted => counts.submitted += 1,
            DerivedStatus::Overdue => counts.overdue += 1,
        }
    }
    counts
}

fn has_been_submitted(submission: &Submission) -> bool {
    !matches!(submission.status(), SubmissionStatus::Pending)
}
