// src/stats/submissions.rs

//! Submission statistics.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::models::{Submission, SubmissionState};
use crate::utils::math::{percent, round2};

const TOP_STUDENTS: usize = 10;
const BY_DAY_LIMIT: usize = 30;

/// Fixed grade-range thresholds over graded submissions.
const EXCELLENT_MIN: f64 = 8.5;
const GOOD_MIN: f64 = 7.0;
const AVERAGE_MIN: f64 = 5.5;

/// Disjoint grade-range buckets; counts sum to the graded total.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GradeRanges {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub below_average: usize,
}

/// One student in the submission-count ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentActivity {
    pub student_id: i64,
    pub student_name: String,
    pub submissions: usize,
    /// Mean over the student's graded submissions; 0 when none are graded.
    pub average_grade: f64,
}

/// Submissions on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCount {
    pub date: String,
    pub count: usize,
}

/// Aggregated submission statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total: usize,
    pub graded: usize,
    pub pending: usize,
    pub not_submitted: usize,
    pub completion_rate: f64,
    pub grade_ranges: GradeRanges,
    pub top_students: Vec<StudentActivity>,
    pub by_day: Vec<DayCount>,
}

/// Compute submission statistics.
pub fn compute_submission_stats(submissions: &[Submission]) -> SubmissionStats {
    let mut stats = SubmissionStats {
        total: submissions.len(),
        ..SubmissionStats::default()
    };

    let mut per_student: HashMap<i64, (String, usize, f64, usize)> = HashMap::new();
    let mut per_day: BTreeMap<String, usize> = BTreeMap::new();

    for submission in submissions {
        match submission.state() {
            SubmissionState::Graded => {
                stats.graded += 1;
                let grade = submission.last_grade;
                if grade >= EXCELLENT_MIN {
                    stats.grade_ranges.excellent += 1;
                } else if grade >= GOOD_MIN {
                    stats.grade_ranges.good += 1;
                } else if grade >= AVERAGE_MIN {
                    stats.grade_ranges.average += 1;
                } else {
                    stats.grade_ranges.below_average += 1;
                }
            }
            SubmissionState::Pending => stats.pending += 1,
            SubmissionState::NotSubmitted => stats.not_submitted += 1,
        }

        let entry = per_student
            .entry(submission.student_id)
            .or_insert_with(|| (submission.student_name.clone(), 0, 0.0, 0));
        entry.1 += 1;
        if submission.last_grade > 0.0 {
            entry.2 += submission.last_grade;
            entry.3 += 1;
        }

        if let Some(at) = submission.submitted_at {
            *per_day.entry(at.format("%Y-%m-%d").to_string()).or_default() += 1;
        }
    }

    stats.completion_rate = percent(stats.graded, stats.total);

    let mut top_students: Vec<StudentActivity> = per_student
        .into_iter()
        .map(|(student_id, (student_name, count, sum, graded))| StudentActivity {
            student_id,
            student_name,
            submissions: count,
            average_grade: if graded == 0 {
                0.0
            } else {
                round2(sum / graded as f64)
            },
        })
        .collect();
    top_students.sort_by(|a, b| {
        b.submissions
            .cmp(&a.submissions)
            .then(a.student_id.cmp(&b.student_id))
    });
    top_students.truncate(TOP_STUDENTS);
    stats.top_students = top_students;

    // Ascending by date, keeping only the most recent days.
    let mut by_day: Vec<DayCount> = per_day
        .into_iter()
        .map(|(date, count)| DayCount { date, count })
        .collect();
    if by_day.len() > BY_DAY_LIMIT {
        by_day.drain(..by_day.len() - BY_DAY_LIMIT);
    }
    stats.by_day = by_day;

    stats
}
