// src/stats/charts.rs

//! Chart series for the administrative dashboard.
//!
//! Simpler derivations than the overview: each series is one bucketing pass
//! over a single collection, and each underlying fetch is fault-isolated the
//! same way as the overview's metric groups.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{ClassSection, AssessmentStatus, AssessmentTemplate, ClassAssessment, ElementKind, GradingSession, SessionStatus, Submission};
use crate::stats::assessments::KindBreakdown;
use crate::stats::submissions::DayCount;

const MONTH_BUCKETS: usize = 12;
const DAY_BUCKETS: usize = 30;

/// Submissions in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

/// Class and enrollment volume for one semester.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterActivity {
    pub semester: String,
    pub classes: usize,
    pub students: u64,
}

/// Counts per class-assessment window status.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub active: usize,
    pub completed: usize,
}

/// The dashboard chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub monthly_growth: Vec<MonthCount>,
    pub semester_activity: Vec<SemesterActivity>,
    pub type_distribution: KindBreakdown,
    pub status_distribution: StatusBreakdown,
    pub grading_by_day: Vec<DayCount>,
}

/// Submission volume per month, ascending, most recent buckets only.
pub fn compute_monthly_growth(submissions: &[Submission]) -> Vec<MonthCount> {
    let mut per_month: BTreeMap<String, usize> = BTreeMap::new();
    for submission in submissions {
        if let Some(at) = submission.submitted_at {
            *per_month.entry(at.format("%Y-%m").to_string()).or_default() += 1;
        }
    }
    let mut buckets: Vec<MonthCount> = per_month
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect();
    if buckets.len() > MONTH_BUCKETS {
        buckets.drain(..buckets.len() - MONTH_BUCKETS);
    }
    buckets
}

/// Class and enrollment volume per semester, ascending by semester key.
pub fn compute_semester_activity(classes: &[ClassSection]) -> Vec<SemesterActivity> {
    let mut per_semester: BTreeMap<&str, (usize, u64)> = BTreeMap::new();
    for class in classes {
        let entry = per_semester.entry(class.semester_key()).or_default();
        entry.0 += 1;
        entry.1 += u64::from(class.student_count);
    }
    per_semester
        .into_iter()
        .map(|(semester, (classes, students))| SemesterActivity {
            semester: semester.to_string(),
            classes,
            students,
        })
        .collect()
}

/// Template kind distribution, via the shared classifier.
pub fn compute_type_distribution(templates: &[AssessmentTemplate]) -> KindBreakdown {
    let mut breakdown = KindBreakdown::default();
    for template in templates {
        breakdown.add(ElementKind::classify(&template.name));
    }
    breakdown
}

/// Class-assessment status distribution.
pub fn compute_status_distribution(assessments: &[ClassAssessment]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for assessment in assessments {
        match assessment.status {
            AssessmentStatus::Pending => breakdown.pending += 1,
            AssessmentStatus::Active => breakdown.active += 1,
            AssessmentStatus::Completed => breakdown.completed += 1,
        }
    }
    breakdown
}

/// Completed grading sessions per day, ascending, most recent buckets only.
pub fn compute_grading_by_day(sessions: &[GradingSession]) -> Vec<DayCount> {
    let mut per_day: BTreeMap<String, usize> = BTreeMap::new();
    for session in sessions {
        if session.status != SessionStatus::Completed {
            continue;
        }
        if let Some(at) = session.created_at {
            *per_day.entry(at.format("%Y-%m-%d").to_string()).or_default() += 1;
        }
    }
    let mut buckets: Vec<DayCount> = per_day
        .into_iter()
        .map(|(date, count)| DayCount { date, count })
        .collect();
    if buckets.len() > DAY_BUCKETS {
        buckets.drain(..buckets.len() - DAY_BUCKETS);
    }
    buckets
}
