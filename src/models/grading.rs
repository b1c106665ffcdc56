// src/models/grading.rs

//! Submissions, grading sessions and examiner assignment entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Student;
use crate::utils::de;

/// A student submission against a class assessment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i64,

    #[serde(default)]
    pub student_id: i64,

    #[serde(default)]
    pub student_code: String,

    #[serde(default)]
    pub student_name: String,

    #[serde(default)]
    pub class_assessment_id: i64,

    #[serde(default)]
    pub grading_group_id: Option<i64>,

    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub submitted_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub last_grade: f64,

    #[serde(default)]
    pub submission_file: Option<String>,

    #[serde(default)]
    pub status: i32,
}

/// Grading state derived from `last_grade` and `submitted_at`.
///
/// These two fields are the single source of truth; the state is never
/// stored or cached separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Graded,
    Pending,
    NotSubmitted,
}

impl Submission {
    /// Derive the grading state of this submission.
    pub fn state(&self) -> SubmissionState {
        if self.last_grade > 0.0 {
            SubmissionState::Graded
        } else if self.submitted_at.is_some() {
            SubmissionState::Pending
        } else {
            SubmissionState::NotSubmitted
        }
    }

    /// Synthesize the record for a roster student without a submission, so
    /// they still appear in reports.
    pub fn placeholder(student: &Student, class_assessment_id: i64) -> Self {
        Self {
            id: 0,
            student_id: student.id,
            student_code: student.code.clone(),
            student_name: student.name.clone(),
            class_assessment_id,
            grading_group_id: None,
            submitted_at: None,
            last_grade: 0.0,
            submission_file: None,
            status: 0,
        }
    }
}

/// Processing status of a grading session, decoded from the wire code
/// (1 = processing, 2 = completed, 3 = failed, else processing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Processing,
    Completed,
    Failed,
}

impl From<i32> for SessionStatus {
    fn from(code: i32) -> Self {
        match code {
            2 => SessionStatus::Completed,
            3 => SessionStatus::Failed,
            _ => SessionStatus::Processing,
        }
    }
}

/// Who produced a grading session, decoded from the wire code
/// (1 = AI, 2 = lecturer, 3 = both, else AI).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "lowercase")]
pub enum GradingType {
    #[default]
    Ai,
    Lecturer,
    Both,
}

impl From<i32> for GradingType {
    fn from(code: i32) -> Self {
        match code {
            2 => GradingType::Lecturer,
            3 => GradingType::Both,
            _ => GradingType::Ai,
        }
    }
}

/// One grading attempt against a submission.
///
/// Multiple sessions may exist per submission over time; only the one with
/// the latest `created_at` is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingSession {
    pub id: i64,

    #[serde(default)]
    pub submission_id: i64,

    #[serde(default)]
    pub status: SessionStatus,

    #[serde(default)]
    pub grading_type: GradingType,

    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub created_at: Option<DateTime<Utc>>,
}

impl GradingSession {
    /// Pick the authoritative session: the one with the maximum `created_at`.
    ///
    /// Sessions without a timestamp sort earliest. On equal timestamps the
    /// later entry wins.
    pub fn latest(sessions: &[GradingSession]) -> Option<&GradingSession> {
        sessions.iter().max_by_key(|s| s.created_at)
    }
}

/// A score against one rubric item, produced by a grading session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeItem {
    pub id: i64,

    #[serde(default)]
    pub grading_session_id: i64,

    #[serde(default)]
    pub rubric_item_id: i64,

    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub comments: String,
}

/// A batch of submissions assigned to one lecturer for grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingGroup {
    pub id: i64,

    #[serde(default)]
    pub lecturer_id: i64,

    #[serde(default)]
    pub assessment_template_id: i64,

    /// Submissions batched into this group; some endpoints omit them
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

/// Examiner workflow status of an assign request, decoded from the wire code
/// (1..5 = pending/accepted/rejected/in-progress/completed, else pending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "snake_case")]
pub enum AssignStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    InProgress,
    Completed,
}

impl From<i32> for AssignStatus {
    fn from(code: i32) -> Self {
        match code {
            2 => AssignStatus::Accepted,
            3 => AssignStatus::Rejected,
            4 => AssignStatus::InProgress,
            5 => AssignStatus::Completed,
            _ => AssignStatus::Pending,
        }
    }
}

/// A request to assign grading work to a lecturer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub id: i64,

    #[serde(default)]
    pub status: AssignStatus,

    #[serde(default)]
    pub assigned_lecturer_id: i64,

    #[serde(default)]
    pub course_element_id: i64,
}
