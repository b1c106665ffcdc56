// src/report/row.rs

//! Denormalized report rows.

use serde::{Deserialize, Serialize};

use crate::models::{ElementKind, GradeItem, GradingSession, Question, RubricItem, Submission};

/// Which course-element kinds a report should include.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportTypes {
    pub assignment: bool,
    pub lab: bool,
    pub practical_exam: bool,
}

impl ExportTypes {
    /// Include every kind.
    pub fn all() -> Self {
        Self {
            assignment: true,
            lab: true,
            practical_exam: true,
        }
    }

    /// Whether the given kind is requested.
    pub fn includes(&self, kind: ElementKind) -> bool {
        match kind {
            ElementKind::Assignment => self.assignment,
            ElementKind::Lab => self.lab,
            ElementKind::PracticalExam => self.practical_exam,
        }
    }

    /// Whether any kind is requested at all.
    pub fn any(&self) -> bool {
        self.assignment || self.lab || self.practical_exam
    }
}

impl Default for ExportTypes {
    fn default() -> Self {
        Self::all()
    }
}

/// Free-text feedback block attached to each row; starts out empty and is
/// filled in by reviewers after export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Feedback {
    pub summary: String,
    pub strengths: String,
    pub improvements: String,
}

/// One denormalized record joining a student, a course element, their
/// submission and the latest grading data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub submission: Submission,
    pub grading_session: Option<GradingSession>,
    pub grade_items: Vec<GradeItem>,
    pub questions: Vec<Question>,
    pub rubrics: Vec<RubricItem>,
    pub course_element_name: String,
    pub assignment_type: ElementKind,
    pub feedback: Feedback,
}
