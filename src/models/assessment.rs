// src/models/assessment.rs

//! Course elements, assessment templates and their grading structure.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::de;

/// Lab keywords, checked first. Lab always wins over practical-exam.
const LAB_KEYWORDS: &[&str] = &["lab", "thí nghiệm", "thi nghiem"];

/// Practical-exam keywords, checked after labs.
const PRACTICAL_KEYWORDS: &[&str] = &[
    "practical exam",
    "practical-exam",
    "practical",
    "thi thực hành",
    "thực hành",
    "thuc hanh",
    "pe",
];

/// The kind of a course element, inferred from its name.
///
/// Kind is not a stored field anywhere on the platform; every call site must
/// go through [`ElementKind::classify`] so that the same name always yields
/// the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Assignment,
    Lab,
    PracticalExam,
}

impl ElementKind {
    /// Classify a course-element (or template) name.
    ///
    /// Case-insensitive keyword matching, English and Vietnamese sets. Lab
    /// keywords take precedence over practical-exam keywords; anything
    /// unmatched is an assignment. Keywords of two characters or fewer
    /// ("pe") only match whole tokens, so "Open Paper" stays an assignment.
    pub fn classify(name: &str) -> Self {
        let lowered = name.to_lowercase();

        if LAB_KEYWORDS.iter().any(|kw| matches_keyword(&lowered, kw)) {
            return ElementKind::Lab;
        }
        if PRACTICAL_KEYWORDS
            .iter()
            .any(|kw| matches_keyword(&lowered, kw))
        {
            return ElementKind::PracticalExam;
        }
        ElementKind::Assignment
    }

    /// Display label for logs and export metadata.
    pub fn label(&self) -> &'static str {
        match self {
            ElementKind::Assignment => "assignment",
            ElementKind::Lab => "lab",
            ElementKind::PracticalExam => "practical_exam",
        }
    }
}

fn matches_keyword(lowered_name: &str, keyword: &str) -> bool {
    if keyword.chars().count() <= 2 {
        lowered_name
            .split(|c: char| !c.is_alphanumeric())
            .any(|token| token == keyword)
    } else {
        lowered_name.contains(keyword)
    }
}

/// A syllabus unit: assignment, lab or practical exam.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseElement {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub semester_course_id: i64,
}

impl CourseElement {
    /// Inferred kind of this element.
    pub fn kind(&self) -> ElementKind {
        ElementKind::classify(&self.name)
    }
}

/// An assessment template attached to a course element.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentTemplate {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub course_element_id: i64,
}

/// A paper within a template, holding ordered questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub assessment_template_id: i64,
}

/// A question within a paper.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    #[serde(default)]
    pub paper_id: i64,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub score: f64,

    #[serde(default)]
    pub order: u32,
}

/// A scored sub-criterion within a question, referenced by grade items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricItem {
    pub id: i64,

    #[serde(default)]
    pub question_id: i64,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub max_score: f64,

    #[serde(default)]
    pub order: u32,
}

/// Submission-window status of a class assessment, decoded from the wire
/// code (1 = active, 2 = completed, else pending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "i32", rename_all = "lowercase")]
pub enum AssessmentStatus {
    #[default]
    Pending,
    Active,
    Completed,
}

impl From<i32> for AssessmentStatus {
    fn from(code: i32) -> Self {
        match code {
            1 => AssessmentStatus::Active,
            2 => AssessmentStatus::Completed,
            _ => AssessmentStatus::Pending,
        }
    }
}

/// The binding of an assessment template to a class section with a
/// submission time window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAssessment {
    pub id: i64,

    #[serde(default)]
    pub class_id: i64,

    #[serde(default)]
    pub course_element_id: i64,

    #[serde(default)]
    pub assessment_template_id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub start_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "de::lenient_datetime")]
    pub end_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub status: AssessmentStatus,
}
