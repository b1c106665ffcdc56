// src/api/source.rs

//! The data-source seam between the engine and the REST transport.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{
    Account, AssessmentTemplate, AssignRequest, ClassAssessment, ClassSection, CourseElement,
    GradeItem, GradingGroup, GradingSession, Paper, Question, RubricItem, Semester, Student,
    Submission,
};

/// One page of a paginated collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    /// The empty page, used as the fallback for failed or malformed fetches.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<Vec<T>> for Page<T> {
    fn from(items: Vec<T>) -> Self {
        let total = items.len() as u64;
        Self { items, total }
    }
}

/// Server-side filter for class assessments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassAssessmentFilter {
    pub class_id: Option<i64>,
    pub course_element_id: Option<i64>,
}

/// Server-side filter for submissions.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionFilter {
    pub class_assessment_id: Option<i64>,
    pub student_id: Option<i64>,
}

/// Server-side filter for grading groups.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradingGroupFilter {
    pub id: Option<i64>,
    pub assessment_template_id: Option<i64>,
}

/// Server-side filter for grading sessions.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradingSessionFilter {
    pub submission_id: Option<i64>,
}

/// Read-only access to the grading platform's collections.
///
/// Each operation is one independent REST call; callers decide how failures
/// are absorbed. No caching, no retries.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn list_accounts(&self, page: u32, page_size: u32) -> Result<Vec<Account>>;

    async fn list_semesters(&self, page: u32, page_size: u32) -> Result<Vec<Semester>>;

    async fn list_classes(&self) -> Result<Vec<ClassSection>>;

    async fn list_assessment_templates(&self) -> Result<Page<AssessmentTemplate>>;

    async fn list_class_assessments(
        &self,
        filter: ClassAssessmentFilter,
    ) -> Result<Page<ClassAssessment>>;

    async fn list_submissions(&self, filter: SubmissionFilter) -> Result<Vec<Submission>>;

    async fn list_grading_groups(&self, filter: GradingGroupFilter) -> Result<Vec<GradingGroup>>;

    async fn list_grading_sessions(
        &self,
        filter: GradingSessionFilter,
    ) -> Result<Page<GradingSession>>;

    async fn list_assign_requests(&self, page: u32, page_size: u32) -> Result<Page<AssignRequest>>;

    async fn list_course_elements(&self) -> Result<Vec<CourseElement>>;

    async fn list_assessment_papers(&self, template_id: i64) -> Result<Page<Paper>>;

    async fn list_assessment_questions(&self, paper_id: i64) -> Result<Page<Question>>;

    async fn list_rubric_items(&self, question_id: i64) -> Result<Page<RubricItem>>;

    async fn list_grade_items(&self, session_id: i64) -> Result<Page<GradeItem>>;

    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<Student>>;
}
