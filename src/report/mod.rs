// src/report/mod.rs

//! Report assembly.
//!
//! Joins submissions, grading sessions, grade items, questions and rubric
//! items into one denormalized row per (student, course element), filling
//! gaps for students without submissions and deduplicating grading data by
//! "latest wins". Every fetch here falls back to an empty collection; the
//! only error surfaced is an empty final row set.

mod lecturer;
mod row;
mod structure;
mod student;

use futures::{StreamExt, stream};

use crate::api::{ClassAssessmentFilter, DataSource, GradingSessionFilter, SubmissionFilter};
use crate::models::{
    ClassAssessment, CourseElement, ElementKind, GradeItem, GradingSession, Student, Submission,
};

pub use row::{ExportTypes, Feedback, ReportRow};

/// Report assembler over a data source.
pub struct ReportAssembler<'a> {
    source: &'a dyn DataSource,
    max_concurrent: usize,
}

impl<'a> ReportAssembler<'a> {
    /// Create an assembler. `max_concurrent` bounds the per-student fetch
    /// batch so large rosters do not overwhelm the backend.
    pub fn new(source: &'a dyn DataSource, max_concurrent: usize) -> Self {
        Self {
            source,
            max_concurrent: max_concurrent.max(1),
        }
    }

    /// Class assessments of the class whose inferred kind is requested,
    /// paired with their display name and kind.
    ///
    /// The course element's name drives classification; assessments whose
    /// element is missing from the element list fall back to their own name.
    pub(crate) async fn retained_assessments(
        &self,
        class_id: i64,
        export_types: &ExportTypes,
    ) -> Vec<(ClassAssessment, String, ElementKind)> {
        let assessments = self
            .source
            .list_class_assessments(ClassAssessmentFilter {
                class_id: Some(class_id),
                ..ClassAssessmentFilter::default()
            })
            .await
            .map(|page| page.items)
            .unwrap_or_else(|error| {
                log::warn!("class assessments fetch failed for class {class_id}: {error}");
                Vec::new()
            });

        let elements: Vec<CourseElement> =
            self.source.list_course_elements().await.unwrap_or_else(|error| {
                log::warn!("course elements fetch failed: {error}");
                Vec::new()
            });

        assessments
            .into_iter()
            .filter_map(|assessment| {
                let name = elements
                    .iter()
                    .find(|e| e.id == assessment.course_element_id)
                    .map(|e| e.name.clone())
                    .filter(|n| !n.trim().is_empty())
                    .unwrap_or_else(|| assessment.name.clone());
                let kind = ElementKind::classify(&name);
                export_types.includes(kind).then_some((assessment, name, kind))
            })
            .collect()
    }

    /// Submissions scoped to one class assessment, empty on failure.
    pub(crate) async fn submissions_for(&self, class_assessment_id: i64) -> Vec<Submission> {
        self.source
            .list_submissions(SubmissionFilter {
                class_assessment_id: Some(class_assessment_id),
                ..SubmissionFilter::default()
            })
            .await
            .unwrap_or_else(|error| {
                log::warn!("submissions fetch failed for assessment {class_assessment_id}: {error}");
                Vec::new()
            })
    }

    /// Grading sessions of one submission, empty on failure.
    pub(crate) async fn sessions_for(&self, submission_id: i64) -> Vec<GradingSession> {
        self.source
            .list_grading_sessions(GradingSessionFilter {
                submission_id: Some(submission_id),
            })
            .await
            .map(|page| page.items)
            .unwrap_or_else(|error| {
                log::warn!("grading sessions fetch failed for submission {submission_id}: {error}");
                Vec::new()
            })
    }

    /// Grade items of one grading session, empty on failure.
    pub(crate) async fn grade_items_for(&self, session: Option<&GradingSession>) -> Vec<GradeItem> {
        let Some(session) = session else {
            return Vec::new();
        };
        self.source
            .list_grade_items(session.id)
            .await
            .map(|page| page.items)
            .unwrap_or_else(|error| {
                log::warn!("grade items fetch failed for session {}: {}", session.id, error);
                Vec::new()
            })
    }

    /// Resolve one roster student's submission and grading data.
    ///
    /// Students without a submission get the placeholder record with no
    /// session and no items.
    pub(crate) async fn resolve_student_row(
        &self,
        student: &Student,
        class_assessment_id: i64,
        submissions: &[Submission],
    ) -> (Submission, Option<GradingSession>, Vec<GradeItem>) {
        let submission = submissions
            .iter()
            .find(|s| s.student_id == student.id)
            .cloned()
            .unwrap_or_else(|| Submission::placeholder(student, class_assessment_id));

        if submission.id == 0 {
            return (submission, None, Vec::new());
        }

        let sessions = self.sessions_for(submission.id).await;
        let latest = GradingSession::latest(&sessions).cloned();
        let items = self.grade_items_for(latest.as_ref()).await;
        (submission, latest, items)
    }

    /// Run the per-student resolution as a bounded-concurrency batch,
    /// preserving roster order.
    pub(crate) async fn resolve_roster(
        &self,
        roster: &[Student],
        class_assessment_id: i64,
        submissions: &[Submission],
    ) -> Vec<(Submission, Option<GradingSession>, Vec<GradeItem>)> {
        stream::iter(roster)
            .map(|student| self.resolve_student_row(student, class_assessment_id, submissions))
            .buffered(self.max_concurrent)
            .collect()
            .await
    }
}
