// src/report/student.rs

//! Student-scoped report assembly: one row per course element the student
//! has submitted against.
//!
//! A student can resubmit, and grading runs asynchronously, so the
//! submission with the latest upload time and the submission holding the
//! newest grading session need not be the same record. The row baseline is
//! the time-latest submission; scoring data comes from the single newest
//! grading session across all of the element's submissions.

use crate::api::{DataSource, SubmissionFilter};
use crate::error::{AppError, Result};
use crate::models::{GradingSession, Submission};
use crate::report::ReportAssembler;
use crate::report::row::{ExportTypes, Feedback, ReportRow};
use crate::report::structure::{resolve_structure, resolve_template_id};

impl ReportAssembler<'_> {
    /// Assemble the grade report for one student in a class.
    pub async fn assemble_student_report(
        &self,
        class_id: i64,
        student_id: i64,
        export_types: &ExportTypes,
    ) -> Result<Vec<ReportRow>> {
        let retained = self.retained_assessments(class_id, export_types).await;
        let submissions = self
            .source
            .list_submissions(SubmissionFilter {
                student_id: Some(student_id),
                ..SubmissionFilter::default()
            })
            .await
            .unwrap_or_else(|error| {
                log::warn!("submissions fetch failed for student {student_id}: {error}");
                Vec::new()
            });

        let mut rows = Vec::new();
        for (assessment, element_name, kind) in &retained {
            let element_submissions: Vec<Submission> = submissions
                .iter()
                .filter(|s| s.class_assessment_id == assessment.id)
                .cloned()
                .collect();
            if element_submissions.is_empty() {
                continue;
            }

            // Row baseline: the submission with the latest non-empty upload
            // time, falling back to the first record.
            let baseline = element_submissions
                .iter()
                .filter(|s| s.submitted_at.is_some())
                .max_by_key(|s| s.submitted_at)
                .unwrap_or(&element_submissions[0])
                .clone();

            // Scoring data: the newest grading session across every
            // submission of this element, never a union of sessions.
            let mut all_sessions: Vec<GradingSession> = Vec::new();
            for submission in &element_submissions {
                all_sessions.extend(self.sessions_for(submission.id).await);
            }
            let latest = GradingSession::latest(&all_sessions).cloned();
            let grade_items = self.grade_items_for(latest.as_ref()).await;

            let template_id =
                resolve_template_id(self.source, assessment, &element_submissions).await;
            let structure = resolve_structure(self.source, template_id).await;

            rows.push(ReportRow {
                submission: baseline,
                grading_session: latest,
                grade_items,
                questions: structure.questions,
                rubrics: structure.rubrics,
                course_element_name: element_name.clone(),
                assignment_type: *kind,
                feedback: Feedback::default(),
            });
        }

        if rows.is_empty() {
            return Err(AppError::NothingToExport(format!(
                "student {student_id} in class {class_id}"
            )));
        }
        Ok(rows)
    }
}
