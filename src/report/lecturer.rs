// src/report/lecturer.rs

//! Lecturer-scoped report assembly: one row per (roster student, course
//! element), including students who never submitted.

use crate::api::DataSource;
use crate::error::{AppError, Result};
use crate::models::Student;
use crate::report::row::{ExportTypes, Feedback, ReportRow};
use crate::report::structure::{resolve_structure, resolve_template_id};
use crate::report::ReportAssembler;

impl ReportAssembler<'_> {
    /// Assemble the grade report for a whole class.
    ///
    /// Fails only when the final row set is empty; every upstream fetch
    /// degrades to empty collections instead.
    pub async fn assemble_lecturer_report(
        &self,
        class_id: i64,
        export_types: &ExportTypes,
    ) -> Result<Vec<ReportRow>> {
        let retained = self.retained_assessments(class_id, export_types).await;
        let roster: Vec<Student> = self
            .source
            .list_students_in_class(class_id)
            .await
            .unwrap_or_else(|error| {
                log::warn!("roster fetch failed for class {class_id}: {error}");
                Vec::new()
            });

        log::debug!(
            "assembling class {} report: {} course elements, {} students",
            class_id,
            retained.len(),
            roster.len()
        );

        let mut rows = Vec::new();
        for (assessment, element_name, kind) in &retained {
            let submissions = self.submissions_for(assessment.id).await;

            // The grading structure is fetched once per course element and
            // shared by every student row.
            let template_id = resolve_template_id(self.source, assessment, &submissions).await;
            let structure = resolve_structure(self.source, template_id).await;

            let resolved = self.resolve_roster(&roster, assessment.id, &submissions).await;
            for (submission, grading_session, grade_items) in resolved {
                rows.push(ReportRow {
                    submission,
                    grading_session,
                    grade_items,
                    questions: structure.questions.clone(),
                    rubrics: structure.rubrics.clone(),
                    course_element_name: element_name.clone(),
                    assignment_type: *kind,
                    feedback: Feedback::default(),
                });
            }
        }

        if rows.is_empty() {
            return Err(AppError::NothingToExport(format!("class {class_id}")));
        }
        Ok(rows)
    }
}
