// src/api/rest.rs

//! `DataSource` implementation over the REST client.
//!
//! One method per endpoint; filters become query parameters. Flat-array
//! endpoints discard the page wrapper after normalization.

use async_trait::async_trait;

use crate::api::client::ApiClient;
use crate::api::source::{
    ClassAssessmentFilter, DataSource, GradingGroupFilter, GradingSessionFilter, Page,
    SubmissionFilter,
};
use crate::error::Result;
use crate::models::{
    Account, AssessmentTemplate, AssignRequest, ClassAssessment, ClassSection, CourseElement,
    GradeItem, GradingGroup, GradingSession, Paper, Question, RubricItem, Semester, Student,
    Submission,
};

fn push_opt(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<i64>) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

fn paging(page: u32, page_size: u32) -> Vec<(&'static str, String)> {
    vec![("page", page.to_string()), ("pageSize", page_size.to_string())]
}

#[async_trait]
impl DataSource for ApiClient {
    async fn list_accounts(&self, page: u32, page_size: u32) -> Result<Vec<Account>> {
        let page = self
            .get_list::<Account>("accounts", &paging(page, page_size))
            .await?;
        Ok(page.items)
    }

    async fn list_semesters(&self, page: u32, page_size: u32) -> Result<Vec<Semester>> {
        Ok(self
            .get_list::<Semester>("semesters", &paging(page, page_size))
            .await?
            .items)
    }

    async fn list_classes(&self) -> Result<Vec<ClassSection>> {
        Ok(self.get_list::<ClassSection>("classes", &[]).await?.items)
    }

    async fn list_assessment_templates(&self) -> Result<Page<AssessmentTemplate>> {
        self.get_list("assessment-templates", &paging(1, self.page_size()))
            .await
    }

    async fn list_class_assessments(
        &self,
        filter: ClassAssessmentFilter,
    ) -> Result<Page<ClassAssessment>> {
        let mut query = Vec::new();
        push_opt(&mut query, "classId", filter.class_id);
        push_opt(&mut query, "courseElementId", filter.course_element_id);
        self.get_list("class-assessments", &query).await
    }

    async fn list_submissions(&self, filter: SubmissionFilter) -> Result<Vec<Submission>> {
        let mut query = Vec::new();
        push_opt(&mut query, "classAssessmentId", filter.class_assessment_id);
        push_opt(&mut query, "studentId", filter.student_id);
        Ok(self
            .get_list::<Submission>("submissions", &query)
            .await?
            .items)
    }

    async fn list_grading_groups(&self, filter: GradingGroupFilter) -> Result<Vec<GradingGroup>> {
        let mut query = Vec::new();
        push_opt(&mut query, "id", filter.id);
        push_opt(
            &mut query,
            "assessmentTemplateId",
            filter.assessment_template_id,
        );
        Ok(self
            .get_list::<GradingGroup>("grading-groups", &query)
            .await?
            .items)
    }

    async fn list_grading_sessions(
        &self,
        filter: GradingSessionFilter,
    ) -> Result<Page<GradingSession>> {
        let mut query = Vec::new();
        push_opt(&mut query, "submissionId", filter.submission_id);
        self.get_list("grading-sessions", &query).await
    }

    async fn list_assign_requests(&self, page: u32, page_size: u32) -> Result<Page<AssignRequest>> {
        self.get_list("assign-requests", &paging(page, page_size))
            .await
    }

    async fn list_course_elements(&self) -> Result<Vec<CourseElement>> {
        Ok(self
            .get_list::<CourseElement>("course-elements", &[])
            .await?
            .items)
    }

    async fn list_assessment_papers(&self, template_id: i64) -> Result<Page<Paper>> {
        let query = [("assessmentTemplateId", template_id.to_string())];
        self.get_list("assessment-papers", &query).await
    }

    async fn list_assessment_questions(&self, paper_id: i64) -> Result<Page<Question>> {
        let query = [("paperId", paper_id.to_string())];
        self.get_list("assessment-questions", &query).await
    }

    async fn list_rubric_items(&self, question_id: i64) -> Result<Page<RubricItem>> {
        let query = [("questionId", question_id.to_string())];
        self.get_list("rubric-items", &query).await
    }

    async fn list_grade_items(&self, session_id: i64) -> Result<Page<GradeItem>> {
        let query = [("gradingSessionId", session_id.to_string())];
        self.get_list("grade-items", &query).await
    }

    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<Student>> {
        let path = format!("classes/{class_id}/students");
        Ok(self.get_list::<Student>(&path, &[]).await?.items)
    }
}
