// src/api/fake.rs

//! In-memory `DataSource` for unit tests, with per-endpoint failure
//! injection to exercise the fallback paths.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use crate::api::source::{
    ClassAssessmentFilter, DataSource, GradingGroupFilter, GradingSessionFilter, Page,
    SubmissionFilter,
};
use crate::error::{AppError, Result};
use crate::models::{
    Account, AssessmentTemplate, AssignRequest, ClassAssessment, ClassSection, CourseElement,
    GradeItem, GradingGroup, GradingSession, Paper, Question, RubricItem, Semester, Student,
    Submission,
};

/// Canned collections served to the engine under test.
#[derive(Debug, Default)]
pub struct FakeSource {
    pub accounts: Vec<Account>,
    pub semesters: Vec<Semester>,
    pub classes: Vec<ClassSection>,
    pub templates: Vec<AssessmentTemplate>,
    pub class_assessments: Vec<ClassAssessment>,
    pub submissions: Vec<Submission>,
    pub grading_groups: Vec<GradingGroup>,
    pub grading_sessions: Vec<GradingSession>,
    pub grade_items: Vec<GradeItem>,
    pub assign_requests: Vec<AssignRequest>,
    pub course_elements: Vec<CourseElement>,
    pub papers: Vec<Paper>,
    pub questions: Vec<Question>,
    pub rubric_items: Vec<RubricItem>,
    pub rosters: HashMap<i64, Vec<Student>>,
    /// Endpoint labels that reject instead of answering.
    pub fail: HashSet<&'static str>,
}

impl FakeSource {
    /// Make the named endpoint reject every call.
    pub fn fail_on(mut self, endpoint: &'static str) -> Self {
        self.fail.insert(endpoint);
        self
    }

    fn guard(&self, endpoint: &'static str) -> Result<()> {
        if self.fail.contains(endpoint) {
            return Err(AppError::api(endpoint, 503));
        }
        Ok(())
    }
}

#[async_trait]
impl DataSource for FakeSource {
    async fn list_accounts(&self, _page: u32, _page_size: u32) -> Result<Vec<Account>> {
        self.guard("accounts")?;
        Ok(self.accounts.clone())
    }

    async fn list_semesters(&self, _page: u32, _page_size: u32) -> Result<Vec<Semester>> {
        self.guard("semesters")?;
        Ok(self.semesters.clone())
    }

    async fn list_classes(&self) -> Result<Vec<ClassSection>> {
        self.guard("classes")?;
        Ok(self.classes.clone())
    }

    async fn list_assessment_templates(&self) -> Result<Page<AssessmentTemplate>> {
        self.guard("assessment_templates")?;
        Ok(Page::from(self.templates.clone()))
    }

    async fn list_class_assessments(
        &self,
        filter: ClassAssessmentFilter,
    ) -> Result<Page<ClassAssessment>> {
        self.guard("class_assessments")?;
        let items: Vec<_> = self
            .class_assessments
            .iter()
            .filter(|ca| filter.class_id.is_none_or(|id| ca.class_id == id))
            .filter(|ca| {
                filter
                    .course_element_id
                    .is_none_or(|id| ca.course_element_id == id)
            })
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_submissions(&self, filter: SubmissionFilter) -> Result<Vec<Submission>> {
        self.guard("submissions")?;
        Ok(self
            .submissions
            .iter()
            .filter(|s| {
                filter
                    .class_assessment_id
                    .is_none_or(|id| s.class_assessment_id == id)
            })
            .filter(|s| filter.student_id.is_none_or(|id| s.student_id == id))
            .cloned()
            .collect())
    }

    async fn list_grading_groups(&self, filter: GradingGroupFilter) -> Result<Vec<GradingGroup>> {
        self.guard("grading_groups")?;
        Ok(self
            .grading_groups
            .iter()
            .filter(|g| filter.id.is_none_or(|id| g.id == id))
            .filter(|g| {
                filter
                    .assessment_template_id
                    .is_none_or(|id| g.assessment_template_id == id)
            })
            .cloned()
            .collect())
    }

    async fn list_grading_sessions(
        &self,
        filter: GradingSessionFilter,
    ) -> Result<Page<GradingSession>> {
        self.guard("grading_sessions")?;
        let items: Vec<_> = self
            .grading_sessions
            .iter()
            .filter(|s| filter.submission_id.is_none_or(|id| s.submission_id == id))
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_assign_requests(
        &self,
        _page: u32,
        _page_size: u32,
    ) -> Result<Page<AssignRequest>> {
        self.guard("assign_requests")?;
        Ok(Page::from(self.assign_requests.clone()))
    }

    async fn list_course_elements(&self) -> Result<Vec<CourseElement>> {
        self.guard("course_elements")?;
        Ok(self.course_elements.clone())
    }

    async fn list_assessment_papers(&self, template_id: i64) -> Result<Page<Paper>> {
        self.guard("assessment_papers")?;
        let items: Vec<_> = self
            .papers
            .iter()
            .filter(|p| p.assessment_template_id == template_id)
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_assessment_questions(&self, paper_id: i64) -> Result<Page<Question>> {
        self.guard("assessment_questions")?;
        let items: Vec<_> = self
            .questions
            .iter()
            .filter(|q| q.paper_id == paper_id)
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_rubric_items(&self, question_id: i64) -> Result<Page<RubricItem>> {
        self.guard("rubric_items")?;
        let items: Vec<_> = self
            .rubric_items
            .iter()
            .filter(|r| r.question_id == question_id)
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_grade_items(&self, session_id: i64) -> Result<Page<GradeItem>> {
        self.guard("grade_items")?;
        let items: Vec<_> = self
            .grade_items
            .iter()
            .filter(|g| g.grading_session_id == session_id)
            .cloned()
            .collect();
        Ok(Page::from(items))
    }

    async fn list_students_in_class(&self, class_id: i64) -> Result<Vec<Student>> {
        self.guard("students")?;
        Ok(self.rosters.get(&class_id).cloned().unwrap_or_default())
    }
}
