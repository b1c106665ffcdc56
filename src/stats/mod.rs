// src/stats/mod.rs

//! Dashboard aggregation.
//!
//! The aggregator fan-out queries every metric group concurrently, absorbs
//! per-group failures into named zero defaults, and derives the dashboard
//! statistics from whatever arrived. It never fails because one source is
//! unavailable; the caller always receives a fully-shaped result.

mod academic;
mod assessments;
mod charts;
mod fetch;
mod grading;
mod submissions;
mod users;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::{
    ClassAssessmentFilter, DataSource, GradingGroupFilter, GradingSessionFilter, SubmissionFilter,
};
use fetch::{fallback, try_fetch};

pub use academic::{AcademicStats, ClassLoad, LecturerLoad, SemesterSummary, compute_academic_stats};
pub use assessments::{
    AssessmentLoad, AssessmentStats, KindBreakdown, UpcomingDeadline, compute_assessment_stats,
};
pub use charts::{ChartData, MonthCount, SemesterActivity, StatusBreakdown};
pub use grading::{
    GradingStats, GradingTypeBreakdown, LecturerPending, SessionStatusBreakdown,
    compute_grading_stats,
};
pub use submissions::{
    DayCount, GradeRanges, StudentActivity, SubmissionStats, compute_submission_stats,
};
pub use users::{GenderBreakdown, RoleBreakdown, UserStats, compute_user_stats};

/// The administrative dashboard overview.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct DashboardOverview {
    pub users: UserStats,
    pub academic: AcademicStats,
    pub assessments: AssessmentStats,
    pub submissions: SubmissionStats,
    pub grading: GradingStats,
}

/// Dashboard aggregator over a data source.
pub struct Dashboard<'a> {
    source: &'a dyn DataSource,
    page_size: u32,
}

impl<'a> Dashboard<'a> {
    /// Create an aggregator. `page_size` bounds the account and
    /// assign-request fetches.
    pub fn new(source: &'a dyn DataSource, page_size: u32) -> Self {
        Self { source, page_size }
    }

    /// Compute the dashboard overview against the current remote state.
    pub async fn overview(&self) -> DashboardOverview {
        self.overview_at(Utc::now()).await
    }

    /// Compute the overview with an explicit clock, for deterministic runs.
    pub async fn overview_at(&self, now: DateTime<Utc>) -> DashboardOverview {
        let (
            accounts,
            semesters,
            classes,
            templates,
            assessments,
            submissions,
            grading_groups,
            grading_sessions,
            assign_requests,
        ) = futures::join!(
            try_fetch(
                "accounts",
                self.source.list_accounts(1, self.page_size),
                fallback::no_accounts,
            ),
            try_fetch(
                "semesters",
                self.source.list_semesters(1, self.page_size),
                fallback::no_semesters,
            ),
            try_fetch("classes", self.source.list_classes(), fallback::no_classes),
            try_fetch(
                "assessment templates",
                self.source.list_assessment_templates(),
                fallback::no_templates,
            ),
            try_fetch(
                "class assessments",
                self.source
                    .list_class_assessments(ClassAssessmentFilter::default()),
                fallback::no_class_assessments,
            ),
            try_fetch(
                "submissions",
                self.source.list_submissions(SubmissionFilter::default()),
                fallback::no_submissions,
            ),
            try_fetch(
                "grading groups",
                self.source.list_grading_groups(GradingGroupFilter::default()),
                fallback::no_grading_groups,
            ),
            try_fetch(
                "grading sessions",
                self.source
                    .list_grading_sessions(GradingSessionFilter::default()),
                fallback::no_grading_sessions,
            ),
            try_fetch(
                "assign requests",
                self.source.list_assign_requests(1, self.page_size),
                fallback::no_assign_requests,
            ),
        );

        DashboardOverview {
            users: compute_user_stats(&accounts, now.date_naive()),
            academic: compute_academic_stats(&semesters, &classes),
            assessments: compute_assessment_stats(
                &templates.items,
                &assessments.items,
                &submissions,
                now,
            ),
            submissions: compute_submission_stats(&submissions),
            grading: compute_grading_stats(
                &grading_groups,
                &grading_sessions.items,
                &assign_requests.items,
            ),
        }
    }

    /// Compute the dashboard chart series, with the same fault isolation.
    pub async fn chart_series(&self) -> ChartData {
        let (submissions, classes, templates, assessments, grading_sessions) = futures::join!(
            try_fetch(
                "submissions",
                self.source.list_submissions(SubmissionFilter::default()),
                fallback::no_submissions,
            ),
            try_fetch("classes", self.source.list_classes(), fallback::no_classes),
            try_fetch(
                "assessment templates",
                self.source.list_assessment_templates(),
                fallback::no_templates,
            ),
            try_fetch(
                "class assessments",
                self.source
                    .list_class_assessments(ClassAssessmentFilter::default()),
                fallback::no_class_assessments,
            ),
            try_fetch(
                "grading sessions",
                self.source
                    .list_grading_sessions(GradingSessionFilter::default()),
                fallback::no_grading_sessions,
            ),
        );

        ChartData {
            monthly_growth: charts::compute_monthly_growth(&submissions),
            semester_activity: charts::compute_semester_activity(&classes),
            type_distribution: charts::compute_type_distribution(&templates.items),
            status_distribution: charts::compute_status_distribution(&assessments.items),
            grading_by_day: charts::compute_grading_by_day(&grading_sessions.items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use crate::utils::de::parse_datetime;

    fn seeded_source() -> FakeSource {
        FakeSource {
            accounts: (0..6)
                .map(|i| serde_json::from_str(&format!(r#"{{"id": {i}, "role": 2}}"#)).unwrap())
                .chain([
                    serde_json::from_str(r#"{"id": 6, "role": 1}"#).unwrap(),
                    serde_json::from_str(r#"{"id": 7, "role": 1}"#).unwrap(),
                    serde_json::from_str(r#"{"id": 8, "role": 0}"#).unwrap(),
                    serde_json::from_str(r#"{"id": 9, "role": 3}"#).unwrap(),
                ])
                .collect(),
            classes: vec![
                serde_json::from_str(
                    r#"{"id": 1, "courseName": "PRF192", "semesterName": "SP24",
                        "lecturerId": 6, "lecturerName": "Ha", "studentCount": "45"}"#,
                )
                .unwrap(),
            ],
            submissions: vec![
                serde_json::from_str(
                    r#"{"id": 1, "studentId": 1, "classAssessmentId": 1,
                        "lastGrade": 9.0, "submittedAt": "2024-01-01T10:00:00Z"}"#,
                )
                .unwrap(),
                serde_json::from_str(
                    r#"{"id": 2, "studentId": 2, "classAssessmentId": 1,
                        "lastGrade": 0, "submittedAt": "2024-01-02T10:00:00Z"}"#,
                )
                .unwrap(),
                serde_json::from_str(
                    r#"{"id": 3, "studentId": 3, "classAssessmentId": 1, "lastGrade": 0}"#,
                )
                .unwrap(),
            ],
            grading_groups: vec![
                serde_json::from_str(r#"{"id": 1, "lecturerId": 6, "assessmentTemplateId": 1}"#)
                    .unwrap(),
            ],
            grading_sessions: vec![
                serde_json::from_str(
                    r#"{"id": 1, "submissionId": 1, "status": 2, "gradingType": 1,
                        "createdAt": "2024-01-01T12:00:00Z"}"#,
                )
                .unwrap(),
            ],
            ..FakeSource::default()
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        parse_datetime("2024-03-01T00:00:00Z").unwrap()
    }

    #[tokio::test]
    async fn test_overview_is_idempotent() {
        let source = seeded_source();
        let dashboard = Dashboard::new(&source, 100);
        let first = dashboard.overview_at(fixed_now()).await;
        let second = dashboard.overview_at(fixed_now()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_overview_role_and_submission_scenario() {
        let source = seeded_source();
        let overview = Dashboard::new(&source, 100).overview_at(fixed_now()).await;

        assert_eq!(overview.users.total, 10);
        assert_eq!(overview.users.by_role.student, 6);
        assert_eq!(overview.users.by_role.lecturer, 2);
        assert_eq!(overview.users.by_role.admin, 1);
        assert_eq!(overview.users.by_role.hod, 1);

        assert_eq!(overview.submissions.graded, 1);
        assert_eq!(overview.submissions.pending, 1);
        assert_eq!(overview.submissions.not_submitted, 1);
        assert_eq!(overview.submissions.completion_rate, 33.33);
    }

    #[tokio::test]
    async fn test_grading_group_failure_is_isolated() {
        let baseline = Dashboard::new(&seeded_source(), 100)
            .overview_at(fixed_now())
            .await;

        let broken = seeded_source().fail_on("grading_groups");
        let degraded = Dashboard::new(&broken, 100).overview_at(fixed_now()).await;

        assert_eq!(degraded.grading.total_grading_groups, 0);
        // Everything fed by other fetches is untouched.
        assert_eq!(degraded.users, baseline.users);
        assert_eq!(degraded.academic, baseline.academic);
        assert_eq!(degraded.assessments, baseline.assessments);
        assert_eq!(degraded.submissions, baseline.submissions);
        assert_eq!(
            degraded.grading.session_status,
            baseline.grading.session_status
        );
    }

    #[tokio::test]
    async fn test_grading_session_failure_is_isolated() {
        let broken = seeded_source().fail_on("grading_sessions");
        let degraded = Dashboard::new(&broken, 100).overview_at(fixed_now()).await;

        assert_eq!(degraded.grading.total_sessions, 0);
        assert_eq!(degraded.grading.session_status, SessionStatusBreakdown::default());
        assert_eq!(degraded.grading.total_grading_groups, 1);
        assert_eq!(degraded.users.total, 10);
    }

    #[tokio::test]
    async fn test_all_sources_down_yields_zero_shape() {
        let mut source = FakeSource::default();
        for endpoint in [
            "accounts",
            "semesters",
            "classes",
            "assessment_templates",
            "class_assessments",
            "submissions",
            "grading_groups",
            "grading_sessions",
            "assign_requests",
        ] {
            source.fail.insert(endpoint);
        }
        let overview = Dashboard::new(&source, 100).overview_at(fixed_now()).await;
        assert_eq!(overview, DashboardOverview::default());
    }

    #[tokio::test]
    async fn test_chart_series_fault_isolation() {
        let source = seeded_source().fail_on("submissions");
        let charts = Dashboard::new(&source, 100).chart_series().await;
        assert!(charts.monthly_growth.is_empty());
        assert_eq!(charts.grading_by_day.len(), 1);
        assert_eq!(charts.semester_activity.len(), 1);
    }
}
