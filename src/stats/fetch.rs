// src/stats/fetch.rs

//! Fault isolation for the dashboard fan-out.
//!
//! Every metric group is fetched through [`try_fetch`], which absorbs the
//! failure of that one group into its named zero default. The defaults are
//! defined once here so no call site can redefine a fallback shape.

use std::future::Future;

use crate::api::Page;
use crate::error::Result;
use crate::models::{
    Account, AssessmentTemplate, AssignRequest, ClassAssessment, ClassSection, GradingGroup,
    GradingSession, Semester, Submission,
};

/// Await a metric-group fetch, substituting the group's fallback on failure.
///
/// The error is logged and swallowed; one unavailable source must never
/// abort the surrounding aggregation.
pub(crate) async fn try_fetch<T, F>(what: &str, fut: F, fallback: fn() -> T) -> T
where
    F: Future<Output = Result<T>>,
{
    match fut.await {
        Ok(value) => value,
        Err(error) => {
            log::warn!("{} fetch failed, using empty fallback: {}", what, error);
            fallback()
        }
    }
}

/// Named zero defaults, one per metric group.
pub(crate) mod fallback {
    use super::*;

    pub fn no_accounts() -> Vec<Account> {
        Vec::new()
    }

    pub fn no_semesters() -> Vec<Semester> {
        Vec::new()
    }

    pub fn no_classes() -> Vec<ClassSection> {
        Vec::new()
    }

    pub fn no_templates() -> Page<AssessmentTemplate> {
        Page::empty()
    }

    pub fn no_class_assessments() -> Page<ClassAssessment> {
        Page::empty()
    }

    pub fn no_submissions() -> Vec<Submission> {
        Vec::new()
    }

    pub fn no_grading_groups() -> Vec<GradingGroup> {
        Vec::new()
    }

    pub fn no_grading_sessions() -> Page<GradingSession> {
        Page::empty()
    }

    pub fn no_assign_requests() -> Page<AssignRequest> {
        Page::empty()
    }
}
