// src/stats/assessments.rs

//! Assessment statistics.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{AssessmentTemplate, ClassAssessment, ElementKind, Submission};
use crate::utils::math::{percent, round2};

const TOP_ASSESSMENTS: usize = 10;
const UPCOMING_LIMIT: usize = 10;
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Counts per inferred element kind.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct KindBreakdown {
    pub assignment: usize,
    pub lab: usize,
    pub practical_exam: usize,
}

impl KindBreakdown {
    /// Tally a classified name.
    pub fn add(&mut self, kind: ElementKind) {
        match kind {
            ElementKind::Assignment => self.assignment += 1,
            ElementKind::Lab => self.lab += 1,
            ElementKind::PracticalExam => self.practical_exam += 1,
        }
    }
}

/// One class assessment in the submission-count ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentLoad {
    pub assessment_id: i64,
    pub name: String,
    pub submissions: usize,
}

/// An assessment closing within the upcoming window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingDeadline {
    pub assessment_id: i64,
    pub name: String,
    pub end_at: DateTime<Utc>,
}

/// Aggregated assessment statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentStats {
    pub total_templates: usize,
    pub total_assessments: usize,
    pub type_distribution: KindBreakdown,
    /// Share of submissions still without a grade, in percent.
    pub ungraded_rate: f64,
    pub average_submissions: f64,
    pub top_assessments: Vec<AssessmentLoad>,
    pub upcoming_deadlines: Vec<UpcomingDeadline>,
}

/// Compute assessment statistics.
pub fn compute_assessment_stats(
    templates: &[AssessmentTemplate],
    assessments: &[ClassAssessment],
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> AssessmentStats {
    let mut type_distribution = KindBreakdown::default();
    for template in templates {
        type_distribution.add(ElementKind::classify(&template.name));
    }

    let ungraded = submissions.iter().filter(|s| s.last_grade <= 0.0).count();
    let average_submissions = if assessments.is_empty() {
        0.0
    } else {
        round2(submissions.len() as f64 / assessments.len() as f64)
    };

    // Submission counts per class assessment.
    let mut per_assessment: HashMap<i64, usize> = HashMap::new();
    for submission in submissions {
        *per_assessment.entry(submission.class_assessment_id).or_default() += 1;
    }
    let names: HashMap<i64, &str> = assessments
        .iter()
        .map(|a| (a.id, a.name.as_str()))
        .collect();
    let mut top_assessments: Vec<AssessmentLoad> = per_assessment
        .into_iter()
        .map(|(assessment_id, submissions)| AssessmentLoad {
            assessment_id,
            name: names
                .get(&assessment_id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| format!("Assessment {assessment_id}")),
            submissions,
        })
        .collect();
    top_assessments.sort_by(|a, b| {
        b.submissions
            .cmp(&a.submissions)
            .then(a.assessment_id.cmp(&b.assessment_id))
    });
    top_assessments.truncate(TOP_ASSESSMENTS);

    // Deadlines inside [now, now + window].
    let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);
    let mut upcoming_deadlines: Vec<UpcomingDeadline> = assessments
        .iter()
        .filter_map(|a| {
            let end_at = a.end_at?;
            (end_at >= now && end_at <= horizon).then(|| UpcomingDeadline {
                assessment_id: a.id,
                name: a.name.clone(),
                end_at,
            })
        })
        .collect();
    upcoming_deadlines.sort_by_key(|d| d.end_at);
    upcoming_deadlines.truncate(UPCOMING_LIMIT);

    AssessmentStats {
        total_templates: templates.len(),
        total_assessments: assessments.len(),
        type_distribution,
        ungraded_rate: percent(ungraded, submissions.len()),
        average_submissions,
        top_assessments,
        upcoming_deadlines,
    }
}
