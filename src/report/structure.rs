// src/report/structure.rs

//! Grading-structure resolution.
//!
//! Resolves the paper → question → rubric-item tree for an assessment
//! template once per course element, so every student row reuses the same
//! structure instead of refetching it. Every fetch falls back to an empty
//! collection: a missing template or paper yields empty nested structures,
//! never an aborted row.

use futures::future;

use crate::api::{DataSource, GradingGroupFilter};
use crate::models::{ClassAssessment, Question, RubricItem, Submission};

/// The question and rubric tree shared by every row of one course element.
#[derive(Debug, Clone, Default)]
pub(crate) struct GradingStructure {
    pub questions: Vec<Question>,
    pub rubrics: Vec<RubricItem>,
}

/// Resolve the assessment template id for grading-structure lookup.
///
/// Prefers the template attached to the class assessment. Otherwise makes a
/// single best-effort attempt: the first submission carrying a
/// `grading_group_id` names the group whose template is used. No exhaustive
/// scan — if that one lookup misses, the structure stays empty.
pub(crate) async fn resolve_template_id(
    source: &dyn DataSource,
    assessment: &ClassAssessment,
    submissions: &[Submission],
) -> Option<i64> {
    if let Some(template_id) = assessment.assessment_template_id {
        return Some(template_id);
    }

    let group_id = submissions.iter().find_map(|s| s.grading_group_id)?;
    let groups = source
        .list_grading_groups(GradingGroupFilter {
            id: Some(group_id),
            ..GradingGroupFilter::default()
        })
        .await
        .unwrap_or_else(|error| {
            log::warn!("grading group {} lookup failed: {}", group_id, error);
            Vec::new()
        });

    groups
        .iter()
        .find(|g| g.id == group_id)
        .map(|g| g.assessment_template_id)
}

/// Fetch the full grading structure for a template.
pub(crate) async fn resolve_structure(
    source: &dyn DataSource,
    template_id: Option<i64>,
) -> GradingStructure {
    let Some(template_id) = template_id else {
        return GradingStructure::default();
    };

    let papers = source
        .list_assessment_papers(template_id)
        .await
        .map(|page| page.items)
        .unwrap_or_else(|error| {
            log::warn!("papers fetch failed for template {}: {}", template_id, error);
            Vec::new()
        });

    // Questions for all papers concurrently; failed papers contribute nothing.
    let question_lists = future::join_all(papers.iter().map(|paper| async move {
        source
            .list_assessment_questions(paper.id)
            .await
            .map(|page| page.items)
            .unwrap_or_else(|error| {
                log::warn!("questions fetch failed for paper {}: {}", paper.id, error);
                Vec::new()
            })
    }))
    .await;

    let mut questions: Vec<Question> = Vec::new();
    for mut list in question_lists {
        list.sort_by_key(|q| q.order);
        questions.append(&mut list);
    }

    // Rubric items for all questions concurrently, flattened in question order.
    let rubric_lists = future::join_all(questions.iter().map(|question| async move {
        source
            .list_rubric_items(question.id)
            .await
            .map(|page| page.items)
            .unwrap_or_else(|error| {
                log::warn!(
                    "rubric items fetch failed for question {}: {}",
                    question.id,
                    error
                );
                Vec::new()
            })
    }))
    .await;

    let mut rubrics: Vec<RubricItem> = Vec::new();
    for mut list in rubric_lists {
        list.sort_by_key(|r| r.order);
        rubrics.append(&mut list);
    }

    GradingStructure { questions, rubrics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeSource;
    use crate::models::{AssessmentTemplate, Paper};

    fn make_assessment(template_id: Option<i64>) -> ClassAssessment {
        let template = template_id
            .map(|id| id.to_string())
            .unwrap_or_else(|| "null".to_string());
        serde_json::from_str(&format!(
            r#"{{"id": 1, "classId": 1, "assessmentTemplateId": {template}}}"#
        ))
        .unwrap()
    }

    fn make_submission(id: i64, group: Option<i64>) -> Submission {
        let group = group
            .map(|g| g.to_string())
            .unwrap_or_else(|| "null".to_string());
        serde_json::from_str(&format!(r#"{{"id": {id}, "gradingGroupId": {group}}}"#)).unwrap()
    }

    fn structured_source() -> FakeSource {
        FakeSource {
            templates: vec![AssessmentTemplate {
                id: 7,
                name: "Lab 1".into(),
                course_element_id: 1,
            }],
            papers: vec![Paper {
                id: 70,
                name: "Paper A".into(),
                assessment_template_id: 7,
            }],
            questions: vec![
                serde_json::from_str(r#"{"id": 701, "paperId": 70, "order": 2}"#).unwrap(),
                serde_json::from_str(r#"{"id": 700, "paperId": 70, "order": 1}"#).unwrap(),
            ],
            rubric_items: vec![
                serde_json::from_str(r#"{"id": 7000, "questionId": 700, "order": 1}"#).unwrap(),
                serde_json::from_str(r#"{"id": 7010, "questionId": 701, "order": 1}"#).unwrap(),
            ],
            grading_groups: vec![
                serde_json::from_str(r#"{"id": 5, "lecturerId": 1, "assessmentTemplateId": 7}"#)
                    .unwrap(),
            ],
            ..FakeSource::default()
        }
    }

    #[tokio::test]
    async fn test_template_from_assessment_wins() {
        let source = structured_source();
        let id = resolve_template_id(&source, &make_assessment(Some(7)), &[]).await;
        assert_eq!(id, Some(7));
    }

    #[tokio::test]
    async fn test_template_via_first_submission_group() {
        let source = structured_source();
        let submissions = vec![
            make_submission(1, None),
            make_submission(2, Some(5)),
            make_submission(3, Some(999)), // never inspected
        ];
        let id = resolve_template_id(&source, &make_assessment(None), &submissions).await;
        assert_eq!(id, Some(7));
    }

    #[tokio::test]
    async fn test_template_unresolvable_without_groups() {
        let source = structured_source();
        let submissions = vec![make_submission(1, None)];
        let id = resolve_template_id(&source, &make_assessment(None), &submissions).await;
        assert_eq!(id, None);
    }

    #[tokio::test]
    async fn test_structure_ordered_by_question_order() {
        let source = structured_source();
        let structure = resolve_structure(&source, Some(7)).await;
        let question_ids: Vec<i64> = structure.questions.iter().map(|q| q.id).collect();
        assert_eq!(question_ids, vec![700, 701]);
        let rubric_ids: Vec<i64> = structure.rubrics.iter().map(|r| r.id).collect();
        assert_eq!(rubric_ids, vec![7000, 7010]);
    }

    #[tokio::test]
    async fn test_structure_empty_without_template() {
        let source = structured_source();
        let structure = resolve_structure(&source, None).await;
        assert!(structure.questions.is_empty());
        assert!(structure.rubrics.is_empty());
    }

    #[tokio::test]
    async fn test_structure_survives_paper_fetch_failure() {
        let source = structured_source().fail_on("assessment_papers");
        let structure = resolve_structure(&source, Some(7)).await;
        assert!(structure.questions.is_empty());
        assert!(structure.rubrics.is_empty());
    }
}
