// src/stats/grading.rs

//! Grading workflow statistics.

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{AssignRequest, AssignStatus, GradingGroup, GradingSession, GradingType, SessionStatus};

/// Counts per grading-session status.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SessionStatusBreakdown {
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Counts per grading-session producer.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct GradingTypeBreakdown {
    pub ai: usize,
    pub lecturer: usize,
    pub both: usize,
}

/// Pending assign requests for one lecturer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturerPending {
    pub lecturer_id: i64,
    pub pending: usize,
}

/// Aggregated grading statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GradingStats {
    pub total_grading_groups: usize,
    pub total_sessions: usize,
    pub session_status: SessionStatusBreakdown,
    pub session_types: GradingTypeBreakdown,
    pub pending_requests: usize,
    pub pending_by_lecturer: Vec<LecturerPending>,
}

/// Compute grading statistics.
pub fn compute_grading_stats(
    groups: &[GradingGroup],
    sessions: &[GradingSession],
    requests: &[AssignRequest],
) -> GradingStats {
    let mut stats = GradingStats {
        total_grading_groups: groups.len(),
        total_sessions: sessions.len(),
        ..GradingStats::default()
    };

    for session in sessions {
        match session.status {
            SessionStatus::Processing => stats.session_status.processing += 1,
            SessionStatus::Completed => stats.session_status.completed += 1,
            SessionStatus::Failed => stats.session_status.failed += 1,
        }
        match session.grading_type {
            GradingType::Ai => stats.session_types.ai += 1,
            GradingType::Lecturer => stats.session_types.lecturer += 1,
            GradingType::Both => stats.session_types.both += 1,
        }
    }

    let mut per_lecturer: HashMap<i64, usize> = HashMap::new();
    for request in requests {
        if request.status != AssignStatus::Pending {
            continue;
        }
        stats.pending_requests += 1;
        *per_lecturer.entry(request.assigned_lecturer_id).or_default() += 1;
    }
    let mut pending_by_lecturer: Vec<LecturerPending> = per_lecturer
        .into_iter()
        .map(|(lecturer_id, pending)| LecturerPending {
            lecturer_id,
            pending,
        })
        .collect();
    pending_by_lecturer.sort_by(|a, b| {
        b.pending
            .cmp(&a.pending)
            .then(a.lecturer_id.cmp(&b.lecturer_id))
    });
    stats.pending_by_lecturer = pending_by_lecturer;

    stats
}
