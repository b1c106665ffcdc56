// src/stats/academic.rs

//! Academic (semester / class / lecturer) statistics.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::models::{ClassSection, Semester};
use crate::utils::math::round1;

/// Enrollment above this is an overloaded class.
const OVERLOAD_THRESHOLD: u32 = 50;

const TOP_CLASSES: usize = 10;
const TOP_LECTURERS: usize = 20;

/// Per-semester rollup, keyed by the semester display name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SemesterSummary {
    pub semester: String,
    pub classes: usize,
    pub students: u64,
    pub lecturers: usize,
}

/// One class in the enrollment ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassLoad {
    pub class_id: i64,
    pub course_name: String,
    pub lecturer_name: String,
    pub students: u32,
}

/// Per-lecturer teaching load.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LecturerLoad {
    pub lecturer_id: i64,
    pub lecturer_name: String,
    pub classes: usize,
    pub students: u64,
}

/// Aggregated academic statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AcademicStats {
    pub total_semesters: usize,
    pub total_classes: usize,
    pub unique_courses: usize,
    pub unique_lecturers: usize,
    pub total_students: u64,
    pub average_class_size: f64,
    pub student_lecturer_ratio: f64,
    pub overloaded_classes: usize,
    pub by_semester: Vec<SemesterSummary>,
    pub top_classes: Vec<ClassLoad>,
    pub lecturer_workload: Vec<LecturerLoad>,
}

/// Compute academic statistics over the fetched semesters and classes.
pub fn compute_academic_stats(semesters: &[Semester], classes: &[ClassSection]) -> AcademicStats {
    let total_classes = classes.len();
    let total_students: u64 = classes.iter().map(|c| u64::from(c.student_count)).sum();

    let unique_courses = classes
        .iter()
        .map(|c| c.course_name.as_str())
        .collect::<HashSet<_>>()
        .len();
    let lecturer_ids: HashSet<i64> = classes
        .iter()
        .map(|c| c.lecturer_id)
        .filter(|id| *id != 0)
        .collect();

    // Per-semester rollups, ascending by semester key.
    let mut by_semester: BTreeMap<&str, (usize, u64, HashSet<i64>)> = BTreeMap::new();
    for class in classes {
        let entry = by_semester.entry(class.semester_key()).or_default();
        entry.0 += 1;
        entry.1 += u64::from(class.student_count);
        if class.lecturer_id != 0 {
            entry.2.insert(class.lecturer_id);
        }
    }
    let by_semester = by_semester
        .into_iter()
        .map(|(semester, (classes, students, lecturers))| SemesterSummary {
            semester: semester.to_string(),
            classes,
            students,
            lecturers: lecturers.len(),
        })
        .collect();

    // Top classes by enrollment; stable sort keeps input order on ties.
    let mut top_classes: Vec<ClassLoad> = classes
        .iter()
        .map(|c| ClassLoad {
            class_id: c.id,
            course_name: c.course_name.clone(),
            lecturer_name: c.lecturer_name.clone(),
            students: c.student_count,
        })
        .collect();
    top_classes.sort_by_key(|c| std::cmp::Reverse(c.students));
    top_classes.truncate(TOP_CLASSES);

    // Lecturer workload, heaviest first.
    let mut workload: HashMap<i64, LecturerLoad> = HashMap::new();
    for class in classes {
        if class.lecturer_id == 0 {
            continue;
        }
        let entry = workload.entry(class.lecturer_id).or_insert_with(|| LecturerLoad {
            lecturer_id: class.lecturer_id,
            lecturer_name: class.lecturer_name.clone(),
            classes: 0,
            students: 0,
        });
        entry.classes += 1;
        entry.students += u64::from(class.student_count);
    }
    let mut lecturer_workload: Vec<LecturerLoad> = workload.into_values().collect();
    lecturer_workload.sort_by(|a, b| {
        b.classes
            .cmp(&a.classes)
            .then(a.lecturer_id.cmp(&b.lecturer_id))
    });
    lecturer_workload.truncate(TOP_LECTURERS);

    let average_class_size = if total_classes == 0 {
        0.0
    } else {
        round1(total_students as f64 / total_classes as f64)
    };
    let student_lecturer_ratio = if lecturer_ids.is_empty() {
        0.0
    } else {
        round1(total_students as f64 / lecturer_ids.len() as f64)
    };

    AcademicStats {
        total_semesters: semesters.len(),
        total_classes,
        unique_courses,
        unique_lecturers: lecturer_ids.len(),
        total_students,
        average_class_size,
        student_lecturer_ratio,
        overloaded_classes: classes
            .iter()
            .filter(|c| c.student_count > OVERLOAD_THRESHOLD)
            .count(),
        by_semester,
        top_classes,
        lecturer_workload,
    }
}
