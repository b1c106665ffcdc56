// src/models/academic.rs

//! Semester, class section and roster entities.

use serde::{Deserialize, Serialize};

use crate::utils::de;

/// An academic semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: i64,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,
}

/// A class section within a semester course.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSection {
    pub id: i64,

    #[serde(default)]
    pub course_name: String,

    #[serde(default)]
    pub semester_name: Option<String>,

    #[serde(default)]
    pub lecturer_id: i64,

    #[serde(default)]
    pub lecturer_name: String,

    /// Enrollment count; arrives string-typed from some endpoints
    #[serde(default, deserialize_with = "de::string_or_number")]
    pub student_count: u32,
}

impl ClassSection {
    /// Grouping key for per-semester rollups.
    pub fn semester_key(&self) -> &str {
        self.semester_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Unknown")
    }
}

/// A student on a class roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: i64,

    #[serde(default)]
    pub code: String,

    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_count_string_typed() {
        let class: ClassSection =
            serde_json::from_str(r#"{"id": 1, "courseName": "PRF192", "studentCount": "45"}"#)
                .unwrap();
        assert_eq!(class.student_count, 45);
    }

    #[test]
    fn test_student_count_invalid_is_zero() {
        let class: ClassSection =
            serde_json::from_str(r#"{"id": 1, "studentCount": "n/a"}"#).unwrap();
        assert_eq!(class.student_count, 0);
    }

    #[test]
    fn test_semester_key_fallback() {
        let class: ClassSection = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(class.semester_key(), "Unknown");

        let class: ClassSection =
            serde_json::from_str(r#"{"id": 1, "semesterName": "  "}"#).unwrap();
        assert_eq!(class.semester_key(), "Unknown");

        let class: ClassSection =
            serde_json::from_str(r#"{"id": 1, "semesterName": "Fall2024"}"#).unwrap();
        assert_eq!(class.semester_key(), "Fall2024");
    }
}
