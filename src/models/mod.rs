// src/models/mod.rs

//! Domain models for the reporting engine.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose. Entities are read-only projections of
//! wire payloads; all tolerance for loosely-typed fields lives in their
//! deserializers.

mod academic;
mod account;
mod assessment;
mod config;
mod grading;

// Re-export all public types
pub use academic::{ClassSection, Semester, Student};
pub use account::{Account, Gender, Role};
pub use assessment::{
    AssessmentStatus, AssessmentTemplate, ClassAssessment, CourseElement, ElementKind, Paper,
    Question, RubricItem,
};
pub use config::{ApiConfig, Config, ReportConfig};
pub use grading::{
    AssignRequest, AssignStatus, GradeItem, GradingGroup, GradingSession, GradingType,
    SessionStatus, Submission, SubmissionState,
};
