// src/api/mod.rs

//! Data source adapters for the grading platform REST API.
//!
//! Every collection the engine aggregates over is fetched through the
//! [`DataSource`] trait; the REST implementation lives in [`client`] and
//! performs all payload-shape validation at this boundary so the aggregation
//! layers only ever see typed collections.

mod client;
mod rest;
mod source;

#[cfg(test)]
pub(crate) mod fake;

pub use client::ApiClient;
pub use source::{
    ClassAssessmentFilter, DataSource, GradingGroupFilter, GradingSessionFilter, Page,
    SubmissionFilter,
};
