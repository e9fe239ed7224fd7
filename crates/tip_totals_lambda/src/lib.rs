//! AWS-oriented adapters and handlers for the daily tip totals function.
//!
//! This crate owns runtime integration details (the Lambda handler, the
//! DynamoDB scan and SNS publish adapters) on top of the domain primitives in
//! `tip_totals_core`.

pub mod adapters;
pub mod handlers;
pub mod logging;
