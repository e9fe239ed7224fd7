//! Shared tip-totals domain primitives.
//!
//! This crate owns record parsing, per-server aggregation, notification text,
//! and scan paging state. It excludes AWS SDK and Lambda runtime concerns,
//! which live in `tip_totals_lambda`.

pub mod config;
pub mod error;
pub mod notification;
pub mod paging;
pub mod record;
pub mod totals;
