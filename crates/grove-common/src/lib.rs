//! Common types and utilities for the grove semantic annotator.
//!
//! This crate provides foundational types used across all grove crates:
//! - Source spans (`Span`)
//! - Diagnostic categories, message keys and the message table
//! - Message formatting (`format_message`)
//! - Walk limits shared by the binder and checker

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Diagnostic message table and formatting
pub mod diagnostics;
pub use diagnostics::{
    DiagnosticCategory, DiagnosticMessage, HighlightKind, diagnostic_codes, diagnostic_messages,
    format_message,
};

// Centralized limits and thresholds
pub mod limits;
