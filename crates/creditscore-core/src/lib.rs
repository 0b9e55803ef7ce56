//! creditscore Core
//!
//! Core types and utilities shared across creditscore components.
//!
//! This crate provides:
//! - Applicant attribute records and the typed applicant profile
//! - Prediction outcomes, credit categories, and lending decisions
//! - Error types and result handling
//! - JSON/YAML document loading for trained artifacts

pub mod document;
pub mod error;
pub mod types;

pub use document::{read_document, DocumentFormat};
pub use error::{Error, Result};
pub use types::{
    fields, ApplicantProfile, AttributeRecord, AttributeValue, CreditCategory, LoanDecision,
    PredictionOutcome,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::{
        ApplicantProfile, AttributeRecord, AttributeValue, CreditCategory, PredictionOutcome,
    };
}
