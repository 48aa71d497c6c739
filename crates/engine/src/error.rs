//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a submitted expense form is rejected.
//! - [`KeyNotFound`] thrown when an expense or category does not exist.
//! - [`InvalidPeriod`] thrown when a year/month pair is not a real month.
//! - [`Database`] thrown when the storage layer fails.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidPeriod`]: EngineError::InvalidPeriod
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Reasons an expense form can be rejected.
///
/// Every variant leaves the store untouched.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("amount and date are required")]
    MissingFields,
    #[error("invalid amount")]
    InvalidAmount,
    #[error("invalid date")]
    InvalidDate,
    #[error("invalid category")]
    InvalidCategory,
    #[error("description too long")]
    DescriptionTooLong,
}

impl ValidationError {
    /// Stable code used in redirect query strings.
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingFields => "missing_fields",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidDate => "invalid_date",
            Self::InvalidCategory => "invalid_category",
            Self::DescriptionTooLong => "description_too_long",
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
