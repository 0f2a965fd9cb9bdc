//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`KeyNotFound`] thrown when a delete matched no row.
//! - [`InvalidRole`] thrown when a stored role is outside the known set.
//! - [`Serialization`] thrown when month data cannot be encoded as JSON.
//! - [`Database`] wraps any failure reported by the database.
//!
//!  [`KeyNotFound`]: EngineError::KeyNotFound
//!  [`InvalidRole`]: EngineError::InvalidRole
//!  [`Serialization`]: EngineError::Serialization
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0} not found")]
    KeyNotFound(String),
    #[error("invalid role: {0}")]
    InvalidRole(String),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidRole(a), Self::InvalidRole(b)) => a == b,
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
