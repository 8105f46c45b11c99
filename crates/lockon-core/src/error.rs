//! Error type for session construction and host plumbing.
//!
//! Running out of targets mid-session is not an error: those outcomes are
//! reported as [`EndReason`](crate::enums::EndReason) values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    /// A configuration value or a derived input would feed NaN into the math.
    #[error("invalid configuration: {field} {reason}")]
    ConfigurationInvalid {
        field: &'static str,
        reason: String,
    },

    /// A required host object (camera, owner, world) could not be resolved.
    #[error("missing collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// A scenario document could not be decoded.
    #[error("scenario parse error: {0}")]
    ScenarioParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl LockError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::ConfigurationInvalid {
            field,
            reason: reason.into(),
        }
    }
}
