use thiserror::Error;

/// Failures raised while resolving kinds or building entities from flat maps.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("unknown entity kind: {0}")]
    UnknownEntityKind(String),
    #[error("malformed timestamp in `{field}`: {value}")]
    MalformedTimestamp { field: &'static str, value: String },
    #[error("invalid identity: `{0}` must not be null")]
    InvalidIdentity(&'static str),
    #[error("invalid attribute for {kind}: {reason}")]
    InvalidAttribute { kind: String, reason: String },
}

impl ModelError {
    pub fn invalid_attribute(kind: impl ToString, reason: impl Into<String>) -> Self {
        Self::InvalidAttribute { kind: kind.to_string(), reason: reason.into() }
    }
}
