//! Error types for keyframe loading, interpolation and consumer dispatch.

use serde::{Deserialize, Serialize};

use crate::value::ValueKind;

/// Every failure the animator can report.
///
/// All variants are fatal for the operation that raised them: a script either
/// loads completely or not at all, and a failed `set_time` leaves consumers in
/// whatever state the failing consumer reached.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum AnimatorError {
    /// The keyframe script could not be opened
    #[error("Error opening keyframes file: '{path}'")]
    ScriptNotFound { path: String },

    /// The keyframe script was opened but reading it failed
    #[error("Error reading keyframes file '{path}': {reason}")]
    ScriptRead { path: String, reason: String },

    /// A literal could not be converted to the declared value kind
    #[error("Error while parsing {kind}: '{token}'")]
    Parse { kind: String, token: String },

    /// A script line names a parameter nobody registered
    #[error("Parameter '{name}' on line {line} wasn't any of the registered parameters")]
    UnknownParameter { name: String, line: usize },

    /// The first keyframe does not provide a required parameter
    #[error("The value of '{name}' parameter wasn't provided in the first keyframe")]
    MissingRequiredParameter { name: String },

    /// Values of different kinds were bound to, or interpolated for, one parameter
    #[error("Type mismatch for '{parameter}': expected {expected:?}, got {actual:?}")]
    TypeMismatch {
        parameter: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    /// Array values of one parameter disagree on their length
    #[error("Array length mismatch for '{parameter}': expected {expected}, got {actual}")]
    ArrayLengthMismatch {
        parameter: String,
        expected: usize,
        actual: usize,
    },

    /// A keyframe time is smaller than the time of the keyframe before it
    #[error("Keyframe time {time} on line {line} precedes the previous keyframe at {previous}")]
    UnorderedKeyframes { line: usize, time: f64, previous: f64 },

    /// A script line is neither a time, a comment nor a `name:value` pair
    #[error("Malformed line {line}: '{content}'")]
    MalformedLine { line: usize, content: String },

    /// A consumer could not be configured from the values it was given
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Parameters were registered after keyframes had been loaded
    #[error("Parameter '{name}' registered after keyframes were loaded")]
    RegistryClosed { name: String },

    /// An operation needs keyframes but none have been loaded
    #[error("No keyframes loaded")]
    NotLoaded,

    /// A queried parameter is not part of the snapshot at the given time
    #[error("Parameter '{name}' not available at time {time}")]
    ParameterNotAvailable { name: String, time: f64 },

    /// Configuration (de)serialization failed
    #[error("Serialization error: {reason}")]
    Serialization { reason: String },
}

impl AnimatorError {
    /// Get error category for logging/metrics
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ScriptNotFound { .. } | Self::ScriptRead { .. } => "script",
            Self::Parse { .. }
            | Self::MalformedLine { .. }
            | Self::UnorderedKeyframes { .. } => "parse",
            Self::UnknownParameter { .. }
            | Self::MissingRequiredParameter { .. }
            | Self::RegistryClosed { .. } => "registry",
            Self::TypeMismatch { .. } | Self::ArrayLengthMismatch { .. } => "interpolation",
            Self::InvalidConfiguration { .. } => "consumer",
            Self::NotLoaded | Self::ParameterNotAvailable { .. } => "state",
            Self::Serialization { .. } => "serialization",
        }
    }

    pub(crate) fn parse(kind: &str, token: &str) -> Self {
        Self::Parse {
            kind: kind.to_string(),
            token: token.to_string(),
        }
    }

    /// Attach a parameter name to kind/length mismatches raised by interpolators
    pub fn for_parameter(self, name: &str) -> Self {
        match self {
            Self::TypeMismatch {
                expected, actual, ..
            } => Self::TypeMismatch {
                parameter: name.to_string(),
                expected,
                actual,
            },
            Self::ArrayLengthMismatch {
                expected, actual, ..
            } => Self::ArrayLengthMismatch {
                parameter: name.to_string(),
                expected,
                actual,
            },
            other => other,
        }
    }

    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for AnimatorError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            reason: err.to_string(),
        }
    }
}
