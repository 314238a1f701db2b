//! Errors raised by hook callbacks and by typed hook conversions.

use quire_core::error::{AppError, ErrorKind};
use thiserror::Error;

/// Error produced while registering against or dispatching a hook.
#[derive(Debug, Error)]
pub enum HookError {
    /// A hook name failed validation.
    #[error("Invalid hook name: {reason}")]
    InvalidName {
        /// Why the name was rejected.
        reason: String,
    },

    /// A registered callback failed.
    #[error("{message}")]
    Callback {
        /// Message supplied by the callback.
        message: String,
        /// Optional underlying cause.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An argument or value could not be converted into the type a typed
    /// callback expects.
    #[error("Hook '{hook}' argument {position} could not be decoded: {source}")]
    Decode {
        /// Hook being dispatched.
        hook: String,
        /// Argument position, `0` being the filtered value.
        position: usize,
        /// Conversion failure.
        #[source]
        source: serde_json::Error,
    },

    /// A typed value could not be converted into a hook argument.
    #[error("Hook '{hook}' value could not be encoded: {source}")]
    Encode {
        /// Hook being dispatched.
        hook: String,
        /// Conversion failure.
        #[source]
        source: serde_json::Error,
    },
}

impl HookError {
    /// Creates a callback failure with a message.
    pub fn callback(message: impl Into<String>) -> Self {
        Self::Callback {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a callback failure wrapping an underlying error.
    pub fn callback_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Callback {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<HookError> for AppError {
    fn from(err: HookError) -> Self {
        let kind = match &err {
            HookError::InvalidName { .. } => ErrorKind::Validation,
            HookError::Callback { .. } => ErrorKind::Plugin,
            HookError::Decode { .. } | HookError::Encode { .. } => ErrorKind::Serialization,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
