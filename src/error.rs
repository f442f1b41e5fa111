//! Error types for registration and dispatch.
//!
//! [`DispatchError`] covers every per-request failure. Routing failures map to
//! a not-found response; everything else collapses to a generic server error
//! at the dispatch boundary, with the detail kept for logging only.
//!
//! [`RegistrationError`] is returned while the routing table is being built,
//! before any request is served.

use crate::coerce::DeclaredType;
use http::Method;
use thiserror::Error;

/// Per-request failure raised somewhere in the dispatch pipeline.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// No registered route matches the method and path
    #[error("no route matches {method} {path}")]
    RouteNotFound {
        /// Request method as received (normalized to upper case)
        method: String,
        /// Request path without the query string
        path: String,
    },

    /// No argument resolver claims the parameter
    #[error("no argument resolver supports parameter '{name}' of type {declared_type}")]
    UnsupportedParameterType {
        /// Declared parameter name
        name: String,
        /// Declared parameter type
        declared_type: DeclaredType,
    },

    /// A path-variable parameter has no matching capture in the route match
    #[error("path variable '{name}' was not captured by the matched route")]
    MissingPathVariable {
        /// Declared parameter name
        name: String,
    },

    /// A request parameter or header is absent and has no default
    #[error("required parameter '{name}' is missing")]
    MissingRequiredParameter {
        /// Declared parameter name
        name: String,
    },

    /// The raw value could not be parsed into the target type
    #[error("cannot convert '{raw}' to {target}")]
    CoercionFailed {
        /// The offending raw string
        raw: String,
        /// The declared target type
        target: DeclaredType,
    },

    /// The declared type has no string conversion
    #[error("type {target} cannot be converted from a request value")]
    UnsupportedCoercionType {
        /// The declared target type
        target: DeclaredType,
    },

    /// No view resolver claims the logical view name
    #[error("no view resolver claims view name '{view_name}'")]
    ViewNotResolved {
        /// The logical view name returned by the handler
        view_name: String,
    },

    /// The handler itself failed
    #[error("handler failed: {0}")]
    Handler(#[source] anyhow::Error),

    /// The rendering collaborator failed
    #[error("rendering failed: {0}")]
    Render(#[source] anyhow::Error),
}

impl DispatchError {
    /// Build a `RouteNotFound` error for the given method and path
    #[must_use]
    pub fn route_not_found(method: &Method, path: &str) -> Self {
        DispatchError::RouteNotFound {
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    /// HTTP status the client sees for this failure
    ///
    /// Only routing failures are distinguishable from the outside (404);
    /// every other failure is a 500.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            DispatchError::RouteNotFound { .. } => 404,
            _ => 500,
        }
    }

    /// `true` for failures caused by argument binding
    #[must_use]
    pub fn is_binding_failure(&self) -> bool {
        matches!(
            self,
            DispatchError::UnsupportedParameterType { .. }
                | DispatchError::MissingPathVariable { .. }
                | DispatchError::MissingRequiredParameter { .. }
                | DispatchError::CoercionFailed { .. }
                | DispatchError::UnsupportedCoercionType { .. }
        )
    }
}

/// Failure while building the routing table at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// The path template is empty or does not start with `/`
    #[error("path template '{template}' must start with '/'")]
    InvalidTemplate {
        /// The rejected template
        template: String,
    },

    /// A `{name}` segment has an empty or malformed variable name
    #[error("path template '{template}' has an invalid variable segment '{segment}'")]
    InvalidVariable {
        /// The rejected template
        template: String,
        /// The offending segment
        segment: String,
    },

    /// The same variable name appears twice in one template
    #[error("path template '{template}' declares variable '{name}' more than once")]
    DuplicateVariable {
        /// The rejected template
        template: String,
        /// The repeated variable name
        name: String,
    },

    /// A legacy controller path contains a `{name}` variable
    #[error("legacy path '{path}' must be a literal path")]
    TemplatedLegacyPath {
        /// The rejected path
        path: String,
    },
}
