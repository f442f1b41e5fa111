use crate::coerce::DeclaredType;
use http::Method;
use std::fmt;
use std::sync::Arc;

/// Methods a route declared without an explicit method list answers to
pub const SUPPORTED_METHODS: [Method; 8] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::PATCH,
    Method::HEAD,
    Method::OPTIONS,
    Method::TRACE,
];

/// A declared route: one path template and the methods it answers.
///
/// An empty method list means "any supported method"; registration expands
/// it into one [`HandlerKey`] per entry of [`SUPPORTED_METHODS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub methods: Vec<Method>,
}

impl Route {
    #[must_use]
    pub fn new(path: impl Into<String>, methods: Vec<Method>) -> Self {
        Self {
            path: path.into(),
            methods,
        }
    }

    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path, vec![Method::GET])
    }

    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path, vec![Method::POST])
    }

    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path, vec![Method::PUT])
    }

    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path, vec![Method::DELETE])
    }

    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(path, vec![Method::PATCH])
    }

    /// Route answering every supported method
    #[must_use]
    pub fn any(path: impl Into<String>) -> Self {
        Self::new(path, Vec::new())
    }

    /// One key per method this route answers
    #[must_use]
    pub fn keys(&self) -> Vec<HandlerKey> {
        let key = |m: &Method| HandlerKey::new(self.path.clone(), m.clone());
        if self.methods.is_empty() {
            SUPPORTED_METHODS.iter().map(key).collect()
        } else {
            self.methods.iter().map(key).collect()
        }
    }
}

/// Identity of one routing-table entry: path template plus method.
///
/// Equality is structural; two registrations under an equal key overwrite
/// each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HandlerKey {
    pub template: String,
    pub method: Method,
}

impl HandlerKey {
    #[must_use]
    pub fn new(template: impl Into<String>, method: Method) -> Self {
        Self {
            template: template.into(),
            method,
        }
    }
}

impl fmt::Display for HandlerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.template)
    }
}

/// Which argument resolver a parameter is declared for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamAnnotation {
    /// Bound from a captured path variable of the same name
    PathVariable,
    /// Bound from a query/form parameter, falling back to `default`
    RequestParam { default: Option<String> },
    /// Bound from a request header (case-insensitive name), falling back to `default`
    RequestHeader { default: Option<String> },
    /// No annotation; scalars bind as request parameters, context types pass through
    None,
}

/// How one handler parameter is bound. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: Arc<str>,
    pub declared_type: DeclaredType,
    pub annotation: ParamAnnotation,
}

impl ParameterSpec {
    #[must_use]
    pub fn new(name: &str, declared_type: DeclaredType, annotation: ParamAnnotation) -> Self {
        Self {
            name: Arc::from(name),
            declared_type,
            annotation,
        }
    }

    /// `{name}` path variable coerced to `declared_type`
    #[must_use]
    pub fn path_variable(name: &str, declared_type: DeclaredType) -> Self {
        Self::new(name, declared_type, ParamAnnotation::PathVariable)
    }

    /// Required query/form parameter coerced to `declared_type`
    #[must_use]
    pub fn request_param(name: &str, declared_type: DeclaredType) -> Self {
        Self::new(
            name,
            declared_type,
            ParamAnnotation::RequestParam { default: None },
        )
    }

    /// Required request header coerced to `declared_type`
    #[must_use]
    pub fn header(name: &str, declared_type: DeclaredType) -> Self {
        Self::new(
            name,
            declared_type,
            ParamAnnotation::RequestHeader { default: None },
        )
    }

    /// Unannotated parameter
    #[must_use]
    pub fn plain(name: &str, declared_type: DeclaredType) -> Self {
        Self::new(name, declared_type, ParamAnnotation::None)
    }

    /// The raw request context
    #[must_use]
    pub fn request(name: &str) -> Self {
        Self::plain(name, DeclaredType::Request)
    }

    /// The raw response context
    #[must_use]
    pub fn response(name: &str) -> Self {
        Self::plain(name, DeclaredType::Response)
    }

    /// Attach a default used when a request parameter or header is absent.
    ///
    /// Has no effect on path variables or unannotated parameters.
    #[must_use]
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        match &mut self.annotation {
            ParamAnnotation::RequestParam { default } | ParamAnnotation::RequestHeader { default } => {
                *default = Some(value.into());
            }
            ParamAnnotation::PathVariable | ParamAnnotation::None => {}
        }
        self
    }
}
