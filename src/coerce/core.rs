use crate::error::DispatchError;
use serde::Serialize;
use std::fmt;

/// The type a handler parameter is declared with.
///
/// The scalar variants can be produced from request strings. `Request` and
/// `Response` denote the raw context objects themselves. `Other` names an
/// application type no built-in resolver knows how to bind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DeclaredType {
    Int,
    Long,
    Float,
    Double,
    Boolean,
    String,
    Request,
    Response,
    Other(String),
}

impl DeclaredType {
    /// `true` when [`coerce`] can produce this type from a string
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            DeclaredType::Int
                | DeclaredType::Long
                | DeclaredType::Float
                | DeclaredType::Double
                | DeclaredType::Boolean
                | DeclaredType::String
        )
    }

    /// `true` for the request/response context types
    #[must_use]
    pub fn is_context(&self) -> bool {
        matches!(self, DeclaredType::Request | DeclaredType::Response)
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclaredType::Int => write!(f, "int"),
            DeclaredType::Long => write!(f, "long"),
            DeclaredType::Float => write!(f, "float"),
            DeclaredType::Double => write!(f, "double"),
            DeclaredType::Boolean => write!(f, "boolean"),
            DeclaredType::String => write!(f, "string"),
            DeclaredType::Request => write!(f, "request"),
            DeclaredType::Response => write!(f, "response"),
            DeclaredType::Other(name) => write!(f, "{name}"),
        }
    }
}

/// A typed value produced by [`coerce`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    Str(String),
}

impl Scalar {
    /// The declared type this value satisfies
    #[must_use]
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            Scalar::Int(_) => DeclaredType::Int,
            Scalar::Long(_) => DeclaredType::Long,
            Scalar::Float(_) => DeclaredType::Float,
            Scalar::Double(_) => DeclaredType::Double,
            Scalar::Bool(_) => DeclaredType::Boolean,
            Scalar::Str(_) => DeclaredType::String,
        }
    }
}

/// Convert a raw request string into a value of the declared type
///
/// # Errors
///
/// * [`DispatchError::CoercionFailed`] - the string does not parse as `target`
/// * [`DispatchError::UnsupportedCoercionType`] - `target` is not a scalar type
pub fn coerce(raw: &str, target: &DeclaredType) -> Result<Scalar, DispatchError> {
    let failed = || DispatchError::CoercionFailed {
        raw: raw.to_string(),
        target: target.clone(),
    };

    match target {
        DeclaredType::String => Ok(Scalar::Str(raw.to_string())),
        DeclaredType::Int => raw.parse::<i32>().map(Scalar::Int).map_err(|_| failed()),
        DeclaredType::Long => raw.parse::<i64>().map(Scalar::Long).map_err(|_| failed()),
        DeclaredType::Float => raw.parse::<f32>().map(Scalar::Float).map_err(|_| failed()),
        DeclaredType::Double => raw.parse::<f64>().map(Scalar::Double).map_err(|_| failed()),
        DeclaredType::Boolean => {
            // str::parse::<bool> is case-sensitive; request values are not
            if raw.eq_ignore_ascii_case("true") {
                Ok(Scalar::Bool(true))
            } else if raw.eq_ignore_ascii_case("false") {
                Ok(Scalar::Bool(false))
            } else {
                Err(failed())
            }
        }
        DeclaredType::Request | DeclaredType::Response | DeclaredType::Other(_) => {
            Err(DispatchError::UnsupportedCoercionType {
                target: target.clone(),
            })
        }
    }
}
