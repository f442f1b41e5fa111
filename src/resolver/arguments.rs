use crate::coerce::Scalar;
use crate::server::{HttpRequest, HttpResponse};
use anyhow::anyhow;
use std::sync::Arc;

/// One bound handler argument
#[derive(Debug, Clone, PartialEq)]
pub enum Argument<'a> {
    /// A coerced request value
    Value(Scalar),
    /// The request context itself
    Request(&'a HttpRequest),
    /// The response context; reach it through [`Arguments::response`]
    Response,
}

/// Conversion from a bound [`Argument`] into a concrete Rust type
pub trait FromArgument<'a>: Sized {
    fn from_argument(arg: &Argument<'a>) -> Option<Self>;
}

macro_rules! scalar_from_argument {
    ($ty:ty, $variant:ident) => {
        impl FromArgument<'_> for $ty {
            fn from_argument(arg: &Argument<'_>) -> Option<Self> {
                match arg {
                    Argument::Value(Scalar::$variant(v)) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

scalar_from_argument!(i32, Int);
scalar_from_argument!(i64, Long);
scalar_from_argument!(f32, Float);
scalar_from_argument!(f64, Double);
scalar_from_argument!(bool, Bool);
scalar_from_argument!(String, Str);

impl FromArgument<'_> for Scalar {
    fn from_argument(arg: &Argument<'_>) -> Option<Self> {
        match arg {
            Argument::Value(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl<'a> FromArgument<'a> for &'a HttpRequest {
    fn from_argument(arg: &Argument<'a>) -> Option<Self> {
        match arg {
            Argument::Request(req) => Some(*req),
            _ => None,
        }
    }
}

/// The resolved argument list for one invocation.
///
/// Entries keep the declaration order of the handler's parameters. Built
/// fresh for every request and dropped once the handler returns.
#[derive(Debug)]
pub struct Arguments<'a> {
    entries: Vec<(Arc<str>, Argument<'a>)>,
    response: Option<&'a mut HttpResponse>,
}

impl<'a> Arguments<'a> {
    pub(crate) fn new(
        entries: Vec<(Arc<str>, Argument<'a>)>,
        response: Option<&'a mut HttpResponse>,
    ) -> Self {
        Self { entries, response }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parameter names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_ref())
    }

    /// Raw argument by declared name
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&Argument<'a>> {
        self.entries
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, arg)| arg)
    }

    /// Typed argument by declared name
    ///
    /// # Errors
    ///
    /// Returns an error if no parameter has this name or its bound value is
    /// not a `T`.
    pub fn get<T: FromArgument<'a>>(&self, name: &str) -> anyhow::Result<T> {
        let arg = self
            .raw(name)
            .ok_or_else(|| anyhow!("no argument named '{name}'"))?;
        T::from_argument(arg)
            .ok_or_else(|| anyhow!("argument '{name}' has an unexpected type: {arg:?}"))
    }

    /// Typed argument by position
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the bound value is not a `T`.
    pub fn at<T: FromArgument<'a>>(&self, index: usize) -> anyhow::Result<T> {
        let (name, arg) = self
            .entries
            .get(index)
            .ok_or_else(|| anyhow!("no argument at position {index}"))?;
        T::from_argument(arg)
            .ok_or_else(|| anyhow!("argument '{name}' has an unexpected type: {arg:?}"))
    }

    /// The response context, when the handler declared a response parameter
    pub fn response(&mut self) -> Option<&mut HttpResponse> {
        self.response.as_deref_mut()
    }
}
