use super::arguments::{Argument, Arguments};
use crate::coerce::{coerce, DeclaredType};
use crate::error::DispatchError;
use crate::server::{HttpRequest, HttpResponse};
use crate::spec::{ParamAnnotation, ParamVec, ParameterSpec};
use std::sync::Arc;
use tracing::debug;

/// Request-scoped data the resolvers read from.
///
/// The response context is not part of it: resolvers only mark response
/// parameters, and the execution hands the response to the handler through
/// [`Arguments::response`].
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub request: &'a HttpRequest,
    pub path_variables: &'a ParamVec,
}

impl<'a> RequestContext<'a> {
    #[must_use]
    pub fn new(request: &'a HttpRequest, path_variables: &'a ParamVec) -> Self {
        Self {
            request,
            path_variables,
        }
    }

    /// Captured path variable by name
    #[must_use]
    pub fn path_variable(&self, name: &str) -> Option<&'a str> {
        self.path_variables
            .iter()
            .rfind(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_str())
    }
}

/// One argument-binding strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentResolver {
    /// Captured `{name}` path segment
    PathVariable,
    /// Query/form parameter; also claims unannotated scalar parameters
    RequestParam,
    /// Request header
    RequestHeader,
    /// The request or response context itself
    RawContext,
}

impl ArgumentResolver {
    /// Whether this resolver is responsible for `spec`
    #[must_use]
    pub fn supports(&self, spec: &ParameterSpec) -> bool {
        match self {
            ArgumentResolver::PathVariable => spec.annotation == ParamAnnotation::PathVariable,
            ArgumentResolver::RequestParam => match spec.annotation {
                ParamAnnotation::RequestParam { .. } => true,
                ParamAnnotation::None => spec.declared_type.is_scalar(),
                _ => false,
            },
            ArgumentResolver::RequestHeader => {
                matches!(spec.annotation, ParamAnnotation::RequestHeader { .. })
            }
            ArgumentResolver::RawContext => {
                spec.annotation == ParamAnnotation::None && spec.declared_type.is_context()
            }
        }
    }

    /// Produce the bound value for `spec`
    ///
    /// # Errors
    ///
    /// * [`DispatchError::MissingPathVariable`] - no capture under the declared name
    /// * [`DispatchError::MissingRequiredParameter`] - parameter/header absent without default
    /// * [`DispatchError::CoercionFailed`] / [`DispatchError::UnsupportedCoercionType`] - from coercion
    pub fn resolve<'a>(
        &self,
        ctx: &RequestContext<'a>,
        spec: &ParameterSpec,
    ) -> Result<Argument<'a>, DispatchError> {
        match self {
            ArgumentResolver::PathVariable => {
                let raw = ctx.path_variable(&spec.name).ok_or_else(|| {
                    DispatchError::MissingPathVariable {
                        name: spec.name.to_string(),
                    }
                })?;
                Ok(Argument::Value(coerce(raw, &spec.declared_type)?))
            }
            ArgumentResolver::RequestParam => {
                let raw = ctx.request.parameter(&spec.name);
                bind_with_default(raw, default_of(&spec.annotation), spec)
            }
            ArgumentResolver::RequestHeader => {
                let raw = ctx.request.header(&spec.name);
                bind_with_default(raw, default_of(&spec.annotation), spec)
            }
            ArgumentResolver::RawContext => match spec.declared_type {
                DeclaredType::Request => Ok(Argument::Request(ctx.request)),
                DeclaredType::Response => Ok(Argument::Response),
                _ => Err(DispatchError::UnsupportedParameterType {
                    name: spec.name.to_string(),
                    declared_type: spec.declared_type.clone(),
                }),
            },
        }
    }
}

fn default_of(annotation: &ParamAnnotation) -> Option<&str> {
    match annotation {
        ParamAnnotation::RequestParam { default } | ParamAnnotation::RequestHeader { default } => {
            default.as_deref()
        }
        ParamAnnotation::PathVariable | ParamAnnotation::None => None,
    }
}

fn bind_with_default<'a>(
    raw: Option<&str>,
    default: Option<&str>,
    spec: &ParameterSpec,
) -> Result<Argument<'a>, DispatchError> {
    let raw = raw
        .or(default)
        .ok_or_else(|| DispatchError::MissingRequiredParameter {
            name: spec.name.to_string(),
        })?;
    Ok(Argument::Value(coerce(raw, &spec.declared_type)?))
}

/// Ordered resolver chain; the first resolver that supports a parameter wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentResolvers {
    resolvers: Vec<ArgumentResolver>,
}

impl Default for ArgumentResolvers {
    fn default() -> Self {
        Self::new(vec![
            ArgumentResolver::PathVariable,
            ArgumentResolver::RequestParam,
            ArgumentResolver::RequestHeader,
            ArgumentResolver::RawContext,
        ])
    }
}

impl ArgumentResolvers {
    #[must_use]
    pub fn new(resolvers: Vec<ArgumentResolver>) -> Self {
        Self { resolvers }
    }

    /// Resolvers in evaluation order
    #[must_use]
    pub fn resolvers(&self) -> &[ArgumentResolver] {
        &self.resolvers
    }

    /// Bind one parameter
    ///
    /// # Errors
    ///
    /// [`DispatchError::UnsupportedParameterType`] when no resolver supports
    /// `spec`, otherwise whatever the claiming resolver returns.
    pub fn resolve<'a>(
        &self,
        ctx: &RequestContext<'a>,
        spec: &ParameterSpec,
    ) -> Result<Argument<'a>, DispatchError> {
        let resolver = self
            .resolvers
            .iter()
            .find(|r| r.supports(spec))
            .ok_or_else(|| DispatchError::UnsupportedParameterType {
                name: spec.name.to_string(),
                declared_type: spec.declared_type.clone(),
            })?;

        let arg = resolver.resolve(ctx, spec)?;
        debug!(
            parameter = %spec.name,
            declared_type = %spec.declared_type,
            resolver = ?resolver,
            "Argument resolved"
        );
        Ok(arg)
    }

    /// Bind every parameter in declaration order
    ///
    /// The response context is attached when any parameter asks for it.
    ///
    /// # Errors
    ///
    /// The first binding failure, in declaration order.
    pub fn resolve_all<'a>(
        &self,
        ctx: &RequestContext<'a>,
        specs: &[ParameterSpec],
        response: &'a mut HttpResponse,
    ) -> Result<Arguments<'a>, DispatchError> {
        let mut entries = Vec::with_capacity(specs.len());
        let mut wants_response = false;
        for spec in specs {
            let arg = self.resolve(ctx, spec)?;
            wants_response |= arg == Argument::Response;
            entries.push((Arc::clone(&spec.name), arg));
        }
        Ok(Arguments::new(entries, wants_response.then_some(response)))
    }
}
