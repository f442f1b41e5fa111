use super::core::{ForwardView, View};
use super::renderer::TemplateRenderer;
use crate::error::DispatchError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Prefix that marks a logical view name as a redirect
pub const DEFAULT_REDIRECT_PREFIX: &str = "redirect:";

#[allow(clippy::expect_used)]
static SCHEME_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").expect("valid scheme regex"));

/// One view-name resolution strategy
#[derive(Clone)]
pub enum ViewResolver {
    /// Claims names starting with `prefix`; the remainder is the redirect target
    Redirect { prefix: String },
    /// Claims plain names and forwards to `{prefix}{name}{suffix}`
    Template {
        prefix: String,
        suffix: String,
        renderer: Arc<dyn TemplateRenderer>,
    },
}

impl fmt::Debug for ViewResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewResolver::Redirect { prefix } => {
                f.debug_struct("Redirect").field("prefix", prefix).finish()
            }
            ViewResolver::Template { prefix, suffix, .. } => f
                .debug_struct("Template")
                .field("prefix", prefix)
                .field("suffix", suffix)
                .finish_non_exhaustive(),
        }
    }
}

impl ViewResolver {
    /// Redirect resolver using [`DEFAULT_REDIRECT_PREFIX`]
    #[must_use]
    pub fn redirect() -> Self {
        ViewResolver::Redirect {
            prefix: DEFAULT_REDIRECT_PREFIX.to_string(),
        }
    }

    #[must_use]
    pub fn template(
        prefix: impl Into<String>,
        suffix: impl Into<String>,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        ViewResolver::Template {
            prefix: prefix.into(),
            suffix: suffix.into(),
            renderer,
        }
    }

    /// Claim `view_name` and build its view, or decline with `None`
    #[must_use]
    pub fn resolve_view_name(&self, view_name: &str) -> Option<View> {
        match self {
            ViewResolver::Redirect { prefix } => view_name
                .strip_prefix(prefix.as_str())
                .map(View::redirect),
            ViewResolver::Template {
                prefix,
                suffix,
                renderer,
            } => {
                // Names carrying an unknown scheme are not templates
                if view_name.is_empty() || SCHEME_PREFIX.is_match(view_name) {
                    return None;
                }
                let location = format!("{prefix}{view_name}{suffix}");
                Some(View::Forward(ForwardView::new(location, Arc::clone(renderer))))
            }
        }
    }
}

/// Ordered view-resolver chain; the first claim wins
#[derive(Debug, Clone, Default)]
pub struct ViewResolvers {
    resolvers: Vec<ViewResolver>,
}

impl ViewResolvers {
    #[must_use]
    pub fn new(resolvers: Vec<ViewResolver>) -> Self {
        Self { resolvers }
    }

    /// Redirect resolver followed by a template resolver
    #[must_use]
    pub fn standard(
        redirect_prefix: &str,
        view_prefix: &str,
        view_suffix: &str,
        renderer: Arc<dyn TemplateRenderer>,
    ) -> Self {
        Self::new(vec![
            ViewResolver::Redirect {
                prefix: redirect_prefix.to_string(),
            },
            ViewResolver::template(view_prefix, view_suffix, renderer),
        ])
    }

    #[must_use]
    pub fn resolvers(&self) -> &[ViewResolver] {
        &self.resolvers
    }

    /// Resolve a logical view name
    ///
    /// # Errors
    ///
    /// [`DispatchError::ViewNotResolved`] when no resolver claims the name.
    pub fn resolve_view_name(&self, view_name: &str) -> Result<View, DispatchError> {
        for resolver in &self.resolvers {
            if let Some(view) = resolver.resolve_view_name(view_name) {
                debug!(view_name = %view_name, resolver = ?resolver, "View resolved");
                return Ok(view);
            }
        }
        Err(DispatchError::ViewNotResolved {
            view_name: view_name.to_string(),
        })
    }
}
