use super::model::Model;
use super::renderer::TemplateRenderer;
use crate::error::DispatchError;
use crate::server::{HttpRequest, HttpResponse};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Redirect to a URL taken verbatim from the view name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectView {
    pub url: String,
}

/// Forward to a template location rendered by a [`TemplateRenderer`]
#[derive(Clone)]
pub struct ForwardView {
    pub location: String,
    renderer: Arc<dyn TemplateRenderer>,
}

impl ForwardView {
    #[must_use]
    pub fn new(location: impl Into<String>, renderer: Arc<dyn TemplateRenderer>) -> Self {
        Self {
            location: location.into(),
            renderer,
        }
    }
}

impl fmt::Debug for ForwardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForwardView")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

/// Serialize the model as a JSON object body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonView;

/// A deferred response action
#[derive(Debug, Clone)]
pub enum View {
    Redirect(RedirectView),
    Forward(ForwardView),
    Json(JsonView),
}

impl View {
    #[must_use]
    pub fn redirect(url: impl Into<String>) -> Self {
        View::Redirect(RedirectView { url: url.into() })
    }

    #[must_use]
    pub fn json() -> Self {
        View::Json(JsonView)
    }

    /// Perform this view's action on the response
    ///
    /// # Errors
    ///
    /// [`DispatchError::Render`] when the template collaborator fails; the
    /// response is left uncommitted in that case.
    pub fn render(
        &self,
        model: &Model,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> Result<(), DispatchError> {
        match self {
            View::Redirect(view) => {
                debug!(path = %request.path(), target = %view.url, "Redirecting");
                response.send_redirect(&view.url);
            }
            View::Forward(view) => {
                let body = view
                    .renderer
                    .render(&view.location, model)
                    .map_err(DispatchError::Render)?;
                debug!(
                    path = %request.path(),
                    location = %view.location,
                    body_size_bytes = body.len(),
                    "Template rendered"
                );
                response.forward(&view.location, model.clone(), body);
            }
            View::Json(_) => {
                response.send_json(Value::Object(model.clone()));
            }
        }
        Ok(())
    }
}
