use crate::resolver::Arguments;
use crate::server::{HttpRequest, HttpResponse};
use crate::view::{ModelAndView, View};

/// What a handler may return
#[derive(Debug, Clone)]
pub enum HandlerOutput {
    /// Already a view/model pair
    ModelAndView(ModelAndView),
    /// A logical view name with an empty model
    ViewName(String),
}

impl HandlerOutput {
    #[must_use]
    pub fn into_model_and_view(self) -> ModelAndView {
        match self {
            HandlerOutput::ModelAndView(mav) => mav,
            HandlerOutput::ViewName(name) => ModelAndView::new(name),
        }
    }
}

impl From<ModelAndView> for HandlerOutput {
    fn from(mav: ModelAndView) -> Self {
        HandlerOutput::ModelAndView(mav)
    }
}

impl From<String> for HandlerOutput {
    fn from(name: String) -> Self {
        HandlerOutput::ViewName(name)
    }
}

impl From<&str> for HandlerOutput {
    fn from(name: &str) -> Self {
        HandlerOutput::ViewName(name.to_string())
    }
}

impl From<View> for HandlerOutput {
    fn from(view: View) -> Self {
        HandlerOutput::ModelAndView(ModelAndView::with_view(view))
    }
}

/// Application handler invoked with bound arguments.
///
/// Handlers are shared across concurrent dispatches and must not keep
/// per-request state.
pub trait Handler: Send + Sync + 'static {
    /// Run the handler
    ///
    /// # Errors
    ///
    /// Any application failure; the dispatcher surfaces it as a server error.
    fn handle(&self, args: &mut Arguments<'_>) -> anyhow::Result<HandlerOutput>;
}

impl<F, R> Handler for F
where
    F: Fn(&mut Arguments<'_>) -> anyhow::Result<R> + Send + Sync + 'static,
    R: Into<HandlerOutput>,
{
    fn handle(&self, args: &mut Arguments<'_>) -> anyhow::Result<HandlerOutput> {
        self(args).map(Into::into)
    }
}

/// Legacy handler mapped by exact path, answering every method.
pub trait Controller: Send + Sync + 'static {
    /// Handle the request and return a logical view name
    ///
    /// # Errors
    ///
    /// Any application failure.
    fn execute(&self, request: &HttpRequest, response: &mut HttpResponse)
        -> anyhow::Result<String>;
}

impl<F> Controller for F
where
    F: Fn(&HttpRequest, &mut HttpResponse) -> anyhow::Result<String> + Send + Sync + 'static,
{
    fn execute(
        &self,
        request: &HttpRequest,
        response: &mut HttpResponse,
    ) -> anyhow::Result<String> {
        self(request, response)
    }
}
