use crate::view::Model;
use serde_json::Value;
use tracing::debug;

/// Reason phrase for the statuses the dispatcher produces
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        302 => "Found",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// The terminal action committed for one request.
///
/// Exactly one action is committed per dispatch. The hosting server turns it
/// into a wire response.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseAction {
    /// Redirect the client to `location`
    Redirect { location: String },
    /// Forward to a template `location`; `body` is the rendered output
    Forward {
        location: String,
        model: Model,
        body: String,
    },
    /// Serialize a JSON body
    Json { body: Value },
    /// No route matched
    NotFound,
    /// Any other failure; detail is never exposed
    ServerError,
}

impl ResponseAction {
    /// HTTP status for this action
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            ResponseAction::Redirect { .. } => 302,
            ResponseAction::Forward { .. } | ResponseAction::Json { .. } => 200,
            ResponseAction::NotFound => 404,
            ResponseAction::ServerError => 500,
        }
    }
}

/// Outbound response handed to the dispatcher.
///
/// Handlers that declare a response parameter may add headers. Terminal
/// actions are committed by the views and by the dispatcher's error path
/// only.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    headers: Vec<(String, String)>,
    action: Option<ResponseAction>,
}

impl HttpResponse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header (case-insensitive name)
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
    }

    /// Header by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The committed action, if any
    #[must_use]
    pub fn action(&self) -> Option<&ResponseAction> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.action.is_some()
    }

    /// Status of the committed action; 200 while nothing is committed
    #[must_use]
    pub fn status(&self) -> u16 {
        self.action.as_ref().map_or(200, ResponseAction::status)
    }

    /// `"302 Found"`-style status line fragment
    #[must_use]
    pub fn status_line(&self) -> String {
        let status = self.status();
        format!("{status} {}", status_reason(status))
    }

    pub(crate) fn send_redirect(&mut self, location: &str) {
        self.set_header("location", location);
        self.commit(ResponseAction::Redirect {
            location: location.to_string(),
        });
    }

    pub(crate) fn forward(&mut self, location: &str, model: Model, body: String) {
        self.set_header("content-type", "text/html; charset=utf-8");
        self.commit(ResponseAction::Forward {
            location: location.to_string(),
            model,
            body,
        });
    }

    pub(crate) fn send_json(&mut self, body: Value) {
        self.set_header("content-type", "application/json");
        self.commit(ResponseAction::Json { body });
    }

    /// Commit an error status; headers set by the handler are discarded
    pub(crate) fn send_error(&mut self, status: u16) {
        self.headers.clear();
        let action = if status == 404 {
            ResponseAction::NotFound
        } else {
            ResponseAction::ServerError
        };
        self.commit(action);
    }

    fn commit(&mut self, action: ResponseAction) {
        debug!(status = action.status(), "Response committed");
        self.action = Some(action);
    }
}
