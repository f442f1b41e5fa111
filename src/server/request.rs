use http::Method;
use std::collections::HashMap;
use tracing::debug;

/// Inbound request as seen by the dispatcher.
///
/// Holds the normalized method, the path without its query string, headers
/// (lowercase keys), and the merged query/form parameters. Form
/// parameters added after the query string win on duplicate names.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    method: Method,
    path: String,
    headers: HashMap<String, String>,
    params: HashMap<String, String>,
}

impl HttpRequest {
    /// Build a request from a method and a request target (`/path?query`)
    #[must_use]
    pub fn new(method: Method, target: &str) -> Self {
        let path = target.split('?').next().unwrap_or("/");
        let path = if path.is_empty() { "/" } else { path };
        let params = parse_query_params(target);

        // R4: Query params parsed
        debug!(
            param_count = params.len(),
            query_params = ?params,
            "Query params parsed"
        );

        Self {
            method,
            path: path.to_string(),
            headers: HashMap::new(),
            params,
        }
    }

    /// Build a request from a method string in any letter case
    ///
    /// # Errors
    ///
    /// Returns an error if `method` is not a valid HTTP method token.
    pub fn parse(method: &str, target: &str) -> anyhow::Result<Self> {
        let method = Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())?;
        Ok(Self::new(method, target))
    }

    /// Add a header; names are stored lowercase
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value.into());
        self
    }

    /// Add a query/form parameter, replacing an existing value of the same name
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Merge an `application/x-www-form-urlencoded` body into the parameters
    #[must_use]
    pub fn with_form_body(mut self, body: &str) -> Self {
        for (k, v) in url::form_urlencoded::parse(body.as_bytes()) {
            self.params.insert(k.into_owned(), v.into_owned());
        }
        self
    }

    fn insert_header(&mut self, name: &str, value: String) {
        self.headers.insert(name.to_ascii_lowercase(), value);
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path without the query string
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query/form parameter by name
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Header by name (case-insensitive per RFC 7230)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Parse query string parameters from a request target
///
/// Extracts everything after the `?` character and URL-decodes parameter names and values.
///
/// # Arguments
///
/// * `target` - The full request target (e.g., `/users?limit=10&offset=20`)
///
/// # Returns
///
/// A map of query parameter names to values (last occurrence wins)
pub fn parse_query_params(target: &str) -> HashMap<String, String> {
    if let Some(pos) = target.find('?') {
        let query_str = &target[pos + 1..];
        url::form_urlencoded::parse(query_str.as_bytes())
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    } else {
        HashMap::new()
    }
}
