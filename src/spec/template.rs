use crate::error::RegistrationError;
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum number of captured path variables before heap allocation.
/// Most routes have ≤4 variables (e.g., /users/{id}/posts/{post_id}).
pub const MAX_INLINE_PARAMS: usize = 8;

/// Captured path variables in template order.
///
/// Names are `Arc<str>` shared with the compiled template; values are the
/// per-request path segments.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

#[allow(clippy::expect_used)]
static VARIABLE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid variable name regex"));

/// One `/`-delimited piece of a compiled template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal the request segment exactly
    Literal(String),
    /// Matches any non-empty request segment and binds it under this name
    Variable(Arc<str>),
}

/// A compiled path template such as `/users/{id}`
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    /// Compile a template string
    ///
    /// # Errors
    ///
    /// * [`RegistrationError::InvalidTemplate`] - the template does not start with `/`
    /// * [`RegistrationError::InvalidVariable`] - a `{...}` segment has a malformed name
    /// * [`RegistrationError::DuplicateVariable`] - a variable name is used twice
    pub fn parse(template: &str) -> Result<Self, RegistrationError> {
        if !template.starts_with('/') {
            return Err(RegistrationError::InvalidTemplate {
                template: template.to_string(),
            });
        }

        let mut segments = Vec::with_capacity(template.matches('/').count() + 1);
        for segment in template.split('/') {
            if segment.len() >= 2 && segment.starts_with('{') && segment.ends_with('}') {
                let name = &segment[1..segment.len() - 1];
                if !VARIABLE_NAME.is_match(name) {
                    return Err(RegistrationError::InvalidVariable {
                        template: template.to_string(),
                        segment: segment.to_string(),
                    });
                }
                let duplicate = segments
                    .iter()
                    .any(|s| matches!(s, Segment::Variable(existing) if existing.as_ref() == name));
                if duplicate {
                    return Err(RegistrationError::DuplicateVariable {
                        template: template.to_string(),
                        name: name.to_string(),
                    });
                }
                segments.push(Segment::Variable(Arc::from(name)));
            } else {
                segments.push(Segment::Literal(segment.to_string()));
            }
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    /// The template as it was declared
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Compiled segments, including the empty leading segment before the first `/`
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Variable names in the order they appear in the template
    pub fn variables(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Variable(name) => Some(name.as_ref()),
            Segment::Literal(_) => None,
        })
    }

    /// `true` when the template has no variable segments
    #[must_use]
    pub fn is_literal(&self) -> bool {
        self.variables().next().is_none()
    }

    /// Match a request path against this template
    ///
    /// Segment counts must be equal; there is no wildcard tail. Returns the
    /// captured variables in template order, or `None` when the path does not
    /// match.
    #[must_use]
    pub fn matches(&self, path: &str) -> Option<ParamVec> {
        let mut params = ParamVec::new();
        let mut actual = path.split('/');

        for segment in &self.segments {
            let value = actual.next()?;
            match segment {
                Segment::Literal(literal) => {
                    if literal != value {
                        return None;
                    }
                }
                Segment::Variable(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.push((Arc::clone(name), value.to_string()));
                }
            }
        }

        // Leftover request segments mean the path is longer than the template
        if actual.next().is_some() {
            return None;
        }

        Some(params)
    }
}

impl PartialEq for PathTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathTemplate {}
