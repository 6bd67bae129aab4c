//! Origin acceptance policy.

use axum::http::HeaderValue;

use crate::config::schema::CorsConfig;

/// Decides whether a request's declared `Origin` header is acceptable.
#[derive(Debug, Clone)]
pub enum OriginPolicy {
    /// Accept any request carrying a non-empty `Origin` header.
    ///
    /// Requests that omit the header (non-browser clients, or same-origin
    /// requests from browsers that do not attach it) are rejected.
    Permissive,

    /// Accept only an exact, case-sensitive byte match against one origin.
    Exact(String),
}

impl OriginPolicy {
    /// Build the policy from configuration.
    pub fn from_config(config: &CorsConfig) -> Self {
        match &config.allowed_origin {
            Some(origin) => Self::Exact(origin.clone()),
            None => Self::Permissive,
        }
    }

    /// Returns true if the declared origin passes this policy.
    ///
    /// The value is never parsed structurally, only tested for presence
    /// or exact equality.
    pub fn allows(&self, origin: Option<&HeaderValue>) -> bool {
        match self {
            Self::Permissive => origin.is_some_and(|v| !v.as_bytes().is_empty()),
            Self::Exact(expected) => origin.is_some_and(|v| v.as_bytes() == expected.as_bytes()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(value: &str) -> HeaderValue {
        HeaderValue::from_str(value).unwrap()
    }

    #[test]
    fn permissive_requires_presence() {
        let policy = OriginPolicy::Permissive;

        assert!(policy.allows(Some(&header("http://example.jp:8080"))));
        assert!(!policy.allows(Some(&header(""))));
        assert!(!policy.allows(None));
    }

    #[test]
    fn exact_requires_byte_equality() {
        let policy = OriginPolicy::Exact("http://example.jp:8080".to_string());

        assert!(policy.allows(Some(&header("http://example.jp:8080"))));
        // Case-sensitive
        assert!(!policy.allows(Some(&header("http://EXAMPLE.jp:8080"))));
        assert!(!policy.allows(Some(&header("http://other.jp:8080"))));
        assert!(!policy.allows(None));
    }

    #[test]
    fn policy_from_config() {
        let permissive = OriginPolicy::from_config(&CorsConfig {
            allowed_origin: None,
        });
        assert!(matches!(permissive, OriginPolicy::Permissive));

        let exact = OriginPolicy::from_config(&CorsConfig {
            allowed_origin: Some("http://a.example".to_string()),
        });
        assert!(matches!(exact, OriginPolicy::Exact(o) if o == "http://a.example"));
    }
}
