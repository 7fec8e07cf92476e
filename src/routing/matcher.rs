//! Path matching strategies.
//!
//! # Responsibilities
//! - Match a normalized request path against a registered pattern
//! - Identify patterns so the router can detect duplicates
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - Exact match is the default strategy
//! - No regex to guarantee O(n) matching

/// Trait for matching request paths against a registered pattern.
pub trait PathMatcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the normalized `path` matches this pattern.
    fn matches(&self, path: &str) -> bool;

    /// Strategy name; two matchers conflict only if strategy and pattern agree.
    fn strategy(&self) -> &'static str;

    /// The normalized pattern this matcher was built from.
    fn pattern(&self) -> &str;
}

/// Normalize a request path: ensure a leading `/`, trim trailing `/`
/// except for the root path.
pub fn normalize_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPath {
    path: String,
}

impl ExactPath {
    /// Create a new exact matcher. The path is normalized.
    pub fn new(path: impl AsRef<str>) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
        }
    }
}

impl PathMatcher for ExactPath {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }

    fn strategy(&self) -> &'static str {
        "exact"
    }

    fn pattern(&self) -> &str {
        &self.path
    }
}

/// Matches every path under a prefix, on segment boundaries.
#[derive(Debug, Clone)]
pub struct PathPrefix {
    prefix: String,
}

impl PathPrefix {
    /// Create a new path prefix matcher. The prefix is normalized.
    pub fn new(prefix: impl AsRef<str>) -> Self {
        Self {
            prefix: normalize_path(prefix.as_ref()),
        }
    }
}

impl PathMatcher for PathPrefix {
    fn matches(&self, path: &str) -> bool {
        if self.prefix == "/" {
            return true;
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }

    fn strategy(&self) -> &'static str {
        "prefix"
    }

    fn pattern(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("/v1/journey"), "/v1/journey");
        assert_eq!(normalize_path("/v1/journey/"), "/v1/journey");
        assert_eq!(normalize_path("v1/journey"), "/v1/journey");
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path(""), "/");
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPath::new("/v1/journey/");

        assert!(matcher.matches("/v1/journey"));
        assert!(!matcher.matches("/v1/journeys"));
        assert!(!matcher.matches("/V1/JOURNEY")); // Case sensitive
    }

    #[test]
    fn test_prefix_matcher() {
        let matcher = PathPrefix::new("/health");

        assert!(matcher.matches("/health"));
        assert!(matcher.matches("/health/readiness"));
        assert!(!matcher.matches("/healthz"));
        assert!(!matcher.matches("/v1/journey"));
    }

    #[test]
    fn test_root_prefix_matches_everything() {
        let matcher = PathPrefix::new("/");
        assert!(matcher.matches("/"));
        assert!(matcher.matches("/anything/at/all"));
    }
}
