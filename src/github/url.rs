//! Repository reference parsing.
//!
//! Accepted shapes, tried in order (first match wins):
//!
//! 1. `https://github.com/owner/repo`
//! 2. `github.com/owner/repo`
//! 3. `owner/repo`
//!
//! Each tolerates a trailing `.git` and a trailing slash. Patterns are
//! anchored, so `owner/repo/extra` is rejected rather than truncated.
//! Segments never contain `?` or `#`, so a query or fragment is rejected
//! too.

use once_cell::sync::Lazy;
use regex::Regex;

use super::models::RepositoryIdentity;
use crate::error::{GeneratorError, Result};
use crate::utils::normalize_repo_input;

static REFERENCE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [
        ("url", r"^https?://github\.com/([^/?#]+)/([^/?#]+?)(?:\.git)?/?$"),
        ("host", r"^github\.com/([^/?#]+)/([^/?#]+?)(?:\.git)?/?$"),
        ("short", r"^([^/?#]+)/([^/?#]+?)(?:\.git)?/?$"),
    ]
    .into_iter()
    .map(|(shape, pattern)| (shape, Regex::new(pattern).expect("reference pattern is valid")))
    .collect()
});

/// Parses a user-supplied repository reference into an identity
pub fn parse_repo_url(input: &str) -> Result<RepositoryIdentity> {
    let normalized = normalize_repo_input(input);

    for (shape, pattern) in REFERENCE_PATTERNS.iter() {
        if let Some(caps) = pattern.captures(&normalized) {
            let owner = &caps[1];
            let name = &caps[2];
            if owner.is_empty() || name.is_empty() {
                continue;
            }
            tracing::debug!(shape, owner, name, "parsed repository reference");
            return Ok(RepositoryIdentity::new(owner, name));
        }
    }

    Err(GeneratorError::InvalidReference(input.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("https://github.com/acme/widget" ; "full url")]
    #[test_case("http://github.com/acme/widget" ; "plain http")]
    #[test_case("https://github.com/acme/widget.git" ; "git suffix")]
    #[test_case("https://github.com/acme/widget/" ; "trailing slash")]
    #[test_case("github.com/acme/widget" ; "bare host")]
    #[test_case("github.com/acme/widget.git" ; "bare host git suffix")]
    #[test_case("acme/widget" ; "short form")]
    #[test_case("acme/widget.git" ; "short form git suffix")]
    #[test_case("  acme/widget  " ; "surrounding whitespace")]
    fn test_accepted_shapes(input: &str) {
        let identity = parse_repo_url(input).unwrap();
        assert_eq!(identity, RepositoryIdentity::new("acme", "widget"));
    }

    #[test_case("acme" ; "single segment")]
    #[test_case("acme/widget/extra" ; "three segments")]
    #[test_case("https://github.com/acme/widget/tree/main" ; "deep url")]
    #[test_case("" ; "empty")]
    #[test_case("/widget" ; "missing owner")]
    #[test_case("acme/widget?x=1" ; "query string")]
    #[test_case("acme/wid#get" ; "fragment")]
    #[test_case("https://github.com/acme/widget?tab=readme" ; "url with query")]
    #[test_case("github.com/ac?me/widget" ; "query in owner")]
    fn test_rejected_shapes(input: &str) {
        let result = parse_repo_url(input);
        assert!(matches!(result, Err(GeneratorError::InvalidReference(_))));
    }

    #[test]
    fn test_dotted_names_survive() {
        let identity = parse_repo_url("https://github.com/acme/widget.js").unwrap();
        assert_eq!(identity.name, "widget.js");
    }
}
