//! Shell-style name patterns.

use std::fmt;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{OiError, Result};

/// A case-sensitive glob matched against whole names.
///
/// `*` matches any run of characters (including none) and `?` matches
/// exactly one character. Every other character matches itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GlobPattern {
    pattern: String,
    matcher: Matcher,
}

#[derive(Debug, Clone)]
enum Matcher {
    Any,
    Regex(Regex),
}

impl GlobPattern {
    /// Compile a pattern.
    pub fn new(pattern: &str) -> Result<Self> {
        let matcher = if pattern.chars().all(|c| c == '*') && !pattern.is_empty() {
            Matcher::Any
        } else {
            Matcher::Regex(Regex::new(&glob_to_regex(pattern))?)
        };
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
        })
    }

    /// A pattern matching every name.
    pub fn any() -> Self {
        Self {
            pattern: "*".to_string(),
            matcher: Matcher::Any,
        }
    }

    /// Whether `name` matches the whole pattern.
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            Matcher::Any => true,
            Matcher::Regex(re) => re.is_match(name),
        }
    }

    /// True if this pattern accepts every name.
    pub fn is_any(&self) -> bool {
        matches!(self.matcher, Matcher::Any)
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

fn glob_to_regex(pattern: &str) -> String {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push_str("^(?s:");
    let mut buf = [0u8; 4];
    for c in pattern.chars() {
        match c {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            _ => re.push_str(&regex::escape(c.encode_utf8(&mut buf))),
        }
    }
    re.push_str(")$");
    re
}

impl Default for GlobPattern {
    fn default() -> Self {
        Self::any()
    }
}

impl PartialEq for GlobPattern {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
    }
}

impl fmt::Display for GlobPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl TryFrom<String> for GlobPattern {
    type Error = OiError;

    fn try_from(pattern: String) -> Result<Self> {
        Self::new(&pattern)
    }
}

impl From<GlobPattern> for String {
    fn from(pattern: GlobPattern) -> Self {
        pattern.pattern
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_matches_anything() {
        let any = GlobPattern::any();
        assert!(any.matches(""));
        assert!(any.matches("GRAVITY_SC_P1"));
        assert!(GlobPattern::new("**").unwrap().is_any());
    }

    #[test]
    fn test_anchored_full_match() {
        let pattern = GlobPattern::new("GRAVITY*").unwrap();
        assert!(pattern.matches("GRAVITY"));
        assert!(pattern.matches("GRAVITY_SC"));
        assert!(!pattern.matches("XGRAVITY_SC"));

        let exact = GlobPattern::new("VLTI").unwrap();
        assert!(exact.matches("VLTI"));
        assert!(!exact.matches("VLTI2"));
        assert!(!exact.matches("MY_VLTI"));
    }

    #[test]
    fn test_question_mark_is_one_char() {
        let pattern = GlobPattern::new("SC_P?").unwrap();
        assert!(pattern.matches("SC_P1"));
        assert!(!pattern.matches("SC_P"));
        assert!(!pattern.matches("SC_P12"));
    }

    #[test]
    fn test_case_sensitive() {
        let pattern = GlobPattern::new("pionier").unwrap();
        assert!(!pattern.matches("PIONIER"));
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let pattern = GlobPattern::new("A.B(1)+").unwrap();
        assert!(pattern.matches("A.B(1)+"));
        assert!(!pattern.matches("AxB(1)+"));
    }

    #[test]
    fn test_empty_pattern_matches_empty_name_only() {
        let pattern = GlobPattern::new("").unwrap();
        assert!(pattern.matches(""));
        assert!(!pattern.matches("A"));
    }

    #[test]
    fn test_serde_as_string() {
        let pattern = GlobPattern::new("AMBER_*").unwrap();
        let json = serde_json::to_string(&pattern).unwrap();
        assert_eq!(json, "\"AMBER_*\"");
        let back: GlobPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pattern);
        assert!(back.matches("AMBER_LR"));
    }
}
