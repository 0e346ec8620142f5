use crate::dependency_analysis::domain::{Coordinate, ResolvedCoordinate};
use crate::shared::error::DepscopeError;
use crate::shared::Result;

/// Maximum length of a single group or artifact pattern
const MAX_PATTERN_LENGTH: usize = 255;

/// Matches coordinates against a pair of `*`-wildcard patterns, one for the
/// group id and one for the artifact id. Matching is case-sensitive.
#[derive(Debug, Clone)]
pub struct CoordinateMatcher {
    group: GlobPattern,
    artifact: GlobPattern,
}

impl CoordinateMatcher {
    pub fn new(group_pattern: &str, artifact_pattern: &str) -> Result<Self> {
        Ok(Self {
            group: GlobPattern::new(group_pattern)?,
            artifact: GlobPattern::new(artifact_pattern)?,
        })
    }

    pub fn matches(&self, group: &str, artifact: &str) -> bool {
        self.group.matches(group) && self.artifact.matches(artifact)
    }

    pub fn matches_coordinate(&self, coordinate: &Coordinate) -> bool {
        self.matches(&coordinate.group, &coordinate.artifact)
    }

    pub fn matches_resolved(&self, resolved: &ResolvedCoordinate) -> bool {
        self.matches(&resolved.group, &resolved.artifact)
    }

    /// The patterns as the user wrote them, `group:artifact`.
    pub fn describe(&self) -> String {
        format!("{}:{}", self.group.original, self.artifact.original)
    }
}

/// A single compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    original: String,
    matcher: PatternMatcher,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Result<Self> {
        validate_pattern(pattern)?;
        Ok(Self {
            original: pattern.to_string(),
            matcher: compile_pattern(pattern),
        })
    }

    pub fn matches(&self, value: &str) -> bool {
        self.matcher.matches(value)
    }
}

#[derive(Debug, Clone)]
enum PatternMatcher {
    /// "*"
    Any,
    /// "jackson-core"
    Exact(String),
    /// "*-core"
    EndsWith(String),
    /// "com.fasterxml.*"
    StartsWith(String),
    /// "*jackson*"
    Contains(String),
    /// "com.*.jackson*core": anchored head and tail with ordered middle segments
    Segments {
        head: String,
        middle: Vec<String>,
        tail: String,
    },
}

impl PatternMatcher {
    fn matches(&self, value: &str) -> bool {
        match self {
            PatternMatcher::Any => true,
            PatternMatcher::Exact(s) => value == s,
            PatternMatcher::EndsWith(suffix) => value.ends_with(suffix.as_str()),
            PatternMatcher::StartsWith(prefix) => value.starts_with(prefix.as_str()),
            PatternMatcher::Contains(middle) => value.contains(middle.as_str()),
            PatternMatcher::Segments { head, middle, tail } => {
                if value.len() < head.len() + tail.len()
                    || !value.starts_with(head.as_str())
                    || !value.ends_with(tail.as_str())
                {
                    return false;
                }
                let mut rest = &value[head.len()..value.len() - tail.len()];
                for part in middle {
                    match rest.find(part.as_str()) {
                        Some(pos) => rest = &rest[pos + part.len()..],
                        None => return false,
                    }
                }
                true
            }
        }
    }
}

fn validate_pattern(pattern: &str) -> Result<()> {
    let reason = if pattern.is_empty() {
        Some("pattern cannot be empty".to_string())
    } else if pattern.len() > MAX_PATTERN_LENGTH {
        Some(format!(
            "pattern is too long ({} chars, maximum {})",
            pattern.len(),
            MAX_PATTERN_LENGTH
        ))
    } else {
        pattern
            .chars()
            .find(|c| !is_valid_pattern_char(*c))
            .map(|c| format!("invalid character '{}'", c))
    };

    match reason {
        Some(reason) => Err(DepscopeError::InvalidPattern {
            pattern: pattern.to_string(),
            reason,
        }
        .into()),
        None => Ok(()),
    }
}

fn is_valid_pattern_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | '*')
}

fn compile_pattern(pattern: &str) -> PatternMatcher {
    if pattern.chars().all(|c| c == '*') {
        return PatternMatcher::Any;
    }

    let segments: Vec<&str> = pattern.split('*').collect();
    match segments.as_slice() {
        [exact] => PatternMatcher::Exact(exact.to_string()),
        ["", suffix] => PatternMatcher::EndsWith(suffix.to_string()),
        [prefix, ""] => PatternMatcher::StartsWith(prefix.to_string()),
        ["", middle, ""] => PatternMatcher::Contains(middle.to_string()),
        [head, inner @ .., tail] => PatternMatcher::Segments {
            head: head.to_string(),
            middle: inner
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
                .collect(),
            tail: tail.to_string(),
        },
        [] => PatternMatcher::Any,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob(pattern: &str) -> GlobPattern {
        GlobPattern::new(pattern).unwrap()
    }

    #[test]
    fn test_exact_and_any() {
        assert!(glob("jackson-core").matches("jackson-core"));
        assert!(!glob("jackson-core").matches("jackson-core2"));
        assert!(glob("*").matches("anything"));
        assert!(glob("**").matches(""));
    }

    #[test]
    fn test_single_wildcards() {
        assert!(glob("com.fasterxml.*").matches("com.fasterxml.jackson.core"));
        assert!(!glob("com.fasterxml.*").matches("org.fasterxml"));
        assert!(glob("*-core").matches("jackson-core"));
        assert!(!glob("*-core").matches("jackson-core-asl"));
        assert!(glob("*jackson*").matches("com.fasterxml.jackson.core"));
    }

    #[test]
    fn test_segments_are_anchored() {
        let pattern = glob("jackson*core");
        assert!(pattern.matches("jackson-core"));
        assert!(pattern.matches("jacksoncore"));
        assert!(!pattern.matches("my-jackson-core"));
        assert!(!pattern.matches("jackson-core-asl"));

        let nested = glob("com.*.jackson.*");
        assert!(nested.matches("com.fasterxml.jackson.core"));
        assert!(!nested.matches("org.fasterxml.jackson.core"));
    }

    #[test]
    fn test_head_and_tail_must_not_overlap() {
        assert!(!glob("ab*ba").matches("aba"));
        assert!(glob("ab*ba").matches("abba"));
    }

    #[test]
    fn test_invalid_patterns() {
        assert!(GlobPattern::new("").is_err());
        let err = GlobPattern::new("com/fasterxml").unwrap_err();
        assert!(err.to_string().contains("invalid character '/'"));
        assert!(GlobPattern::new(&"a".repeat(MAX_PATTERN_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_coordinate_matcher() {
        let matcher = CoordinateMatcher::new("com.fasterxml.jackson.*", "jackson-databind").unwrap();
        assert!(matcher.matches("com.fasterxml.jackson.core", "jackson-databind"));
        assert!(!matcher.matches("com.fasterxml.jackson.core", "jackson-core"));
        assert!(matcher.matches_resolved(&ResolvedCoordinate::new(
            "com.fasterxml.jackson.core",
            "jackson-databind",
            "2.17.0"
        )));
        assert_eq!(matcher.describe(), "com.fasterxml.jackson.*:jackson-databind");
    }
}
