use dashmap::DashMap;
use std::cmp::Ordering;
use std::sync::Arc;

/// One fragment of a tokenized version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionPart {
    pub text: String,
    /// Parsed value for digit-only fragments; `None` for qualifiers and on overflow.
    pub numeric: Option<i64>,
}

impl VersionPart {
    fn new(text: &str) -> Self {
        let numeric = if !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit()) {
            text.parse::<i64>().ok()
        } else {
            None
        };
        Self {
            text: text.to_string(),
            numeric,
        }
    }
}

/// A tokenized version string, e.g. `1.0.0-M2` → `[1, 0, 0, "M", 2]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    source: String,
    parts: Vec<VersionPart>,
}

impl Version {
    /// Splits on `.`, `_`, `-`, `+` and on every digit/non-digit transition.
    /// Separators are dropped; empty fragments between adjacent separators are kept.
    pub fn tokenize(source: &str) -> Self {
        let mut fragments = Vec::new();
        let mut digit = false;
        let mut start = 0;

        for (pos, ch) in source.char_indices() {
            if matches!(ch, '.' | '_' | '-' | '+') {
                fragments.push(&source[start..pos]);
                start = pos + 1;
                digit = false;
            } else if ch.is_ascii_digit() {
                if !digit && pos > start {
                    fragments.push(&source[start..pos]);
                    start = pos;
                }
                digit = true;
            } else {
                if digit {
                    fragments.push(&source[start..pos]);
                    start = pos;
                }
                digit = false;
            }
        }
        if source.len() > start {
            fragments.push(&source[start..]);
        }

        Self {
            source: source.to_string(),
            parts: fragments.into_iter().map(VersionPart::new).collect(),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn parts(&self) -> &[VersionPart] {
        &self.parts
    }
}

/// Memoizing tokenizer. Version strings repeat heavily across a dependency graph,
/// so each distinct string is tokenized once and shared.
#[derive(Debug, Default)]
pub struct VersionParser {
    cache: DashMap<String, Arc<Version>>,
}

impl VersionParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, raw: &str) -> Arc<Version> {
        if let Some(cached) = self.cache.get(raw) {
            return Arc::clone(cached.value());
        }
        let version = Arc::new(Version::tokenize(raw));
        Arc::clone(self.cache.entry(raw.to_string()).or_insert(version).value())
    }

    #[cfg(test)]
    pub(crate) fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

/// Qualifier ranks, matched case-insensitively. Unlisted qualifiers rank 0.
const QUALIFIER_RANKS: [(&str, i32); 7] = [
    ("dev", -1),
    ("rc", 1),
    ("snapshot", 2),
    ("final", 3),
    ("ga", 4),
    ("release", 5),
    ("sp", 6),
];

fn qualifier_rank(text: &str) -> Option<i32> {
    QUALIFIER_RANKS
        .iter()
        .find(|(name, _)| text.eq_ignore_ascii_case(name))
        .map(|(_, rank)| *rank)
}

/// Orders arbitrary dependency version strings.
///
/// Position by position: numbers beat qualifiers, numbers compare numerically,
/// qualifiers compare by [`QUALIFIER_RANKS`] and then lexicographically. When one
/// side runs out, the longer side wins only if its next fragment is numeric, so
/// `1.0 < 1.0.1` but `1.0.0-M1 < 1.0.0`.
///
/// The result is a strict weak order: `1.01` and `1.1` are equivalent, and so are
/// `1.0-RC` and `1.0-rc`.
#[derive(Debug, Clone, Default)]
pub struct VersionComparator {
    parser: Arc<VersionParser>,
}

impl VersionComparator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        if a == b {
            return Ordering::Equal;
        }
        Self::compare_versions(&self.parser.parse(a), &self.parser.parse(b))
    }

    pub fn compare_versions(a: &Version, b: &Version) -> Ordering {
        let (parts_a, parts_b) = (a.parts(), b.parts());

        for (part_a, part_b) in parts_a.iter().zip(parts_b) {
            if part_a.text == part_b.text {
                continue;
            }
            let ordering = match (part_a.numeric, part_b.numeric) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Greater,
                (None, Some(_)) => Ordering::Less,
                (None, None) => Self::compare_qualifiers(&part_a.text, &part_b.text),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }

        match parts_a.len().cmp(&parts_b.len()) {
            Ordering::Greater => Self::trailing(&parts_a[parts_b.len()]),
            Ordering::Less => Self::trailing(&parts_b[parts_a.len()]).reverse(),
            Ordering::Equal => Ordering::Equal,
        }
    }

    /// How the longer side compares when the shorter side has no fragment left.
    fn trailing(next: &VersionPart) -> Ordering {
        if next.numeric.is_some() {
            Ordering::Greater
        } else {
            Ordering::Less
        }
    }

    fn compare_qualifiers(a: &str, b: &str) -> Ordering {
        match (qualifier_rank(a), qualifier_rank(b)) {
            (None, None) => a.cmp(b),
            (rank_a, rank_b) => rank_a.unwrap_or(0).cmp(&rank_b.unwrap_or(0)),
        }
    }

    /// True if `candidate` is strictly newer than `current`.
    pub fn is_newer(&self, candidate: &str, current: &str) -> bool {
        self.compare(candidate, current) == Ordering::Greater
    }
}
