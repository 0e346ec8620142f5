use crate::dependency_analysis::domain::{License, LicenseType};

/// Phrases that identify a license family, checked in order.
///
/// Lesser/library GPL comes before GPL, and CDDL before GPL, because their
/// names contain the GPL phrase.
const PHRASES: [(&str, LicenseType); 14] = [
    ("lesser general public", LicenseType::Lgpl),
    ("library general public", LicenseType::Lgpl),
    ("common development and distribution", LicenseType::Cddl),
    ("general public license", LicenseType::Gpl),
    ("apache", LicenseType::Apache2),
    ("eclipse", LicenseType::Eclipse),
    ("mozilla", LicenseType::Mpl),
    ("creative commons", LicenseType::CreativeCommons),
    ("public domain", LicenseType::PublicDomain),
    ("unlicense", LicenseType::PublicDomain),
    ("bsd", LicenseType::Bsd),
    ("mit license", LicenseType::Mit),
    ("opensource.org/licenses/mit", LicenseType::Mit),
    ("cddl", LicenseType::Cddl),
];

/// Short names matched as whole words only, so `mit` never matches `permitted`.
const TOKENS: [(&str, LicenseType); 10] = [
    ("lgpl", LicenseType::Lgpl),
    ("gpl", LicenseType::Gpl),
    ("agpl", LicenseType::Gpl),
    ("asl", LicenseType::Apache2),
    ("epl", LicenseType::Eclipse),
    ("mpl", LicenseType::Mpl),
    ("cc0", LicenseType::CreativeCommons),
    ("cc", LicenseType::CreativeCommons),
    ("mit", LicenseType::Mit),
    ("bsd", LicenseType::Bsd),
];

/// LicenseClassification policy for inferring a license family
///
/// Priority order:
/// 1. the license name (if non-empty and recognized)
/// 2. the license URL (if present and recognized)
/// 3. `Unknown`
pub struct LicenseClassification;

impl LicenseClassification {
    pub fn classify(license: &License) -> LicenseType {
        Self::classify_text(&license.name)
            .or_else(|| license.url.as_deref().and_then(Self::classify_text))
            .unwrap_or(LicenseType::Unknown)
    }

    fn classify_text(text: &str) -> Option<LicenseType> {
        let text = text.trim().to_ascii_lowercase();
        if text.is_empty() {
            return None;
        }
        if let Some((_, license_type)) = PHRASES.iter().find(|(phrase, _)| text.contains(phrase)) {
            return Some(*license_type);
        }
        let tokens: Vec<&str> = text
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .collect();
        TOKENS
            .iter()
            .find(|(token, _)| tokens.contains(token))
            .map(|(_, license_type)| *license_type)
    }
}
