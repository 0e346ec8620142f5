/// Report format enumeration
///
/// Shared by the CLI, the config file and the report formatters, so it lives
/// in the application layer rather than in any one adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// Pretty-printed JSON rows (default)
    #[default]
    Json,
    /// One Markdown table per row kind
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'markdown'",
                s
            )),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Markdown => write!(f, "markdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_report_format_from_str_is_case_insensitive() {
        assert_eq!(ReportFormat::from_str("JSON").unwrap(), ReportFormat::Json);
        assert_eq!(ReportFormat::from_str("Markdown").unwrap(), ReportFormat::Markdown);
        assert_eq!(ReportFormat::from_str("md").unwrap(), ReportFormat::Markdown);
    }

    #[test]
    fn test_report_format_from_str_invalid() {
        let error = ReportFormat::from_str("xml").unwrap_err();
        assert!(error.contains("Invalid format"));
        assert!(error.contains("xml"));
    }

    #[test]
    fn test_report_format_default_is_json() {
        assert_eq!(ReportFormat::default(), ReportFormat::Json);
        assert_eq!(ReportFormat::default().to_string(), "json");
    }
}
