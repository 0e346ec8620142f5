use crate::ports::outbound::{ReportFormatter, ReportRow};
use crate::shared::Result;

/// JsonFormatter adapter rendering report rows as a pretty-printed JSON array
///
/// Each row carries a `table` tag naming its kind.
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, rows: &[ReportRow]) -> Result<String> {
        let mut sorted: Vec<&ReportRow> = rows.iter().collect();
        sorted.sort();
        serde_json::to_string_pretty(&sorted).map_err(Into::into)
    }
}
