use crate::ports::outbound::{ReportRow, ReportSink};
use std::sync::Mutex;

/// InMemoryReportSink adapter collecting rows until the run finishes
///
/// Rows come back sorted, so concurrent phases never change the report.
#[derive(Default)]
pub struct InMemoryReportSink {
    rows: Mutex<Vec<ReportRow>>,
}

impl InMemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<ReportRow> {
        let mut rows = self
            .rows
            .lock()
            .map(|rows| rows.clone())
            .unwrap_or_default();
        rows.sort();
        rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.lock().map(|rows| rows.is_empty()).unwrap_or(true)
    }
}

impl ReportSink for InMemoryReportSink {
    fn insert_row(&self, row: ReportRow) {
        if let Ok(mut rows) = self.rows.lock() {
            rows.push(row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upgrade(artifact: &str) -> ReportRow {
        ReportRow::VersionUpgrade {
            project: "com.example:service".to_string(),
            group: "org.slf4j".to_string(),
            artifact: artifact.to_string(),
            from: "1.7.36".to_string(),
            to: "2.0.9".to_string(),
        }
    }

    #[test]
    fn test_rows_are_sorted() {
        let sink = InMemoryReportSink::new();
        assert!(sink.is_empty());

        sink.insert_row(upgrade("slf4j-simple"));
        sink.insert_row(upgrade("slf4j-api"));

        let rows = sink.rows();
        assert!(!sink.is_empty());
        assert_eq!(rows, vec![upgrade("slf4j-api"), upgrade("slf4j-simple")]);
    }
}
