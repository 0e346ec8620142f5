use crate::ports::outbound::{ReportFormatter, ReportRow};
use crate::shared::Result;

/// MarkdownFormatter adapter rendering report rows as Markdown tables
///
/// One section per table, in a stable order, so two runs over the same
/// workspace produce the same report.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn render_table(output: &mut String, rows: &[&ReportRow]) {
        let Some(first) = rows.first() else {
            return;
        };
        let header = first.header();

        output.push_str(&format!("## {}\n\n", first.table()));
        output.push_str(&format!("| {} |\n", header.join(" | ")));
        output.push_str(&format!(
            "|{}|\n",
            header
                .iter()
                .map(|h| "-".repeat(h.len() + 2))
                .collect::<Vec<_>>()
                .join("|")
        ));
        for row in rows {
            let cells: Vec<String> = row
                .cells()
                .iter()
                .map(|cell| Self::escape_markdown_table_cell(cell))
                .collect();
            output.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        output.push('\n');
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, rows: &[ReportRow]) -> Result<String> {
        let mut output = String::from("# Dependency Report\n\n");
        if rows.is_empty() {
            output.push_str("*No findings*\n");
            return Ok(output);
        }

        let mut sorted: Vec<&ReportRow> = rows.iter().collect();
        sorted.sort();
        for table in sorted.chunk_by(|a, b| a.table() == b.table()) {
            Self::render_table(&mut output, table);
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn redundant(artifact: &str) -> ReportRow {
        ReportRow::RedundantDependency {
            project: "com.example:service".to_string(),
            scope: "compile".to_string(),
            group: "com.fasterxml.jackson.core".to_string(),
            artifact: artifact.to_string(),
            version: "2.17.0".to_string(),
        }
    }

    #[test]
    fn test_empty_report() {
        let output = MarkdownFormatter::new().format(&[]).unwrap();
        assert!(output.contains("*No findings*"));
    }

    #[test]
    fn test_rows_grouped_by_table_in_stable_order() {
        let rows = vec![
            ReportRow::VersionUpgrade {
                project: "com.example:service".to_string(),
                group: "org.slf4j".to_string(),
                artifact: "slf4j-api".to_string(),
                from: "1.7.36".to_string(),
                to: "2.0.9".to_string(),
            },
            redundant("jackson-core"),
            redundant("jackson-annotations"),
        ];
        let output = MarkdownFormatter::new().format(&rows).unwrap();

        let redundant_at = output.find("## Redundant dependencies").unwrap();
        let upgrades_at = output.find("## Version upgrades").unwrap();
        assert!(redundant_at < upgrades_at);
        assert!(output.contains("| Project | Scope | Group | Artifact | Version |"));
        assert!(
            output.find("jackson-annotations").unwrap() < output.find("jackson-core").unwrap()
        );
        assert!(output.contains("| com.example:service | org.slf4j | slf4j-api | 1.7.36 | 2.0.9 |"));
    }

    #[test]
    fn test_cells_are_escaped() {
        let rows = vec![ReportRow::GradleConfigurationError {
            project_path: "app/build.gradle".to_string(),
            configuration: "runtimeClasspath".to_string(),
            exception_type: "ResolveException".to_string(),
            message: Some("a | b\nc".to_string()),
        }];
        let output = MarkdownFormatter::new().format(&rows).unwrap();
        assert!(output.contains("a \\| b c"));
    }
}
