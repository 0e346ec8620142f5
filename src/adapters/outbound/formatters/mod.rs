/// Formatter adapters for SBOM documents and reports
mod cyclonedx_formatter;
mod json_formatter;
mod markdown_formatter;

pub use cyclonedx_formatter::CycloneDxFormatter;
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
