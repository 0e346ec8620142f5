/// Data Transfer Objects for application layer
mod list_scope;
mod pipeline_outcome;
mod report_format;

pub use list_scope::ListScope;
pub use pipeline_outcome::PipelineOutcome;
pub use report_format::ReportFormat;
