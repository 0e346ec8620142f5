/// Report sink adapters
mod in_memory_report_sink;

pub use in_memory_report_sink::InMemoryReportSink;
