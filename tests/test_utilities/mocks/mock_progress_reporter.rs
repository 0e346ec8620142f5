use depscope::prelude::*;
use std::sync::{Arc, Mutex};

/// One call made to the reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    Message(String),
    Progress { current: usize, total: usize, item: Option<String> },
    Error(String),
    Completion(String),
}

/// Mock ProgressReporter that records every call. Clones share the log.
#[derive(Default, Clone)]
pub struct MockProgressReporter {
    events: Arc<Mutex<Vec<ProgressEvent>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Events rendered as `Progress: 1/3 - path`, `Error: ...`, `Completed: ...`.
    pub fn get_messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .map(|event| match event {
                ProgressEvent::Message(message) => message,
                ProgressEvent::Progress {
                    current,
                    total,
                    item: Some(item),
                } => format!("Progress: {current}/{total} - {item}"),
                ProgressEvent::Progress { current, total, .. } => {
                    format!("Progress: {current}/{total}")
                }
                ProgressEvent::Error(message) => format!("Error: {message}"),
                ProgressEvent::Completion(message) => format!("Completed: {message}"),
            })
            .collect()
    }

    pub fn error_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ProgressEvent::Error(_)))
            .count()
    }

    fn record(&self, event: ProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl ProgressReporter for MockProgressReporter {
    fn report(&self, message: &str) {
        self.record(ProgressEvent::Message(message.to_string()));
    }

    fn report_progress(&self, current: usize, total: usize, message: Option<&str>) {
        self.record(ProgressEvent::Progress {
            current,
            total,
            item: message.map(str::to_string),
        });
    }

    fn report_error(&self, message: &str) {
        self.record(ProgressEvent::Error(message.to_string()));
    }

    fn report_completion(&self, message: &str) {
        self.record(ProgressEvent::Completion(message.to_string()));
    }
}
