/// ProgressReporter port for user-facing progress during a run
///
/// Diagnostic detail goes to `tracing`; this port carries the short messages a
/// user watches while a workspace is analyzed.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, message: &str);

    /// Reports `current` of `total` steps, with an optional label.
    fn report_progress(&self, current: usize, total: usize, message: Option<&str>);

    /// Reports a recoverable failure. The run continues.
    fn report_error(&self, message: &str);

    fn report_completion(&self, message: &str);
}
