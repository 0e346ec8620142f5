use crate::shared::Result;

/// OutputPresenter port for the rewritten workspace and rendered reports
pub trait OutputPresenter {
    /// # Errors
    /// Returns an error if the destination cannot be written.
    fn present(&self, content: &str) -> Result<()>;
}
