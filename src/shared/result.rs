/// Crate-wide result type. Library code attaches context with `anyhow::Context`
/// and typed failures come from [`crate::shared::error::DepscopeError`].
pub type Result<T> = std::result::Result<T, anyhow::Error>;
