//! Helpers for failures that are logged and then absorbed.

/// Discard an error after logging it at `warn`.
pub trait LogOnError<T> {
    fn log_warn(self, context: &str) -> Option<T>;

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        self.map_err(|e| tracing::warn!("{}: {}", context, e)).ok()
    }

    fn log_warn_default(self, context: &str) -> T
    where
        T: Default,
    {
        self.log_warn(context).unwrap_or_default()
    }
}
