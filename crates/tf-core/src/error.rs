/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when configuring the core.
///
/// Applying operations never fails; only construction of a [`crate::Reducer`]
/// from user-supplied [`crate::Rules`] can.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A rules value is outside its accepted range.
    #[error("invalid rules: {field} must be {expected}, got {value}")]
    InvalidRules {
        /// The offending field name.
        field: &'static str,
        /// Human-readable description of the accepted range.
        expected: &'static str,
        /// The rejected value.
        value: i32,
    },
}
