//! Error types for markup rendering.

/// Error produced while rendering a value to markup.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// JSON input could not be decoded.
    #[error("JSON decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Value nesting exceeded the configured recursion limit.
    ///
    /// The renderer performs no cycle detection; the depth guard turns a
    /// pathological input into a detectable error instead of stack
    /// exhaustion.
    #[error("Nesting depth limit exceeded ({limit})")]
    RecursionLimit {
        /// The configured maximum depth.
        limit: usize,
    },
}
