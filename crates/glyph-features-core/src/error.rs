/// Errors raised when a grid cannot be built from the caller's buffer.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("invalid grid dimensions (width={width}, height={height})")]
    EmptyDimensions { width: usize, height: usize },
    #[error("grid buffer length mismatch (expected {expected} cells, got {got})")]
    BufferSizeMismatch { expected: usize, got: usize },
}
