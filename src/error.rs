//! Error types and handling for Seurat

/// Result type alias for Seurat operations
pub type Result<T> = std::result::Result<T, SeuratError>;

/// Error types for the Seurat buffer pool
#[derive(Debug, thiserror::Error)]
pub enum SeuratError {
    /// Invalid parameters or configuration
    #[error("Invalid parameter: {parameter} - {message}")]
    InvalidParameter { parameter: String, message: String },

    /// A buffer handed back to the pool whose length matches no size class.
    /// This is a caller contract violation: buffers issued by a pooled
    /// strategy always carry a class-exact length, so an unknown length
    /// means the buffer was never issued by this pool.
    #[error("Foreign buffer: length {length} matches no size class")]
    ForeignBuffer { length: usize },
}

impl SeuratError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a foreign buffer error
    pub fn foreign_buffer(length: usize) -> Self {
        Self::ForeignBuffer { length }
    }
}
