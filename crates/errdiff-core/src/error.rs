//! Error types for buffer construction and pixel operations.

use thiserror::Error;

/// Error type for pixel buffer and diffusion operations.
///
/// Every variant is a contract violation by the caller. Nothing here is
/// transient, so there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BufferError {
    /// Width, height or channel count is zero
    #[error("buffer dimensions must be positive (got {width}x{height} with {channels} channels)")]
    EmptyDimensions {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// `width * height * channels` does not fit in `usize`
    #[error("buffer dimensions {width}x{height} with {channels} channels are too large")]
    TooLarge {
        width: usize,
        height: usize,
        channels: usize,
    },

    /// Flat source length does not equal `width * height * channels`
    #[error("source length mismatch: expected {expected} values, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Multi-axis source has a column whose length differs from the first
    #[error("ragged source: column {column} has {actual} rows, expected {expected}")]
    RaggedColumn {
        column: usize,
        expected: usize,
        actual: usize,
    },

    /// Multi-axis source has a pixel whose channel count differs from the first
    #[error("ragged source: pixel ({x}, {y}) has {actual} channels, expected {expected}")]
    RaggedPixel {
        x: usize,
        y: usize,
        expected: usize,
        actual: usize,
    },

    /// Pixel or error sequence does not match the buffer's channel count
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },

    /// Diffusion kernel cannot be used for a single forward pass
    #[error("invalid diffusion kernel: {0}")]
    InvalidKernel(String),
}
