//! Error diffusion strategies.
//!
//! A strategy decides which not-yet-visited neighbors receive which fraction
//! of a pixel's quantization error. The [`DiffusionEngine`](crate::DiffusionEngine)
//! owns the traversal, quantization and error computation; strategies only
//! implement the redistribution step.
//!
//! # Contract
//!
//! - Neighbor coordinates must be bounds-checked with
//!   [`PixelBuffer::neighbor()`] before touching the buffer. A neighbor
//!   outside the image is skipped silently.
//! - Neighbor values are changed only through
//!   [`PixelBuffer::diffuse_error()`], which clamps to `[0.0, 1.0]`.
//! - Kernels point only forward in the engine's row-major traversal: to the
//!   right on the current row, or to any column on a later row.
//!
//! # Strategies
//!
//! - [`NoDiffusion`]: discards the error (plain color reduction)
//! - [`KernelDiffusion`]: spreads the error over a caller-supplied weight table

mod kernel;
mod none;

pub use kernel::{KernelDiffusion, KernelEntry};
pub use none::NoDiffusion;

use crate::buffer::PixelBuffer;
use crate::error::BufferError;

/// Trait for error redistribution policies.
///
/// Each strategy carries a human-readable name and a short tag. Both are
/// informational: the engine never interprets them, but callers use them for
/// logging or to name output files.
pub trait Diffusion {
    /// Descriptive name, e.g. `"No dithering"`.
    fn name(&self) -> &str;

    /// Short machine-usable tag, e.g. `"_NONE"`.
    fn tag(&self) -> &str;

    /// Redistribute `error` from the pixel at `(x, y)` to its neighbors.
    ///
    /// `error` has exactly one value per channel.
    fn diffuse(
        &self,
        buffer: &mut PixelBuffer<'_>,
        x: usize,
        y: usize,
        error: &[f64],
    ) -> Result<(), BufferError>;
}

impl<D: Diffusion + ?Sized> Diffusion for Box<D> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tag(&self) -> &str {
        (**self).tag()
    }

    fn diffuse(
        &self,
        buffer: &mut PixelBuffer<'_>,
        x: usize,
        y: usize,
        error: &[f64],
    ) -> Result<(), BufferError> {
        (**self).diffuse(buffer, x, y, error)
    }
}

impl<D: Diffusion + ?Sized> Diffusion for &D {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tag(&self) -> &str {
        (**self).tag()
    }

    fn diffuse(
        &self,
        buffer: &mut PixelBuffer<'_>,
        x: usize,
        y: usize,
        error: &[f64],
    ) -> Result<(), BufferError> {
        (**self).diffuse(buffer, x, y, error)
    }
}
