//! The error diffusion pass.
//!
//! [`DiffusionEngine`] pairs an externally supplied quantization function
//! with a [`Diffusion`] strategy and walks a [`PixelBuffer`] once.
//!
//! # Traversal Order
//!
//! Row-major: `y` outer, `x` inner, left to right on every row. Kernels
//! must only reach pixels later in this order (see
//! [`diffusion`](crate::diffusion)), so a pixel's value can still change
//! until the engine visits it, and never afterwards.

use crate::buffer::PixelBuffer;
use crate::diffusion::{Diffusion, NoDiffusion};
use crate::error::BufferError;

/// Drives quantization and error diffusion across a whole buffer.
///
/// The engine holds no per-pass state: every call to
/// [`process()`](DiffusionEngine::process) is an independent, deterministic
/// pass over the buffer it is given.
///
/// # Example
///
/// ```
/// use errdiff_core::{DiffusionEngine, PixelBuffer};
///
/// let threshold = |pixel: &[f64]| -> Vec<f64> {
///     pixel.iter().map(|&v| if v >= 0.5 { 1.0 } else { 0.0 }).collect()
/// };
/// let engine = DiffusionEngine::without_diffusion(threshold);
///
/// let mut buffer = PixelBuffer::from_vec(vec![0.6, 0.4], 2, 1, 1).unwrap();
/// engine.process(&mut buffer).unwrap();
/// assert_eq!(buffer.raw_content(), &[1.0, 0.0]);
/// assert_eq!(engine.tag(), "_NONE");
/// ```
pub struct DiffusionEngine<Q, D> {
    quantize: Q,
    strategy: D,
}

impl<Q> DiffusionEngine<Q, NoDiffusion>
where
    Q: Fn(&[f64]) -> Vec<f64>,
{
    /// Engine that reduces colors without dithering.
    pub fn without_diffusion(quantize: Q) -> Self {
        Self::new(quantize, NoDiffusion)
    }
}

impl<Q, D> DiffusionEngine<Q, D>
where
    Q: Fn(&[f64]) -> Vec<f64>,
    D: Diffusion,
{
    /// Create an engine.
    ///
    /// `quantize` maps one pixel's normalized channels to the reduced
    /// palette color. It must return as many values as it receives.
    pub fn new(quantize: Q, strategy: D) -> Self {
        Self { quantize, strategy }
    }

    /// The strategy's descriptive name.
    pub fn name(&self) -> &str {
        self.strategy.name()
    }

    /// The strategy's short tag.
    pub fn tag(&self) -> &str {
        self.strategy.tag()
    }

    /// Quantize every pixel in row-major order, diffusing each error.
    ///
    /// # Errors
    ///
    /// Fails with [`BufferError::ChannelMismatch`] if the quantization
    /// function returns the wrong number of channels. The pass stops at the
    /// offending pixel; there is no resumption.
    pub fn process(&self, buffer: &mut PixelBuffer<'_>) -> Result<(), BufferError> {
        self.process_observed(buffer, |_, _, _| {})
    }

    /// Like [`process()`](DiffusionEngine::process), also reporting each
    /// pixel's quantization error to `observer` as `(x, y, error)`.
    ///
    /// The observer runs before the error is diffused.
    pub fn process_observed<F>(
        &self,
        buffer: &mut PixelBuffer<'_>,
        mut observer: F,
    ) -> Result<(), BufferError>
    where
        F: FnMut(usize, usize, &[f64]),
    {
        for (x, y) in buffer.coordinates() {
            let original = buffer.pixel(x, y).to_vec();
            let reduced = (self.quantize)(&original[..]);
            buffer.set_pixel(x, y, &reduced)?;
            let error = buffer.error_between(&original, &reduced)?;
            observer(x, y, &error);
            self.strategy.diffuse(buffer, x, y, &error)?;
        }
        Ok(())
    }
}

impl<Q, D: Diffusion> std::fmt::Debug for DiffusionEngine<Q, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffusionEngine")
            .field("name", &self.strategy.name())
            .field("tag", &self.strategy.tag())
            .finish_non_exhaustive()
    }
}
