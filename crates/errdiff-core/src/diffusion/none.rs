//! The null strategy: color reduction without dithering.

use crate::buffer::PixelBuffer;
use crate::error::BufferError;

use super::Diffusion;

/// Discards every quantization error.
///
/// The engine still computes the error for each pixel, but no neighbor ever
/// receives any of it. The output is the quantization function applied to
/// each pixel independently, which makes this the baseline that weighted
/// strategies are compared against.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDiffusion;

impl NoDiffusion {
    pub const NAME: &'static str = "No dithering";
    pub const TAG: &'static str = "_NONE";
}

impl Diffusion for NoDiffusion {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn tag(&self) -> &str {
        Self::TAG
    }

    #[inline]
    fn diffuse(
        &self,
        _buffer: &mut PixelBuffer<'_>,
        _x: usize,
        _y: usize,
        _error: &[f64],
    ) -> Result<(), BufferError> {
        Ok(())
    }
}
