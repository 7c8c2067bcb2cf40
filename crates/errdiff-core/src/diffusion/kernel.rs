//! Weight-table error diffusion.
//!
//! [`KernelDiffusion`] spreads quantization error over a fixed spatial
//! kernel of forward and downward neighbors. The weight table is supplied by
//! the caller; this module only validates it and applies it.

use crate::buffer::PixelBuffer;
use crate::error::BufferError;

use super::Diffusion;

/// One kernel entry: `(dx, dy, weight)`.
///
/// - `dx`: horizontal offset (positive = right)
/// - `dy`: vertical offset (positive = below)
/// - `weight`: numerator; the neighbor receives `error * weight / divisor`
pub type KernelEntry = (i32, i32, u32);

/// An error diffusion strategy driven by a weight table.
///
/// The total error propagated is `sum(weights) / divisor`. A table such as
/// Floyd-Steinberg's propagates all of it:
///
/// ```text
///        X   7
///    3   5   1      (divisor 16)
/// ```
///
/// ```
/// use errdiff_core::{Diffusion, KernelDiffusion};
///
/// let kernel = KernelDiffusion::new(
///     "Floyd-Steinberg",
///     "_FS",
///     vec![(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
///     16,
/// )
/// .unwrap();
/// assert_eq!(kernel.tag(), "_FS");
/// assert!((kernel.propagation() - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
pub struct KernelDiffusion {
    name: String,
    tag: String,
    entries: Vec<KernelEntry>,
    divisor: u32,
}

impl KernelDiffusion {
    /// Create a kernel strategy.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidKernel`] when `divisor` is zero or an
    /// entry points at the current pixel or at one the row-major pass has
    /// already visited (`dy < 0`, or `dy == 0` with `dx <= 0`).
    pub fn new(
        name: impl Into<String>,
        tag: impl Into<String>,
        entries: Vec<KernelEntry>,
        divisor: u32,
    ) -> Result<Self, BufferError> {
        if divisor == 0 {
            return Err(BufferError::InvalidKernel(
                "divisor must be positive".to_string(),
            ));
        }
        if let Some(&(dx, dy, _)) = entries
            .iter()
            .find(|&&(dx, dy, _)| dy < 0 || (dy == 0 && dx <= 0))
        {
            return Err(BufferError::InvalidKernel(format!(
                "entry ({}, {}) does not point at an unvisited pixel",
                dx, dy
            )));
        }
        Ok(Self {
            name: name.into(),
            tag: tag.into(),
            entries,
            divisor,
        })
    }

    /// The `(dx, dy, weight)` entries.
    pub fn entries(&self) -> &[KernelEntry] {
        &self.entries
    }

    /// The weight divisor.
    pub fn divisor(&self) -> u32 {
        self.divisor
    }

    /// Fraction of the error this kernel passes on, `sum(weights) / divisor`.
    pub fn propagation(&self) -> f64 {
        let total: u64 = self.entries.iter().map(|&(_, _, w)| u64::from(w)).sum();
        total as f64 / f64::from(self.divisor)
    }
}

impl Diffusion for KernelDiffusion {
    fn name(&self) -> &str {
        &self.name
    }

    fn tag(&self) -> &str {
        &self.tag
    }

    fn diffuse(
        &self,
        buffer: &mut PixelBuffer<'_>,
        x: usize,
        y: usize,
        error: &[f64],
    ) -> Result<(), BufferError> {
        let divisor = f64::from(self.divisor);
        for &(dx, dy, weight) in &self.entries {
            // Edge pixels have fewer neighbors
            if let Some((nx, ny)) = buffer.neighbor(x, y, dx as isize, dy as isize) {
                buffer.diffuse_error(nx, ny, error, f64::from(weight) / divisor)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floyd_steinberg() -> KernelDiffusion {
        KernelDiffusion::new(
            "Floyd-Steinberg",
            "_FS",
            vec![(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
            16,
        )
        .unwrap()
    }

    #[test]
    fn test_full_propagation() {
        let kernel = floyd_steinberg();
        assert!((kernel.propagation() - 1.0).abs() < f64::EPSILON);
        assert_eq!(kernel.divisor(), 16);
        assert_eq!(kernel.entries().len(), 4);
    }

    #[test]
    fn test_partial_propagation() {
        // Atkinson-shaped: 6/8
        let kernel = KernelDiffusion::new(
            "Partial",
            "_P",
            vec![(1, 0, 1), (2, 0, 1), (-1, 1, 1), (0, 1, 1), (1, 1, 1), (0, 2, 1)],
            8,
        )
        .unwrap();
        assert!((kernel.propagation() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_divisor_rejected() {
        let result = KernelDiffusion::new("Bad", "_BAD", vec![(1, 0, 1)], 0);
        assert!(matches!(result, Err(BufferError::InvalidKernel(_))));
    }

    #[test]
    fn test_backward_entries_rejected() {
        for entry in [(0, 0, 1), (-1, 0, 1), (0, -1, 1), (3, -1, 1)] {
            let result = KernelDiffusion::new("Bad", "_BAD", vec![entry], 4);
            assert!(
                matches!(result, Err(BufferError::InvalidKernel(_))),
                "entry {:?} should be rejected",
                entry
            );
        }
    }

    #[test]
    fn test_diffuse_splits_error_by_weight() {
        let mut buffer = PixelBuffer::from_vec(vec![0.5; 9], 3, 3, 1).unwrap();
        floyd_steinberg().diffuse(&mut buffer, 1, 0, &[0.16]).unwrap();

        let close = |a: f64, b: f64| (a - b).abs() < 1e-12;
        assert!(close(buffer.pixel(2, 0)[0], 0.5 + 0.16 * 7.0 / 16.0));
        assert!(close(buffer.pixel(0, 1)[0], 0.5 + 0.16 * 3.0 / 16.0));
        assert!(close(buffer.pixel(1, 1)[0], 0.5 + 0.16 * 5.0 / 16.0));
        assert!(close(buffer.pixel(2, 1)[0], 0.5 + 0.16 * 1.0 / 16.0));
        // Untouched
        assert_eq!(buffer.pixel(0, 0)[0], 0.5);
        assert_eq!(buffer.pixel(1, 0)[0], 0.5);
        assert_eq!(buffer.pixel(1, 2)[0], 0.5);
    }

    #[test]
    fn test_diffuse_skips_out_of_range_neighbors() {
        let mut buffer = PixelBuffer::from_vec(vec![0.5; 4], 2, 2, 1).unwrap();
        // Bottom-right corner: every neighbor is outside the image.
        floyd_steinberg().diffuse(&mut buffer, 1, 1, &[1.0]).unwrap();
        assert_eq!(buffer.raw_content(), &[0.5; 4]);

        // Right edge of the first row: only the two lower-left neighbors exist.
        floyd_steinberg().diffuse(&mut buffer, 1, 0, &[0.16]).unwrap();
        assert_eq!(buffer.pixel(0, 0)[0], 0.5);
        assert!(buffer.pixel(0, 1)[0] > 0.5);
        assert!(buffer.pixel(1, 1)[0] > 0.5);
    }

    #[test]
    fn test_diffuse_clamps_neighbors() {
        let mut buffer = PixelBuffer::from_vec(vec![0.9, 0.9], 2, 1, 1).unwrap();
        let kernel = KernelDiffusion::new("Right", "_R", vec![(1, 0, 1)], 1).unwrap();
        kernel.diffuse(&mut buffer, 0, 0, &[5.0]).unwrap();
        assert_eq!(buffer.pixel(1, 0), &[1.0]);
    }

    #[test]
    fn test_diffuse_rejects_wrong_error_length() {
        let mut buffer = PixelBuffer::new(2, 2, 3).unwrap();
        let result = floyd_steinberg().diffuse(&mut buffer, 0, 0, &[0.1, 0.1]);
        assert_eq!(
            result.unwrap_err(),
            BufferError::ChannelMismatch {
                expected: 3,
                actual: 2
            }
        );
    }
}
