//! Normalized floating-point pixel storage.
//!
//! [`PixelBuffer`] holds `width * height * channels` values in `[0.0, 1.0]`
//! in one canonical flat layout: row-major by `y`, then `x`, then channel.
//! Multi-axis sources are flattened on input, so every buffer indexes the
//! same way regardless of how it was constructed.
//!
//! # Copying and Aliasing
//!
//! A buffer either owns its values or aliases a caller's slice, chosen by
//! the constructor:
//!
//! - [`PixelBuffer::from_slice`] copies. Later writes to the source are not
//!   seen by the buffer and vice versa.
//! - [`PixelBuffer::from_slice_mut`] aliases. No copy is made, and every
//!   write the buffer performs lands in the caller's storage.
//! - [`PixelBuffer::from_vec`] takes ownership of a `Vec` without copying.
//!
//! ```
//! use errdiff_core::PixelBuffer;
//!
//! let mut values = vec![0.25, 0.75];
//! {
//!     let mut buffer = PixelBuffer::from_slice_mut(&mut values, 2, 1, 1).unwrap();
//!     buffer.set_pixel(0, 0, &[1.0]).unwrap();
//! }
//! assert_eq!(values, vec![1.0, 0.75]);
//! ```

use std::ops::{Deref, DerefMut};

use crate::error::BufferError;

#[derive(Debug)]
enum Storage<'a> {
    Owned(Vec<f64>),
    Aliased(&'a mut [f64]),
}

impl Deref for Storage<'_> {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        match self {
            Storage::Owned(values) => &values[..],
            Storage::Aliased(values) => &values[..],
        }
    }
}

impl DerefMut for Storage<'_> {
    fn deref_mut(&mut self) -> &mut [f64] {
        match self {
            Storage::Owned(values) => &mut values[..],
            Storage::Aliased(values) => &mut values[..],
        }
    }
}

/// Pixel storage with a fixed size and channel count.
///
/// Coordinates passed to [`pixel()`](PixelBuffer::pixel),
/// [`set_pixel()`](PixelBuffer::set_pixel) and
/// [`diffuse_error()`](PixelBuffer::diffuse_error) must lie inside
/// `[0, width) x [0, height)`. Only a debug assertion guards this; callers
/// that compute neighbor coordinates go through
/// [`neighbor()`](PixelBuffer::neighbor) first.
///
/// Channel sequences of the wrong length are always rejected with
/// [`BufferError::ChannelMismatch`].
#[derive(Debug)]
pub struct PixelBuffer<'a> {
    width: usize,
    height: usize,
    channels: usize,
    data: Storage<'a>,
}

impl PixelBuffer<'static> {
    /// Create a zero-filled buffer.
    pub fn new(width: usize, height: usize, channels: usize) -> Result<Self, BufferError> {
        let len = sample_count(width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: Storage::Owned(vec![0.0; len]),
        })
    }

    /// Take ownership of flat row-major values without copying them.
    pub fn from_vec(
        values: Vec<f64>,
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, BufferError> {
        check_source(values.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: Storage::Owned(values),
        })
    }

    /// Copy flat row-major values into a new buffer.
    pub fn from_slice(
        values: &[f64],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, BufferError> {
        check_source(values.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: Storage::Owned(values.to_vec()),
        })
    }

    /// Build a buffer from a multi-axis source indexed `[x][y][channel]`.
    ///
    /// Width, height and channel count are taken from the source shape. The
    /// values are flattened into the canonical row-major layout, so the
    /// result is always an independent copy.
    pub fn from_nested(source: &[Vec<Vec<f64>>]) -> Result<Self, BufferError> {
        let width = source.len();
        let height = source.first().map_or(0, Vec::len);
        let channels = source
            .first()
            .and_then(|column| column.first())
            .map_or(0, Vec::len);
        let len = sample_count(width, height, channels)?;

        for (x, column) in source.iter().enumerate() {
            if column.len() != height {
                return Err(BufferError::RaggedColumn {
                    column: x,
                    expected: height,
                    actual: column.len(),
                });
            }
            for (y, pixel) in column.iter().enumerate() {
                if pixel.len() != channels {
                    return Err(BufferError::RaggedPixel {
                        x,
                        y,
                        expected: channels,
                        actual: pixel.len(),
                    });
                }
            }
        }

        let mut values = Vec::with_capacity(len);
        for y in 0..height {
            for column in source {
                values.extend_from_slice(&column[y]);
            }
        }

        Ok(Self {
            width,
            height,
            channels,
            data: Storage::Owned(values),
        })
    }
}

impl<'a> PixelBuffer<'a> {
    /// Build a buffer that works directly on flat row-major `values`.
    ///
    /// The buffer borrows `values` for its whole lifetime and every write
    /// goes straight into it, so the caller sees the processed image once
    /// the buffer is dropped.
    pub fn from_slice_mut(
        values: &'a mut [f64],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, BufferError> {
        check_source(values.len(), width, height, channels)?;
        Ok(Self {
            width,
            height,
            channels,
            data: Storage::Aliased(values),
        })
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of channels stored per pixel.
    #[inline]
    pub fn channels_per_pixel(&self) -> usize {
        self.channels
    }

    /// Whether this buffer writes into caller-owned storage.
    pub fn is_aliased(&self) -> bool {
        matches!(self.data, Storage::Aliased(_))
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "pixel ({}, {}) outside {}x{} buffer",
            x,
            y,
            self.width,
            self.height
        );
        (y * self.width + x) * self.channels
    }

    #[inline]
    fn check_channels(&self, actual: usize) -> Result<(), BufferError> {
        if actual == self.channels {
            Ok(())
        } else {
            Err(BufferError::ChannelMismatch {
                expected: self.channels,
                actual,
            })
        }
    }

    /// Channel values of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> &[f64] {
        let start = self.offset(x, y);
        &self.data[start..start + self.channels]
    }

    /// Overwrite every channel of the pixel at `(x, y)`.
    ///
    /// Values are stored as given; no clamping happens here.
    pub fn set_pixel(&mut self, x: usize, y: usize, values: &[f64]) -> Result<(), BufferError> {
        self.check_channels(values.len())?;
        let start = self.offset(x, y);
        self.data[start..start + self.channels].copy_from_slice(values);
        Ok(())
    }

    /// Per-channel quantization error `original[i] - new[i]`.
    pub fn error_between(&self, original: &[f64], new: &[f64]) -> Result<Vec<f64>, BufferError> {
        self.check_channels(original.len())?;
        self.check_channels(new.len())?;
        Ok(original.iter().zip(new).map(|(o, n)| o - n).collect())
    }

    /// New channel values `clamp(old[i] + error[i] * weight, 0.0, 1.0)`.
    ///
    /// This is the only place diffused values are clamped, so every strategy
    /// gets the same `[0.0, 1.0]` guarantee.
    pub fn apply_weighted_error(
        &self,
        old: &[f64],
        error: &[f64],
        weight: f64,
    ) -> Result<Vec<f64>, BufferError> {
        self.check_channels(old.len())?;
        self.check_channels(error.len())?;
        Ok(old
            .iter()
            .zip(error)
            .map(|(&value, &err)| weighted_channel(value, err, weight))
            .collect())
    }

    /// Add `error * weight` to the pixel at `(x, y)` in place, clamped.
    pub fn diffuse_error(
        &mut self,
        x: usize,
        y: usize,
        error: &[f64],
        weight: f64,
    ) -> Result<(), BufferError> {
        self.check_channels(error.len())?;
        let start = self.offset(x, y);
        for (value, &err) in self.data[start..start + self.channels]
            .iter_mut()
            .zip(error)
        {
            *value = weighted_channel(*value, err, weight);
        }
        Ok(())
    }

    /// The coordinate `(x + dx, y + dy)` if it lies inside the buffer.
    #[inline]
    pub fn neighbor(&self, x: usize, y: usize, dx: isize, dy: isize) -> Option<(usize, usize)> {
        let nx = x.checked_add_signed(dx).filter(|&nx| nx < self.width)?;
        let ny = y.checked_add_signed(dy).filter(|&ny| ny < self.height)?;
        Some((nx, ny))
    }

    /// Every `(x, y)` in row-major order: `y` outer, `x` inner.
    pub fn coordinates(&self) -> impl Iterator<Item = (usize, usize)> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// The whole backing store, row-major by `y`, then `x`, then channel.
    #[inline]
    pub fn raw_content(&self) -> &[f64] {
        &self.data
    }

    /// Flat row-major values. Owned storage is returned without copying.
    pub fn into_vec(self) -> Vec<f64> {
        match self.data {
            Storage::Owned(values) => values,
            Storage::Aliased(values) => values.to_vec(),
        }
    }
}

/// NaN results count as no contribution.
#[inline]
fn weighted_channel(value: f64, error: f64, weight: f64) -> f64 {
    let updated = value + error * weight;
    if updated.is_nan() {
        0.0
    } else {
        updated.clamp(0.0, 1.0)
    }
}

fn check_dimensions(width: usize, height: usize, channels: usize) -> Result<(), BufferError> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(BufferError::EmptyDimensions {
            width,
            height,
            channels,
        });
    }
    Ok(())
}

/// Number of `f64` values a buffer of these dimensions holds.
fn sample_count(width: usize, height: usize, channels: usize) -> Result<usize, BufferError> {
    check_dimensions(width, height, channels)?;
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(BufferError::TooLarge {
            width,
            height,
            channels,
        })
}

fn check_source(
    len: usize,
    width: usize,
    height: usize,
    channels: usize,
) -> Result<(), BufferError> {
    let expected = sample_count(width, height, channels)?;
    if len != expected {
        return Err(BufferError::LengthMismatch {
            expected,
            actual: len,
        });
    }
    Ok(())
}
