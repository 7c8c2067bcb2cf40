//! errdiff-core: error diffusion over normalized pixel buffers
//!
//! This crate reduces a continuous-tone image to a limited palette while
//! spreading the quantization error to neighboring pixels. It keeps three
//! concerns apart:
//!
//! - **Storage**: [`PixelBuffer`] holds normalized `f64` channels in one
//!   flat row-major layout and provides the error arithmetic, including the
//!   `[0.0, 1.0]` clamp.
//! - **Quantization**: an external function `Fn(&[f64]) -> Vec<f64>` that
//!   maps a pixel to its reduced palette color. This crate never chooses
//!   colors itself.
//! - **Diffusion**: a [`Diffusion`] strategy decides which neighbors receive
//!   which fraction of the error. [`NoDiffusion`] discards it.
//!
//! # Quick Start
//!
//! ```
//! use errdiff_core::{DiffusionEngine, KernelDiffusion, PixelBuffer};
//!
//! let to_black_or_white = |pixel: &[f64]| -> Vec<f64> {
//!     pixel.iter().map(|&v| v.round()).collect()
//! };
//! let kernel = KernelDiffusion::new(
//!     "Floyd-Steinberg",
//!     "_FS",
//!     vec![(1, 0, 7), (-1, 1, 3), (0, 1, 5), (1, 1, 1)],
//!     16,
//! )
//! .unwrap();
//! let engine = DiffusionEngine::new(to_black_or_white, kernel);
//!
//! let mut buffer = PixelBuffer::from_vec(vec![0.5; 16], 4, 4, 1).unwrap();
//! engine.process(&mut buffer).unwrap();
//! assert!(buffer.raw_content().iter().all(|&v| v == 0.0 || v == 1.0));
//! ```
//!
//! # Pass Structure
//!
//! For every pixel, in row-major order:
//!
//! ```text
//! original = buffer.pixel(x, y)
//! reduced  = quantize(original)
//! buffer.set_pixel(x, y, reduced)
//! error    = original - reduced          (per channel)
//! strategy.diffuse(buffer, x, y, error)  -> buffer.diffuse_error(nx, ny, error, weight)
//! ```
//!
//! The engine is single-threaded and order-dependent by nature: each pixel
//! may depend on error pushed forward by every pixel before it.

pub mod buffer;
pub mod diffusion;
pub mod engine;
pub mod error;


pub use buffer::PixelBuffer;
pub use diffusion::{Diffusion, KernelDiffusion, KernelEntry, NoDiffusion};
pub use engine::DiffusionEngine;
pub use error::BufferError;
