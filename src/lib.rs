//! Errdiff - error diffusion dithering
//!
//! Configuration, logging and a strategy-resolving service around the
//! [`errdiff_core`] engine. This library exposes modules for integration
//! testing.

pub mod error;
pub mod logging;
pub mod models;
pub mod services;

pub use errdiff_core::{
    BufferError, Diffusion, DiffusionEngine, KernelDiffusion, NoDiffusion, PixelBuffer,
};
