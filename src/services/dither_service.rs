//! Strategy resolution and the instrumented diffusion pass.

use errdiff_core::{Diffusion, DiffusionEngine, PixelBuffer};
use std::time::{Duration, Instant};

use crate::error::DitherError;
use crate::models::DitherConfig;

/// Summary of one processed image
#[derive(Debug, Clone, PartialEq)]
pub struct DitherReport {
    /// Descriptive name of the strategy used
    pub strategy_name: String,
    /// Short tag of the strategy used
    pub strategy_tag: String,
    /// Number of pixels visited
    pub pixels: usize,
    /// Mean absolute quantization error over all channels
    pub mean_abs_error: f64,
    /// Largest absolute quantization error of any channel
    pub max_abs_error: f64,
    /// Wall-clock time of the pass
    pub elapsed: Duration,
}

/// Resolves configured strategies and runs the diffusion pass
pub struct DitherService {
    config: DitherConfig,
}

impl DitherService {
    pub fn new(config: DitherConfig) -> Self {
        Self { config }
    }

    /// Build the named strategy, or the default one for `None`.
    pub fn resolve(
        &self,
        strategy: Option<&str>,
    ) -> Result<Box<dyn Diffusion + Send + Sync>, DitherError> {
        let name = match strategy {
            Some(name) => name,
            None => self
                .config
                .default_strategy
                .as_deref()
                .ok_or(DitherError::NoDefaultStrategy)?,
        };

        let definition = self
            .config
            .strategy(name)
            .ok_or_else(|| DitherError::UnknownStrategy(name.to_string()))?;
        let built = definition.build()?;

        tracing::debug!(
            strategy = %name,
            tag = %built.tag(),
            "Resolved diffusion strategy"
        );

        Ok(built)
    }

    /// Dither `buffer` in place with the named (or default) strategy.
    ///
    /// `quantize` maps one pixel to its reduced palette color.
    pub fn dither<Q>(
        &self,
        buffer: &mut PixelBuffer<'_>,
        strategy: Option<&str>,
        quantize: Q,
    ) -> Result<DitherReport, DitherError>
    where
        Q: Fn(&[f64]) -> Vec<f64>,
    {
        let engine = DiffusionEngine::new(quantize, self.resolve(strategy)?);

        let mut abs_sum = 0.0;
        let mut max_abs = 0.0_f64;
        let mut pixels = 0usize;
        let start = Instant::now();

        engine
            .process_observed(buffer, |_, _, error| {
                pixels += 1;
                for e in error {
                    abs_sum += e.abs();
                    max_abs = max_abs.max(e.abs());
                }
            })
            .inspect_err(|e| {
                tracing::warn!(tag = %engine.tag(), error = %e, "Diffusion pass failed");
            })?;

        let elapsed = start.elapsed();
        let samples = pixels * buffer.channels_per_pixel();
        let mean_abs_error = if samples > 0 {
            abs_sum / samples as f64
        } else {
            0.0
        };

        tracing::info!(
            width = buffer.width(),
            height = buffer.height(),
            channels = buffer.channels_per_pixel(),
            aliased = buffer.is_aliased(),
            strategy = %engine.name(),
            tag = %engine.tag(),
            mean_abs_error,
            elapsed_ms = elapsed.as_millis() as u64,
            "Dithered image"
        );

        Ok(DitherReport {
            strategy_name: engine.name().to_string(),
            strategy_tag: engine.tag().to_string(),
            pixels,
            mean_abs_error,
            max_abs_error: max_abs,
            elapsed,
        })
    }
}

impl Default for DitherService {
    fn default() -> Self {
        Self::new(DitherConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn threshold(pixel: &[f64]) -> Vec<f64> {
        pixel
            .iter()
            .map(|&v| if v >= 0.5 { 1.0 } else { 0.0 })
            .collect()
    }

    #[test]
    fn test_resolve_default() {
        let service = DitherService::default();
        let strategy = service.resolve(None).unwrap();
        assert_eq!(strategy.tag(), "_NONE");
    }

    #[test]
    fn test_resolve_unknown() {
        let service = DitherService::default();
        let err = service.resolve(Some("missing")).err().unwrap();
        assert!(matches!(err, DitherError::UnknownStrategy(ref n) if n == "missing"));
    }

    #[test]
    fn test_resolve_without_default() {
        let mut config = DitherConfig::default();
        config.default_strategy = None;
        let service = DitherService::new(config);
        assert!(matches!(
            service.resolve(None),
            Err(DitherError::NoDefaultStrategy)
        ));
    }

    #[test]
    fn test_dither_reports_errors() {
        let service = DitherService::default();
        let mut buffer = PixelBuffer::from_vec(vec![0.6, 0.4], 2, 1, 1).unwrap();
        let report = service.dither(&mut buffer, None, threshold).unwrap();

        assert_eq!(buffer.raw_content(), &[1.0, 0.0]);
        assert_eq!(report.pixels, 2);
        assert_eq!(report.strategy_tag, "_NONE");
        assert_eq!(report.strategy_name, "No dithering");
        assert!((report.mean_abs_error - 0.4).abs() < 1e-12);
        assert!((report.max_abs_error - 0.4).abs() < 1e-12);
    }
}
