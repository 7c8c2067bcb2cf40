//! Quantization functions standing in for palette lookups.

/// Nearest of {0.0, 1.0} per channel
pub fn binary(pixel: &[f64]) -> Vec<f64> {
    pixel
        .iter()
        .map(|&v| if v >= 0.5 { 1.0 } else { 0.0 })
        .collect()
}

/// Nearest of four evenly spaced levels per channel
pub fn four_levels(pixel: &[f64]) -> Vec<f64> {
    pixel.iter().map(|&v| (v * 3.0).round() / 3.0).collect()
}
