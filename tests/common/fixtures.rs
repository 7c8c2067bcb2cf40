//! Test fixtures and constants.

use std::io::Write;
use tempfile::NamedTempFile;

/// Config with the null strategy and two weight tables
pub const FULL_CONFIG: &str = r#"
default_strategy: none
strategies:
  none:
    type: none
  fs:
    type: kernel
    name: Floyd-Steinberg
    tag: _FS
    divisor: 16
    entries: [[1, 0, 7], [-1, 1, 3], [0, 1, 5], [1, 1, 1]]
  atkinson:
    type: kernel
    name: Atkinson
    tag: _ATKINSON
    divisor: 8
    entries: [[1, 0, 1], [2, 0, 1], [-1, 1, 1], [0, 1, 1], [1, 1, 1], [0, 2, 1]]
"#;

/// Config that fails to parse
pub const BROKEN_CONFIG: &str = "strategies: [not, a, map";

/// Write `content` to a temporary YAML file that lives as long as the handle
pub fn config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".yaml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

/// Horizontal gradient, one channel, values from 0.0 to 1.0 per row
pub fn gradient(width: usize, height: usize) -> Vec<f64> {
    (0..height)
        .flat_map(|_| (0..width).map(move |x| x as f64 / (width - 1) as f64))
        .collect()
}
