pub mod config;

pub use config::{DitherConfig, StrategyConfig};
