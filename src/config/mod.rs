//! Configuration module for losscheckr

mod settings;

pub use settings::{
    default_concurrency, CheckerConfig, ConfigBuilder, OutputMode, DEFAULT_CUTOFF_HZ,
};
