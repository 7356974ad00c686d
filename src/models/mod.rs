pub mod config;
pub mod report;

pub use config::{
    AppConfig, ColorSpaceSetting, OutputConfig, OutputFormat, RotationConfig, ScrambleConfig,
    CONFIG_ENV,
};
pub use report::{FailedFile, ProcessedFile, RunReport};
