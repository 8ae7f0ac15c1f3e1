pub mod columns;
pub mod config;
pub mod pipeline;
pub mod stage;

pub use config::{ConfigError, PipelineConfig, DEFAULT_CONFIG_PATH};
pub use pipeline::{RunSummary, SurvivalPipeline};
pub use stage::{PipelineState, Stage, StageError};
