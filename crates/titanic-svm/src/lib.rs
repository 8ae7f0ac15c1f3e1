//! # titanic-svm
//!
//! Survival prediction for tabular passenger data with a kernel SVC.
//!
//! ## Modules
//!
//! - **core**: Table, Column and Cell; numeric Matrix; DataError; Diagnostics; Classifier trait
//! - **io**: CSV dataset loading, prediction persistence, JSON profiling reports
//! - **preprocessing**: ColumnDropper, NullAuditor, Imputer, LabelEncoder, StandardScaler, split
//! - **metrics**: accuracy, confusion matrix
//! - **svm**: SVC with linear, RBF and polynomial kernels
//! - **pipeline**: SurvivalPipeline: load → audit → clean → encode → split → scale → train → predict → persist

/// Tables, matrices, errors and shared traits.
pub use titanic_svm_core as core;

/// I/O utilities.
pub use titanic_svm_io as io;

/// Data preprocessing.
pub use titanic_svm_preprocessing as preprocessing;

/// Evaluation metrics.
pub use titanic_svm_metrics as metrics;

/// Support vector machines.
pub use titanic_svm_svm as svm;

/// Pipeline orchestration.
pub use titanic_svm_pipeline as pipeline;

pub use titanic_svm_pipeline::{PipelineConfig, RunSummary, StageError, SurvivalPipeline};
