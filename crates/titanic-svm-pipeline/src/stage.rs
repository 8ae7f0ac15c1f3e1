use std::fmt;

use thiserror::Error;
use titanic_svm_core::{DataError, DataResult};

/// A named step of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Audit,
    Clean,
    Encode,
    Split,
    Scale,
    Train,
    Predict,
    Score,
    Persist,
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Audit => "audit",
            Stage::Clean => "clean",
            Stage::Encode => "encode",
            Stage::Split => "split",
            Stage::Scale => "scale",
            Stage::Train => "train",
            Stage::Predict => "predict",
            Stage::Score => "score",
            Stage::Persist => "persist",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Progress of a run. Only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineState {
    Initialized,
    Loaded,
    Audited,
    Cleaned,
    Encoded,
    Split,
    Scaled,
    Trained,
    Predicted,
    Persisted,
}

/// The first error of a run, tagged with the stage it aborted.
#[derive(Debug, Error)]
#[error("fatal error on '{stage}' stage")]
pub struct StageError {
    pub stage: Stage,
    #[source]
    pub source: DataError,
}

impl StageError {
    pub fn new(stage: Stage, source: DataError) -> Self {
        StageError { stage, source }
    }
}

pub(crate) trait AtStage<T> {
    fn at(self, stage: Stage) -> Result<T, StageError>;
}

impl<T> AtStage<T> for DataResult<T> {
    fn at(self, stage: Stage) -> Result<T, StageError> {
        self.map_err(|e| StageError::new(stage, e))
    }
}
