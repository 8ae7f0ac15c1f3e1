pub mod table;
pub mod matrix;
pub mod error;
pub mod diagnostics;
pub mod classifier;

pub use table::{Cell, Column, Table};
pub use matrix::{FeatureMatrix, Matrix};
pub use error::{DataError, DataResult};
pub use diagnostics::{Diagnostics, RecordingDiagnostics, Severity, SharedDiagnostics, TracingDiagnostics};
pub use classifier::{Classifier, ParamValue};
