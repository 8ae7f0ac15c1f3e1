use std::path::{Path, PathBuf};

use titanic_svm_core::{Cell, Classifier, SharedDiagnostics, Table, TracingDiagnostics};
use titanic_svm_io::{write_predictions, DatasetLoader, JsonProfiler, Profiler};
use titanic_svm_metrics::confusion_matrix;
use titanic_svm_preprocessing::{
    split, CategoricalEncoder, ColumnDropper, Imputer, IndependentEncoder, NullAuditor, StandardScaler,
};
use titanic_svm_svm::{Kernel, SVC};

use crate::columns::{
    AGE, CABIN, DEFAULT_EMBARKED, EMBARKED, FARE, NAME, PASSENGER_ID, SEX, SURVIVED, TICKET,
};
use crate::config::PipelineConfig;
use crate::stage::{AtStage, PipelineState, Stage, StageError};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Accuracy on the training set, in `[0, 1]`.
    pub training_accuracy: f64,
    pub predictions: Vec<f64>,
    pub output_path: PathBuf,
}

/// Runs the fixed survival recipe: load, audit, clean, encode, split, scale,
/// train, predict, score and persist.
///
/// Stages run strictly in that order and the first failure aborts the run
/// with a [`StageError`]. Nothing is written unless every earlier stage
/// succeeded.
pub struct SurvivalPipeline {
    config: PipelineConfig,
    diagnostics: SharedDiagnostics,
    classifier: Box<dyn Classifier>,
    // `None` builds an `IndependentEncoder` on the current diagnostics.
    encoder: Option<Box<dyn CategoricalEncoder>>,
    profiler: Box<dyn Profiler>,
    state: PipelineState,
}

impl SurvivalPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let classifier = SVC::new(Kernel::RBF, config.seed.unwrap_or(0));
        SurvivalPipeline {
            config,
            diagnostics: TracingDiagnostics::shared(),
            classifier: Box::new(classifier),
            encoder: None,
            profiler: Box::new(JsonProfiler),
            state: PipelineState::Initialized,
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: SharedDiagnostics) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_classifier(mut self, classifier: Box<dyn Classifier>) -> Self {
        self.classifier = classifier;
        self
    }

    /// Swap the categorical encoder, e.g. for one that shares codes between
    /// the train and test tables.
    pub fn with_encoder(mut self, encoder: Box<dyn CategoricalEncoder>) -> Self {
        self.encoder = Some(encoder);
        self
    }

    pub fn with_profiler(mut self, profiler: Box<dyn Profiler>) -> Self {
        self.profiler = profiler;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    fn info(&self, message: &str) {
        self.diagnostics.info("pipeline", message);
    }

    /// Execute every stage and write the predictions to the configured output path.
    /// The aborting error is also reported to the diagnostics sink.
    pub fn process(&mut self) -> Result<RunSummary, StageError> {
        self.run_stages().map_err(|err| {
            self.diagnostics
                .error("pipeline", &format!("{}: {}", err, err.source));
            err
        })
    }

    fn run_stages(&mut self) -> Result<RunSummary, StageError> {
        self.state = PipelineState::Initialized;

        let mut train = self.load("Train", &self.config.train_ds_path)?;
        let mut test = self.load("Test", &self.config.test_ds_path)?;
        self.state = PipelineState::Loaded;

        NullAuditor::new(self.diagnostics.clone()).audit(&[("train", &train), ("test", &test)]);
        self.save_profiler_reports(&train, &test);
        self.state = PipelineState::Audited;

        self.info("Start Train & Test Datasets Preprocess");
        self.preprocess_dataset(&mut train, &mut test)?;
        self.info("End Train & Test Datasets Preprocess");

        let sets = split(&train, &test, SURVIVED, PASSENGER_ID).at(Stage::Split)?;
        self.state = PipelineState::Split;
        self.diagnostics.debug(
            "pipeline",
            &format!(
                "Split into {} training rows over {:?} and {} test rows",
                sets.x_train.n_samples(),
                sets.x_train.names(),
                sets.x_test.n_samples()
            ),
        );

        let (x_train, x_test) = StandardScaler::new()
            .fit_transform_pair(&sets.x_train, &sets.x_test)
            .at(Stage::Scale)?;
        self.state = PipelineState::Scaled;

        self.info("Start SVM Model Predict");
        self.classifier
            .fit(x_train.values(), &sets.y_train)
            .at(Stage::Train)?;
        self.state = PipelineState::Trained;
        let predictions = self.classifier.predict(x_test.values()).at(Stage::Predict)?;
        self.state = PipelineState::Predicted;
        self.info("End SVM Model Predict");

        let training_accuracy = self
            .classifier
            .score(x_train.values(), &sets.y_train)
            .at(Stage::Score)?;
        self.info(&format!(
            "Accuracy SVM score: {}",
            (training_accuracy * 100.0 * 100.0).round() / 100.0
        ));
        let train_pred = self.classifier.predict(x_train.values()).at(Stage::Score)?;
        let cm = confusion_matrix(&sets.y_train, &train_pred, 2).at(Stage::Score)?;
        self.diagnostics
            .debug("pipeline", &format!("Training confusion matrix: {:?}", cm));

        let output_path = self.config.output_path.clone();
        self.persist(&test, &predictions, &output_path)?;
        self.info(&format!(
            "Successfully Persisted SVM Model Predictions: {}",
            output_path.display()
        ));

        Ok(RunSummary {
            training_accuracy,
            predictions,
            output_path,
        })
    }

    fn load(&self, label: &str, path: &Path) -> Result<Table, StageError> {
        self.info(&format!("Load {} Dataset: {}", label, path.display()));
        let table = DatasetLoader::new(path, self.diagnostics.clone())
            .load()
            .at(Stage::Load)?;
        self.info("Successful Load.");
        Ok(table)
    }

    /// Write one profiling report per dataset when a report directory is
    /// configured. A failed report is only a warning.
    fn save_profiler_reports(&self, train: &Table, test: &Table) {
        let dir = match &self.config.report_dir {
            Some(dir) => dir,
            None => return,
        };
        for (dataset, table) in [("train", train), ("test", test)] {
            let path = dir.join(format!("{}-report.json", dataset));
            let title = format!("Profiler {} Dataset", dataset);
            match self.profiler.save_report(table, &title, &path) {
                Ok(()) => self.info(&format!(
                    "Profiler Report Generated Successfully On: '{}'.",
                    path.display()
                )),
                Err(e) => self.diagnostics.warn(
                    "pipeline",
                    &format!("Profiler report for {} dataset failed: {}", dataset, e),
                ),
            }
        }
    }

    /// Clean and encode both tables in place.
    ///
    /// Afterwards `train` holds {Age, Embarked, Sex, Fare, Survived} plus any
    /// column outside the fixed recipe, and `test` the same with `PassengerId`
    /// in place of `Survived`.
    pub fn preprocess_dataset(&mut self, train: &mut Table, test: &mut Table) -> Result<(), StageError> {
        let dropper = ColumnDropper::new(self.diagnostics.clone());
        dropper
            .drop(train, &[PASSENGER_ID, NAME, TICKET, CABIN])
            .at(Stage::Clean)?;
        dropper.drop(test, &[NAME, TICKET, CABIN]).at(Stage::Clean)?;

        let mut imputer = Imputer::new(self.config.seed, self.diagnostics.clone());
        imputer.nan_inputer(&mut [&mut *train, &mut *test], AGE, 1).at(Stage::Clean)?;
        imputer
            .common_value_inputer(train, EMBARKED, Cell::from(DEFAULT_EMBARKED))
            .at(Stage::Clean)?;
        imputer.mean_inputer(test, FARE).at(Stage::Clean)?;
        self.state = PipelineState::Cleaned;

        let mut default_encoder;
        let encoder: &mut dyn CategoricalEncoder = match self.encoder.as_mut() {
            Some(encoder) => &mut **encoder,
            None => {
                default_encoder = IndependentEncoder::new(self.diagnostics.clone());
                &mut default_encoder
            }
        };
        encoder.fit_transform(train, &[SEX, EMBARKED]).at(Stage::Encode)?;
        encoder.fit_transform(test, &[SEX, EMBARKED]).at(Stage::Encode)?;
        self.state = PipelineState::Encoded;
        Ok(())
    }

    /// Write `PassengerId` from `test` next to `predictions`.
    pub fn persist(&mut self, test: &Table, predictions: &[f64], path: &Path) -> Result<(), StageError> {
        let ids = test.column(PASSENGER_ID).at(Stage::Persist)?;
        write_predictions(path, ids, SURVIVED, predictions, self.diagnostics.as_ref())
            .at(Stage::Persist)?;
        self.state = PipelineState::Persisted;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use titanic_svm_core::{Column, DataError, RecordingDiagnostics};

    fn pipeline() -> SurvivalPipeline {
        SurvivalPipeline::new(PipelineConfig::new("train.csv", "test.csv", "out.csv").with_seed(3))
            .with_diagnostics(RecordingDiagnostics::new())
    }

    #[test]
    fn test_new_pipeline_is_initialized() {
        let p = pipeline();
        assert_eq!(p.state(), PipelineState::Initialized);
        assert_eq!(p.config().seed, Some(3));
    }

    #[test]
    fn test_preprocess_missing_column_is_clean_stage() {
        let mut train = Table::new(vec![Column::from_numbers(AGE, &[1.0, 2.0])]).unwrap();
        let mut test = train.clone();
        let err = pipeline().preprocess_dataset(&mut train, &mut test).unwrap_err();
        assert_eq!(err.stage, Stage::Clean);
        assert!(matches!(err.source, DataError::ColumnNotFound(_)));
    }

    #[test]
    fn test_persist_without_ids_is_persist_stage() {
        let test = Table::new(vec![Column::from_numbers(AGE, &[1.0])]).unwrap();
        let err = pipeline()
            .persist(&test, &[1.0], Path::new("unused.csv"))
            .unwrap_err();
        assert_eq!(err.stage, Stage::Persist);
    }
}
