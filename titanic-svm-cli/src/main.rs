//! titanic-svm - runs the survival pipeline once from a configuration file.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use titanic_svm::pipeline::DEFAULT_CONFIG_PATH;
use titanic_svm::{PipelineConfig, SurvivalPipeline};

#[derive(Parser, Debug)]
#[command(name = "titanic-svm", version, about = "Predict Titanic passenger survival with a kernel SVC")]
struct Cli {
    /// JSON configuration with an `environment.model-arguments` section
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Labeled training dataset (overrides the configuration)
    #[arg(long)]
    train: Option<PathBuf>,

    /// Unlabeled test dataset (overrides the configuration)
    #[arg(long)]
    test: Option<PathBuf>,

    /// Predictions CSV to write (overrides the configuration)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for dataset profiling reports
    #[arg(long)]
    report_dir: Option<PathBuf>,

    /// Seed for the imputer draws and the classifier
    #[arg(long)]
    seed: Option<u64>,
}

fn resolve_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut config = match (&cli.train, &cli.test, &cli.output) {
        (Some(train), Some(test), Some(output)) if !cli.config.exists() => {
            PipelineConfig::new(train, test, output)
        }
        _ => PipelineConfig::from_file(&cli.config)
            .with_context(|| format!("loading configuration from '{}'", cli.config.display()))?,
    };

    if let Some(train) = &cli.train {
        config.train_ds_path = train.clone();
    }
    if let Some(test) = &cli.test {
        config.test_ds_path = test.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = output.clone();
    }
    if let Some(dir) = &cli.report_dir {
        config.report_dir = Some(dir.clone());
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    Ok(config)
}

/// One line: every message of the error chain, skipping causes already
/// contained in the message before them.
fn render_chain(err: &dyn Error) -> String {
    let mut line = err.to_string();
    let mut last = line.clone();
    let mut cause = err.source();
    while let Some(e) = cause {
        let msg = e.to_string();
        if !last.contains(&msg) {
            line.push_str(": ");
            line.push_str(&msg);
        }
        last = msg;
        cause = e.source();
    }
    line
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = resolve_config(cli)?;
    tracing::debug!(?config, "resolved configuration");

    let summary = SurvivalPipeline::new(config).process()?;
    tracing::info!(
        predictions = summary.predictions.len(),
        output = %summary.output_path.display(),
        "run complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "titanic_svm=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", render_chain(&*err));
            ExitCode::FAILURE
        }
    }
}
