use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use quora_dup_features::{
    dataset::{read_path, write_feature_matrix_path, write_submission_path},
    workflow, MissingSimilarity, ModelBundle, PipelineConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "quora-dup-features",
    version,
    about = "Build duplicate-question features, train a classifier, and score pairs."
)]
struct Cli {
    /// TOML run configuration; flags below override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the assembled feature matrix of a pairs file as CSV
    Features {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Fit the classifier on a labeled pairs file and save the model
    Train {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        model: PathBuf,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Score a test file with a saved model and write the submission CSV
    Predict {
        #[arg(long)]
        test: PathBuf,
        #[arg(long)]
        model: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
    /// Train and predict in one go
    Run {
        #[arg(long)]
        train: PathBuf,
        #[arg(long)]
        test: PathBuf,
        #[arg(long)]
        output: PathBuf,
        /// also save the fitted model here
        #[arg(long)]
        model: Option<PathBuf>,
        #[command(flatten)]
        overrides: Overrides,
    },
}

#[derive(Args, Debug)]
struct Overrides {
    /// share of training rows scored before the final fit
    #[arg(long)]
    holdout: Option<f64>,
    /// number of boosting rounds
    #[arg(long)]
    rounds: Option<usize>,
    #[arg(long)]
    seed: Option<u64>,
    /// value written for an undefined cosine similarity
    #[arg(long, conflicts_with = "keep_missing")]
    impute_value: Option<f64>,
    /// leave undefined cosine similarities missing
    #[arg(long)]
    keep_missing: bool,
}

impl Overrides {
    fn apply(&self, config: &mut PipelineConfig) {
        if let Some(holdout) = self.holdout {
            config.holdout_fraction = holdout;
        }
        if let Some(rounds) = self.rounds {
            config.boosting.rounds = rounds;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(value) = self.impute_value {
            config.features.missing_similarity = MissingSimilarity::Impute { value };
        }
        if self.keep_missing {
            config.features.missing_similarity = MissingSimilarity::Keep;
        }
    }
}

fn load_config(path: Option<&PathBuf>, overrides: &Overrides) -> Result<PipelineConfig> {
    let mut config = match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn train(config: &PipelineConfig, train_path: &Path) -> Result<ModelBundle> {
    let dataset = read_path(train_path).with_context(|| format!("reading {}", train_path.display()))?;
    let (bundle, report) = workflow::train(config, &dataset).context("training failed")?;
    tracing::info!("trained on {} rows, {} stumps", report.rows, report.stumps);
    Ok(bundle)
}

fn predict(bundle: &ModelBundle, test_path: &Path, output: &Path) -> Result<()> {
    let dataset = read_path(test_path).with_context(|| format!("reading {}", test_path.display()))?;
    let predictions = workflow::predict(bundle, &dataset).context("prediction failed")?;
    write_submission_path(output, &predictions)
        .with_context(|| format!("writing {}", output.display()))?;
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quora_dup_features=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Features { input, output, overrides } => {
            let config = load_config(cli.config.as_ref(), overrides)?;
            let dataset = read_path(input).with_context(|| format!("reading {}", input.display()))?;
            let matrix = workflow::build_features(&config, &dataset).context("feature assembly failed")?;
            write_feature_matrix_path(output, &matrix)
                .with_context(|| format!("writing {}", output.display()))?;
        }
        Command::Train { train: train_path, model, overrides } => {
            let config = load_config(cli.config.as_ref(), overrides)?;
            let bundle = train(&config, train_path)?;
            bundle.save(model).with_context(|| format!("saving model {}", model.display()))?;
        }
        Command::Predict { test, model, output } => {
            let bundle = ModelBundle::load(model).with_context(|| format!("loading model {}", model.display()))?;
            predict(&bundle, test, output)?;
        }
        Command::Run { train: train_path, test, output, model, overrides } => {
            let config = load_config(cli.config.as_ref(), overrides)?;
            let bundle = train(&config, train_path)?;
            if let Some(model) = model {
                bundle.save(model).with_context(|| format!("saving model {}", model.display()))?;
            }
            predict(&bundle, test, output)?;
        }
    }
    Ok(())
}
