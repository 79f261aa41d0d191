mod label;
mod render;

use std::path::{Path, PathBuf};

use anyhow::Context;
use catscore_core::{AppConfig, ReferenceTargets};
use catscore_engine::Evaluator;
use catscore_extract::{ExtractionClient, ExtractionRequest, LabelExtractor};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::label::{load_label, read_text_arg, resolve_name};
use crate::render::{render, OutputFormat};

#[derive(Debug, Parser)]
#[command(name = "catscore")]
#[command(about = "Score cat-food labels on a dry-matter basis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluate a pre-extracted label document (JSON)
    Evaluate {
        /// Path to the label document
        #[arg(long)]
        input: PathBuf,

        /// Product name, overriding the one in the document
        #[arg(long)]
        name: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Send raw label text to the extraction service, then evaluate it
    Extract {
        /// Product name
        #[arg(long)]
        name: String,

        /// Guaranteed-analysis text, or `@path` to read it from a file
        #[arg(long)]
        analysis: String,

        /// Ingredient list text, or `@path` to read it from a file
        #[arg(long)]
        ingredients: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the effective reference targets as YAML
    Targets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse first so `--help` and usage errors never depend on the environment.
    let cli = Cli::parse();
    let config = catscore_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let targets = load_reference_targets(config.targets_path.as_deref())?;
    let evaluator = Evaluator::new(targets).context("invalid reference targets")?;

    match cli.command {
        Commands::Evaluate {
            input,
            name,
            format,
        } => run_evaluate(&evaluator, &input, name.as_deref(), format),
        Commands::Extract {
            name,
            analysis,
            ingredients,
            format,
        } => run_extract(&evaluator, &config, name, &analysis, &ingredients, format).await,
        Commands::Targets => {
            print!("{}", serde_yaml::to_string(evaluator.targets())?);
            Ok(())
        }
    }
}

fn load_reference_targets(path: Option<&Path>) -> anyhow::Result<ReferenceTargets> {
    match path {
        Some(path) => {
            let targets = catscore_core::load_targets(path)
                .with_context(|| format!("loading reference targets from {}", path.display()))?;
            tracing::info!(path = %path.display(), "loaded reference targets");
            Ok(targets)
        }
        None => Ok(ReferenceTargets::default()),
    }
}

fn run_evaluate(
    evaluator: &Evaluator,
    input: &Path,
    name: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let label = load_label(input)?;
    let name = resolve_name(name, label.name.as_deref(), input);
    let result = evaluator
        .evaluate(&name, &label.nutrients, &label.ingredients, &label.summary)
        .with_context(|| format!("evaluating '{name}'"))?;
    println!("{}", render(&result, format)?);
    Ok(())
}

async fn run_extract(
    evaluator: &Evaluator,
    config: &AppConfig,
    name: String,
    analysis: &str,
    ingredients: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let base_url = config
        .require_extractor_url()
        .context("the extract command needs an extraction service")?;
    let client = ExtractionClient::new(
        base_url,
        config.extractor_api_key.as_deref(),
        config.extractor_timeout_secs,
    )?
    .with_retry(
        config.extractor_max_retries,
        config.extractor_backoff_base_ms,
    );

    let request = ExtractionRequest::new(
        name,
        read_text_arg(analysis)?,
        read_text_arg(ingredients)?,
    );
    let label = client
        .extract(&request)
        .await
        .with_context(|| format!("extracting label for '{}'", request.product_name))?;

    let result = evaluator
        .evaluate(
            &request.product_name,
            &label.nutrients,
            &label.ingredients,
            &label.summary,
        )
        .with_context(|| format!("evaluating '{}'", request.product_name))?;
    println!("{}", render(&result, format)?);
    Ok(())
}
