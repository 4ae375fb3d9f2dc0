use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedforge::cli;
use feedforge::config::Config;
use feedforge::csv_io;
use feedforge::images;
use feedforge::llm::OpenAiClient;
use feedforge::pdf::PdfExporter;
use feedforge::records::{Platform, RecordSet};
use feedforge::render;

#[derive(Parser)]
#[command(name = "feedforge", about = "Generate fake social-media feeds as HTML + PDF")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Re-render a previously exported CSV without calling the model.
    Render {
        /// Platform whose record shape the CSV uses (prompted when omitted).
        #[arg(long, value_enum)]
        platform: Option<Platform>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    init_tracing()?;

    let args = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    match args.command {
        Some(Command::Render { platform }) => render_from_csv(&config, platform).await,
        None => generate(&mut config).await,
    }
}

/// Full generation flow: prompt -> LLM -> CSV -> HTML -> PDF.
async fn generate(config: &mut Config) -> Result<()> {
    if config.openai_api_key.is_none() {
        let key = cli::prompt_value(
            "OPENAI_API_KEY not found. Please enter your OpenAI API key \
             (you can also set it as an environment variable).",
        )?;
        config.openai_api_key = Some(key);
    }
    if config.country.is_none() {
        let country = cli::prompt_value(
            "Please enter the country of origin for your simulated posts \
             (you can also set it as an environment variable).",
        )?;
        config.country = Some(country);
    }

    let user_prompt = read_user_prompt(config)?;
    println!("Prompt successfully loaded.");

    println!("\nSocial media generator activated.");
    let platform = cli::prompt_platform()?;

    let system_prompt = read_system_prompt(config, platform)?;

    let client = OpenAiClient::new(config).context("Failed to build OpenAI client")?;

    info!(platform = ?platform, model = %config.model_name, "Requesting generated records");
    let mut records = client
        .generate_records(platform, &system_prompt, &user_prompt)
        .await
        .context("Structured generation failed")?;

    if records.is_empty() {
        bail!("Model returned an empty record set");
    }
    records.derive_columns(&config.pictures_dir);

    let filename = cli::prompt_filename()?;

    tokio::fs::create_dir_all(&config.output_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output_dir.display()
            )
        })?;

    // The CSV goes out before rendering so a human can hand-edit it and
    // re-render later via the render subcommand.
    let csv_path = config.output_dir.join(format!("{filename}.csv"));
    csv_io::write_records(&csv_path, &records).context("Failed to write CSV export")?;
    info!(path = %csv_path.display(), rows = records.len(), "CSV export written");

    if let RecordSet::Instagram(posts) = &records {
        images::synthesize(&client, posts, &config.output_dir).await?;
    }

    let html_path = config.output_dir.join(format!("{filename}.html"));
    let html = render::render_record_set(&records)?;
    tokio::fs::write(&html_path, &html)
        .await
        .with_context(|| format!("Failed to write HTML to {}", html_path.display()))?;

    let exporter = PdfExporter::new(config.chrome_path.clone(), config.pdf_timeout);
    exporter.export(&html_path).await?;

    println!("{}", platform.completion_message());
    Ok(())
}

/// Standalone render mode: reload a CSV and regenerate HTML + PDF next to it.
async fn render_from_csv(config: &Config, platform: Option<Platform>) -> Result<()> {
    let platform = match platform {
        Some(p) => p,
        None => cli::prompt_platform()?,
    };
    let input = cli::prompt_csv_path()?;

    let Some(csv_path) = cli::resolve_csv_path(&input, &config.output_dir) else {
        println!("File not found. Please check the path and try again.");
        return Ok(());
    };

    // One catch-all message, no error-kind classification.
    match render_csv_file(config, platform, &csv_path).await {
        Ok(()) => println!("{}", platform.completion_message()),
        Err(e) => println!("Failed to generate {}: {e:#}", platform.label()),
    }
    Ok(())
}

async fn render_csv_file(
    config: &Config,
    platform: Platform,
    csv_path: &std::path::Path,
) -> Result<()> {
    let records = csv_io::read_records(csv_path, platform)?;
    let html_path = csv_path.with_extension("html");
    let html = render::render_record_set(&records)?;
    tokio::fs::write(&html_path, &html)
        .await
        .with_context(|| format!("Failed to write HTML to {}", html_path.display()))?;

    let exporter = PdfExporter::new(config.chrome_path.clone(), config.pdf_timeout);
    exporter.export(&html_path).await?;
    Ok(())
}

fn read_user_prompt(config: &Config) -> Result<String> {
    let path = &config.user_prompt_path;
    let Ok(raw) = std::fs::read_to_string(path) else {
        bail!(
            "{} not found in the current directory. Please create it and try again.",
            path.display()
        );
    };
    let prompt = raw.trim().to_string();
    if prompt.is_empty() {
        bail!(
            "No user input detected. Please add a prompt to {} and try again.",
            path.display()
        );
    }
    Ok(prompt)
}

fn read_system_prompt(config: &Config, platform: Platform) -> Result<String> {
    let path = config.prompts_dir.join(platform.prompt_file());
    let template = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read system prompt template: {}", path.display()))?;

    let country = config.country.as_deref().unwrap_or_default();
    Ok(template.replace("{country}", country))
}

fn init_tracing() -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,feedforge=debug"));

    // Check if JSON logging is requested
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| matches!(v.to_lowercase().as_str(), "json" | "structured"))
        .unwrap_or(false);

    if use_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;
    }

    Ok(())
}
