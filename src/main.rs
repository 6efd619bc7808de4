use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use runlog::batch::extract_file;
use runlog::{format_activity, ActivityExtractor, ExtractionConfig, RecognitionMode, ResolvedActivity};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Extract distance, duration and pace from workout text and print them as JSON",
    long_about = None
)]
struct Cli {
    /// Treat the text as OCR output of an app screenshot
    #[arg(long, action = ArgAction::SetTrue)]
    image: bool,

    /// Read one observation per blank-line separated block from PATH
    #[arg(long, value_name = "PATH", value_hint = ValueHint::FilePath, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Workout text; stdin is read when neither TEXT nor --file is given
    text: Vec<String>,
}

impl Cli {
    fn mode(&self) -> RecognitionMode {
        if self.image {
            RecognitionMode::ImageRecognition
        } else {
            RecognitionMode::PlainText
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    activity: &'a ResolvedActivity,
    display: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load environment variables from .env file before reading RUST_LOG
    dotenv::dotenv().ok();
    init_tracing();

    let config = ExtractionConfig::from_env().context("Invalid extraction configuration")?;
    let extractor = ActivityExtractor::with_config(config)?;
    let mode = cli.mode();

    let activities = if let Some(ref path) = cli.file {
        extract_file(&extractor, path, mode)
            .with_context(|| format!("Failed to extract observations from {}", path.display()))?
    } else {
        let text = if cli.text.is_empty() {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            buffer
        } else {
            cli.text.join(" ")
        };
        vec![extractor.extract(&text, mode)]
    };

    info!(count = activities.len(), mode = %mode, "Extraction finished");

    let reports: Vec<Report<'_>> = activities
        .iter()
        .map(|activity| Report {
            activity,
            display: format_activity(activity).to_string(),
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&reports)?);

    Ok(())
}

/// Install the tracing subscriber; `RUNLOG_LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("RUNLOG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
