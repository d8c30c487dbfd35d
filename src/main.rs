use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use clap::Parser;
use quizgen::{
    create_provider, load_questions_from_json, Difficulty, ProviderConfig, Quiz, QuizError,
};
use quizgen::provider::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// API key for the question generation service
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model used to generate questions
    #[arg(long, env = "QUIZGEN_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Base URL of the generation API
    #[arg(long, env = "QUIZGEN_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// JSON file to load the questions from instead of generating them
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Subject to pre-fill on the setup screen
    #[arg(short, long)]
    subject: Option<String>,

    /// Difficulty to pre-select (easy, medium, hard)
    #[arg(short, long, default_value = "medium")]
    difficulty: Difficulty,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

async fn run(args: Args) -> Result<(), QuizError> {
    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    if let Some(path) = &args.questions {
        load_questions_from_json(path)?;
    }

    let config = ProviderConfig {
        api_key: args.api_key,
        model: args.model,
        base_url: args.base_url,
        timeout_secs: args.timeout_secs,
        questions_file: args.questions,
    };
    tracing::debug!(?config, "resolved configuration");

    let subject = args.subject.unwrap_or_default();
    Quiz::new(create_provider(&config))
        .with_subject(&subject, args.difficulty)
        .run()
        .await
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(e) = run(args).await {
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}
