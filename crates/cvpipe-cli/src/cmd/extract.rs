//! Extract subcommand
//!
//! Backend selection happens once here; the pipeline only ever sees the
//! injected `CompletionBackend` trait object, never a backend name.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use cvpipe_core::SharedProgress;
use cvpipe_extract::{
    CompletionBackend, OllamaBackend, OpenAiBackend,
    backend::{DEFAULT_OLLAMA_MODEL, DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_MODEL},
};

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Directory containing `<row>.pdf` files
    pub input_dir: PathBuf,

    /// Output CSV path
    pub output_csv: PathBuf,

    /// Completion backend
    #[arg(short, long, value_enum, default_value = "hosted")]
    pub backend: Backend,

    /// Model name (default: llama3.2 local, gpt-4o-mini hosted)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Concurrent LLM call budget
    #[arg(short, long, default_value_t = 5)]
    pub workers: usize,
}

#[derive(Clone, ValueEnum, Debug)]
pub enum Backend {
    /// Local model server (Ollama)
    Local,
    /// Hosted API (OpenAI, requires OPENAI_API_KEY)
    Hosted,
}

pub fn run(args: ExtractArgs, progress: &SharedProgress) -> Result<()> {
    let backend = create_backend(&args)?;
    cvpipe_extract::run(
        &args.input_dir,
        &args.output_csv,
        backend.as_ref(),
        args.workers,
        progress,
    )
}

fn create_backend(args: &ExtractArgs) -> Result<Box<dyn CompletionBackend>> {
    match args.backend {
        Backend::Local => {
            let model = args.model.as_deref().unwrap_or(DEFAULT_OLLAMA_MODEL);
            Ok(Box::new(OllamaBackend::new(DEFAULT_OLLAMA_URL, model)))
        }
        Backend::Hosted => {
            let api_key = std::env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY environment variable required for --backend hosted")?;
            let model = args.model.as_deref().unwrap_or(DEFAULT_OPENAI_MODEL);
            Ok(Box::new(OpenAiBackend::new(api_key, model)))
        }
    }
}
