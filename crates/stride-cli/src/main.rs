use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod app;
mod commands;
mod web;

#[derive(Parser)]
#[command(name = "stride")]
#[command(about = "Stride - AI running coach in your terminal")]
#[command(version)]
struct Cli {
    /// Chat model to use
    #[arg(short, long)]
    model: Option<String>,

    /// Path to the conversation history file
    #[arg(long)]
    history: Option<PathBuf>,

    /// Path to the run-feedback prompt template
    #[arg(long)]
    template: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Serve the single-form web page (no chat integration)
    Serve {
        /// Port for the web server
        #[arg(long, default_value_t = 7860)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present, for GOOGLE_API_KEY and friends.
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let mut settings = stride_core::Settings::load();

    if let Some(model) = cli.model {
        settings.llm.model = model;
    }
    if let Some(history) = cli.history {
        settings.paths.history_file = history;
    }
    if let Some(template) = cli.template {
        settings.paths.template_file = template;
    }

    match cli.command {
        Some(Commands::Serve { port }) => web::serve(port).await,
        None => app::run_chat(&settings).await,
    }
}
