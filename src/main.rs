use anyhow::Result;
use dotenvy::dotenv;
use rand::rngs::StdRng;
use rand::SeedableRng;

use outline_quiz::cli::{Cli, Commands};
use outline_quiz::core::logging::log_file_from;
use outline_quiz::core::{init_logger, Config};
use outline_quiz::quiz::QuizService;
use outline_quiz::telegram::{create_bot, format_question, run_server, WebhookState};

/// Main entry point for the quiz bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, configuration, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    // The logger is up before Config loads, so configuration errors are logged too.
    let log_file = std::env::var("LOG_FILE_PATH").ok();
    init_logger(log_file_from(log_file.as_deref()))?;

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        e
    })?;
    config.log_summary();

    match cli.command {
        Some(Commands::Serve { port }) => run_serve(config, port).await,
        Some(Commands::Preview { document }) => run_preview(config, document).await,
        None => {
            log::info!("No command specified, serving webhook");
            run_serve(config, None).await
        }
    }
}

async fn run_serve(config: Config, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port);
    let bot = create_bot(&config)?;
    let quiz = QuizService::from_config(&config)?;

    if config.uses_local_bot_api() {
        log::info!("Delivering through a local Bot API server");
    }

    run_server(port, WebhookState::new(quiz, bot, config.failure_notice)).await
}

async fn run_preview(config: Config, document: Option<String>) -> Result<()> {
    let quiz = QuizService::from_config(&config)?;
    let mut rng = StdRng::from_entropy();

    let question = match document {
        Some(id) => quiz.question_from_document(&id, &mut rng).await?,
        None => quiz.next_question(&mut rng).await?,
    };

    println!("{}", format_question(&question));
    Ok(())
}
