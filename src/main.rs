use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use reel::core::config::{self, ResolvedConfig};
use reel::core::driver;
use reel::core::state::App;
use reel::query::{HttpQueryBackend, QueryBackend};
use reel::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "reel", about = "Chat with a movie knowledge base")]
struct Args {
    /// Base URL of the query endpoint (e.g. http://localhost:5000)
    #[arg(short, long)]
    endpoint: Option<String>,

    /// Ask a single question, print the reply and exit (no TUI)
    #[arg(short, long)]
    ask: Option<String>,

    /// Log level written to reel.log (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

fn build_backend(config: &ResolvedConfig) -> Arc<dyn QueryBackend> {
    Arc::new(HttpQueryBackend::new(
        Some(config.base_url.clone()),
        Some(config.query_path.clone()),
    ))
}

#[tokio::main]
async fn main() -> std::io::Result<ExitCode> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to reel.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let level = args
        .log_level
        .parse::<LevelFilter>()
        .unwrap_or(LevelFilter::Debug);

    if let Ok(log_file) = File::create("reel.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("{e}; using defaults");
        eprintln!("reel: {e}; using defaults");
        config::ReelConfig::default()
    });
    let resolved = config::resolve(&file_config, args.endpoint.as_deref());
    log::info!(
        "reel starting up with endpoint: {}{}",
        resolved.base_url,
        resolved.query_path
    );

    let backend = build_backend(&resolved);

    if let Some(question) = args.ask {
        let mut app = App::from_config(backend, &resolved);
        let Some(reply) = driver::ask(&mut app, &question).await else {
            eprintln!("reel: nothing to ask");
            return Ok(ExitCode::FAILURE);
        };
        println!("{}", reply.text());

        if app.last_query_failed() {
            if let Some(err) = &app.last_error {
                eprintln!("reel: {err}");
            }
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    tui::run(backend, resolved)?;
    Ok(ExitCode::SUCCESS)
}
