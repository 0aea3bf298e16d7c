// src/main.rs

use std::process::ExitCode;

use dotenvy::dotenv;
use frontend::config::Config;
use frontend::routes::{self, Page, Rendered};
use frontend::state::AppState;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(2);
        }
    };

    let file_appender = tracing_appender::rolling::daily("logs", "frontend.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let console_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    let state = AppState::with_file_session(config);

    let target = std::env::args().nth(1).unwrap_or_else(|| "/".to_string());
    let page = Page::from_url(&target);
    tracing::info!("Rendering {} as {:?}", target, page);

    // Returning (rather than exiting) lets `_guard` flush the file log
    match routes::render(&state, &page).await {
        Ok(Rendered::Html(html)) => {
            println!("{}", html);
            ExitCode::SUCCESS
        }
        Ok(Rendered::Redirect(navigation)) => {
            println!("Redirect: {}", navigation.path());
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Failed to render {}: {}", target, e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
