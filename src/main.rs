//! CLI entry point for fmsh.

mod app;
mod build_info;
mod cli;

use app::repl_loop::{run_session, SessionOptions};
use app::startup::{init_logging, resolve_user_name};
use clap::Parser;
use fmsh::config::load_config;
use fmsh::tui::Renderer;

#[tokio::main]
async fn main() {
    let args = cli::Args::parse();
    let code = run(args).await;
    // The line editor may still be parked on a blocking stdin read; exiting
    // directly keeps runtime shutdown from waiting on it.
    std::process::exit(code);
}

async fn run(args: cli::Args) -> i32 {
    let loaded = match load_config(args.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            Renderer::new(!args.no_color).error(&format!("failed to load config: {e}"));
            return 1;
        }
    };
    let config = loaded.config;
    init_logging(&config.logging.filter);
    tracing::debug!(source = %loaded.source, "using configuration");

    let renderer = Renderer::new(config.display.color && !args.no_color);
    let user_name = resolve_user_name(args.username.as_deref(), |key| std::env::var(key).ok());
    let options = SessionOptions {
        user_name,
        renderer,
        show_banner: config.display.banner,
        history_path: config.history.active_path().cloned(),
    };

    match run_session(options).await {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!(error = %e, "session aborted");
            renderer.error(&format!("session aborted: {e}"));
            1
        }
    }
}
