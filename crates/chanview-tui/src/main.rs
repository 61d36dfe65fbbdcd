mod action;
mod app;
mod browser;
mod component;
mod components;
mod desktop;
mod focus;
mod screen;
mod theme;
mod ticket;
mod widgets;

use clap::Parser;

use chanview_proto::client::ChannelClient;
use chanview_proto::config::Config;

/// Browse and search live stream channels, and hand them to a player.
#[derive(Debug, Parser)]
#[command(name = "chanview", version, about)]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:40006
    #[arg(long, value_name = "URL")]
    backend: Option<String>,
    /// Page to open on startup
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
    /// URI scheme the external player registers (vlc → vlc://<url>)
    #[arg(long, value_name = "SCHEME")]
    player_scheme: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = chanview_proto::platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;
    let log_path = data_dir.join("chanview.log");

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so the operator can tail it immediately.
    eprintln!("chanview log: {}", log_path.display());

    tracing::info!("chanview starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let mut config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable, using defaults: {}", e);
        Config::default()
    });
    if let Some(base_url) = cli.backend {
        config.backend.base_url = base_url;
    }
    if let Some(scheme) = cli.player_scheme {
        config.player.scheme = scheme;
    }
    tracing::info!(
        "backend {} (sort_by={:?}, group_by={:?}), player scheme {}",
        config.backend.base_url,
        config.backend.sort_by,
        config.backend.group_by,
        config.player.scheme
    );

    let client = ChannelClient::new(&config.backend)?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(
        client,
        desktop::SystemDesktop::new(),
        config.backend.base_url.clone(),
        config.player.scheme.clone(),
        cli.page,
    );
    app.run().await?;

    tracing::info!("chanview exiting");
    Ok(())
}
