//! Library Desk - terminal client for the library catalog service

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use library_desk::{
    api::HttpCatalogApi,
    cli::{self, Command},
    config::AppConfig,
    Desk,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_desk={}", config.logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting Library Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Catalog service at {}", config.server.base_url);

    let api = HttpCatalogApi::new(&config.server)?;
    let mut desk = Desk::new(Arc::new(api), &config.notifications);

    let mut stdout = tokio::io::stdout();
    let mut out = String::new();

    // A failed first load is shown like any other; the desk stays usable
    if desk.refresh().await.is_ok() {
        cli::render_catalog(&desk, &mut out);
    }
    cli::render_status(&desk, &mut out);
    stdout.write_all(out.as_bytes()).await?;
    stdout.flush().await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        out.clear();

        let keep_going = match Command::parse(&line) {
            Ok(command) => cli::execute(&mut desk, command, &mut out).await,
            Err(message) => {
                out.push_str(&message);
                out.push('\n');
                true
            }
        };
        if !keep_going {
            break;
        }

        cli::render_status(&desk, &mut out);
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    tracing::info!("Library Desk stopped");
    Ok(())
}
