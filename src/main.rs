use clap::Parser;
use paradash::{api::ApiClient, names, quiz::SessionStore, AppState};

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Base URL of the Paralympics REST API.
    #[arg(long, env, default_value = names::DEFAULT_API_BASE)]
    api_base: String,

    /// The address to bind to.
    #[arg(short, long, env, default_value = "127.0.0.1:1414")]
    address: String,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "tracing=info,tower_http=info,paradash=debug".to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(tracing_subscriber::fmt::format::FmtSpan::CLOSE)
        .init();

    let args = Args::parse();

    let api = ApiClient::new(&args.api_base)?;
    let state = AppState {
        api,
        sessions: SessionStore::new(),
    };

    let listener = tokio::net::TcpListener::bind(&args.address).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, paradash::router(state)).await?;

    Ok(())
}
