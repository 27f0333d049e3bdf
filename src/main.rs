use fitlog::{app, state::AppState};
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "fitlog=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let state = AppState::init().await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&state.db).await {
        warn!(error = %e, "migration failed; continuing");
    }

    let mut changes = state.settings.subscribe();
    tokio::spawn(async move {
        loop {
            match changes.recv().await {
                Ok(ev) => info!(
                    user_id = %ev.user_id,
                    theme = ?ev.settings.theme,
                    "settings changed"
                ),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "settings listener lagged")
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let scans = state.scans.clone();
    tokio::spawn(async move {
        let mut every = tokio::time::interval(std::time::Duration::from_secs(600));
        loop {
            every.tick().await;
            let swept = scans.sweep_settled();
            if swept > 0 {
                debug!(swept, "settled scan slots cleared");
            }
        }
    });

    let server = state.config.server.clone();
    app::serve(app::build_app(state), &server.host, server.port).await
}
