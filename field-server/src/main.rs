use field_server::app_state::{sales_region_seed, AppState};
use field_server::build_app;
use field_server::config::{find_env_file, Config};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn load_env_file() {
    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(error = %e, "field-server: no working directory, skipping .env");
            return;
        }
    };

    let Some(path) = find_env_file(&cwd) else {
        tracing::debug!(cwd = %cwd.display(), "field-server: no .env, using process environment");
        return;
    };

    match dotenvy::from_path(&path) {
        Ok(()) => tracing::info!(path = %path.display(), "field-server: loaded .env"),
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "field-server: bad .env ignored"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "field_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    load_env_file();

    let config = Config::from_env()?;
    tracing::info!(
        port = config.port,
        client_url = %config.client_url,
        save_delay_ms = config.save_delay.as_millis() as u64,
        "Starting field builder mock server"
    );

    let state = AppState::new(sales_region_seed(), config.save_delay);
    let app = build_app(&config, state)?;

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Server running on http://{addr}");
    axum::serve(listener, app).await?;
    Ok(())
}
