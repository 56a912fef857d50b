use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quran_cards::{config::ViewerConfig, handlers, state::AppState};

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "quran_cards=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = ViewerConfig::load();
  tracing::info!(
    "Serving decks from {} ({} layout, {} mode, random step {})",
    config.data_dir.display(),
    config.layout,
    config.default_mode,
    config.random_step.as_str()
  );

  let bind_addr = config.bind_addr();
  let state = AppState::load(config);
  let app = handlers::router(state);

  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://{}", bind_addr);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
