pub mod api;
pub mod viewer;

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::{get, post},
  Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::content;
use crate::navigator::LoadTicket;
use crate::paths;
use crate::session::{SessionLockError, SESSION_COOKIE_NAME, generate_session_id};
use crate::state::AppState;

pub use api::current_card;
pub use viewer::{
  first, flip, index, jump, last, next, previous, select_deck, select_tab, set_mode,
};

/// Build the application router.
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(index))
    .route("/deck", post(select_deck))
    .route("/mode", post(set_mode))
    .route("/first", post(first))
    .route("/prev", post(previous))
    .route("/next", post(next))
    .route("/last", post(last))
    .route("/flip", post(flip))
    .route("/tab", post(select_tab))
    .route("/jump", post(jump))
    .route("/api/card", get(current_card))
    .nest_service("/static", ServeDir::new(paths::STATIC_DIR))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// Session id from the cookie jar, issuing a fresh cookie if there is none.
pub(crate) fn session_id(state: &AppState, jar: CookieJar) -> (CookieJar, String) {
  if let Some(id) = jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string()) {
    if !id.is_empty() {
      return (jar, id);
    }
  }

  let id = generate_session_id();
  let cookie = Cookie::build((SESSION_COOKIE_NAME, id.clone()))
    .path("/")
    .http_only(true)
    .secure(false) // Set to true in production with HTTPS
    .max_age(time::Duration::seconds(state.sessions.expiry().num_seconds()))
    .build();
  (jar.add(cookie), id)
}

pub(crate) fn session_error(e: SessionLockError) -> Response {
  (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
}

/// Make sure the session has a deck, loading the manifest default if it has
/// never requested one.
pub(crate) async fn ensure_deck(state: &AppState, session_id: &str) -> Result<(), SessionLockError> {
  let pending = state.sessions.with_session(session_id, |session, _| {
    if session.has_deck() {
      return None;
    }
    let filename = state.manifest.default_filename()?.to_string();
    Some((session.begin_load(&filename), filename))
  })?;

  if let Some((ticket, filename)) = pending {
    load_into_session(state, session_id, ticket, &filename).await?;
  }
  Ok(())
}

/// Fetch a deck file and hand it to the session under `ticket`.
///
/// The session lock is not held while the file is read; a newer load that
/// completes first wins and this result is dropped.
pub(crate) async fn load_into_session(
  state: &AppState,
  session_id: &str,
  ticket: LoadTicket,
  filename: &str,
) -> Result<(), SessionLockError> {
  let result = content::load_deck(&state.config.data_dir, filename)
    .await
    .map_err(|e| {
      tracing::warn!("Failed to load deck {}: {}", filename, e);
      content::load_failure_message(filename, &e)
    });

  state
    .sessions
    .with_session(session_id, |session, _| session.finish_load(ticket, result))
}
