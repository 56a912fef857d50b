//! JSON view of the current card for external renderers.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use crate::layout::{BackTab, CardFace, CardView};
use crate::navigator::{RandomStep, TraversalMode};
use crate::session::ViewerSession;
use crate::state::AppState;

use super::{ensure_deck, session_error, session_id};

#[derive(Debug, Serialize)]
pub struct CardSnapshot {
  pub deck: Option<String>,
  pub mode: TraversalMode,
  pub random_step: RandomStep,
  /// 0-based position in the traversal order
  pub position: usize,
  pub total: usize,
  pub position_text: String,
  pub face: CardFace,
  pub tab: BackTab,
  pub card: Option<CardView>,
  pub error: Option<String>,
}

impl CardSnapshot {
  pub fn from_session(session: &ViewerSession) -> Self {
    let navigator = &session.navigator;
    Self {
      deck: session.deck_filename.clone(),
      mode: navigator.mode(),
      random_step: navigator.random_step(),
      position: navigator.position(),
      total: navigator.len(),
      position_text: navigator.position_text(),
      face: session.presentation.face,
      tab: session.presentation.tab,
      card: navigator.current().map(|entry| CardView::from_entry(&entry)),
      error: session.error.clone(),
    }
  }
}

/// GET /api/card
pub async fn current_card(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, id) = session_id(&state, jar);

  if let Err(e) = ensure_deck(&state, &id).await {
    return session_error(e);
  }

  match state
    .sessions
    .with_session(&id, |session, _| CardSnapshot::from_session(session))
  {
    Ok(snapshot) => (jar, Json(snapshot)).into_response(),
    Err(e) => session_error(e),
  }
}
