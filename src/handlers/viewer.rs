//! Flashcard viewer page and navigation commands.
//!
//! Every command is a POST that mutates the caller's session and redirects
//! back to `/`.

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::filters;
use crate::layout::view::{MISSING_AYAH, MISSING_TEXT};
use crate::layout::{BackTab, CardFace, CardView, Layout};
use crate::logging::LogOnError;
use crate::navigator::TraversalMode;
use crate::session::ViewerSession;
use crate::state::AppState;

use super::{ensure_deck, load_into_session, session_error, session_id};

pub struct DeckOption {
  pub filename: String,
  pub label: String,
  pub selected: bool,
}

#[derive(Template)]
#[template(path = "viewer.html")]
pub struct ViewerTemplate {
  pub decks: Vec<DeckOption>,
  pub mode: &'static str,
  pub layout: &'static str,
  pub error_message: String,
  pub position_text: String,
  pub has_card: bool,
  pub show_back: bool,
  pub word_label: String,
  pub ayah_arabic: String,
  pub ayah_bangla: String,
  pub front_html: String,
  pub back_html: String,
}

impl ViewerTemplate {
  fn build(state: &AppState, session: &ViewerSession) -> Self {
    let layout: Layout = state.config.layout;
    let navigator = &session.navigator;

    let decks = state
      .deck_entries()
      .iter()
      .map(|e| DeckOption {
        filename: e.filename.clone(),
        label: e.label().to_string(),
        selected: session.deck_filename.as_deref() == Some(e.filename.as_str()),
      })
      .collect();

    let error_message = session
      .error
      .clone()
      .or_else(|| state.manifest_error.as_deref().map(String::from))
      .unwrap_or_default();

    let mut template = Self {
      decks,
      mode: navigator.mode().as_str(),
      layout: layout.as_str(),
      error_message,
      position_text: navigator.position_text(),
      has_card: false,
      show_back: false,
      word_label: MISSING_TEXT.to_string(),
      ayah_arabic: MISSING_AYAH.to_string(),
      ayah_bangla: MISSING_TEXT.to_string(),
      front_html: String::new(),
      back_html: String::new(),
    };

    if let Some(entry) = navigator.current() {
      let card = CardView::from_entry(&entry);
      let renderer = layout.renderer();
      template.has_card = true;
      template.show_back = session.presentation.face == CardFace::Back;
      template.front_html = renderer
        .render_front(&card)
        .log_warn_default("Failed to render card front");
      template.back_html = renderer
        .render_back(&card, session.presentation.tab)
        .log_warn_default("Failed to render card back");
      template.word_label = card.label;
      template.ayah_arabic = card.ayah_arabic;
      template.ayah_bangla = card.ayah_bangla;
    }

    template
  }
}

/// GET / - the viewer page
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Response {
  let (jar, id) = session_id(&state, jar);

  if let Err(e) = ensure_deck(&state, &id).await {
    return session_error(e);
  }

  match state
    .sessions
    .with_session(&id, |session, _| ViewerTemplate::build(&state, session))
  {
    Ok(template) => {
      let body = template.render().log_warn_default("Failed to render viewer");
      (jar, Html(body)).into_response()
    }
    Err(e) => session_error(e),
  }
}

/// Apply a command to the caller's session and redirect to the viewer.
fn apply(state: &AppState, jar: CookieJar, command: impl FnOnce(&mut ViewerSession)) -> Response {
  let (jar, id) = session_id(state, jar);
  match state.sessions.with_session(&id, |session, _| command(session)) {
    Ok(()) => (jar, Redirect::to("/")).into_response(),
    Err(e) => session_error(e),
  }
}

#[derive(Deserialize)]
pub struct DeckForm {
  pub filename: String,
}

/// POST /deck - switch to another deck from the manifest
pub async fn select_deck(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<DeckForm>,
) -> Response {
  let (jar, id) = session_id(&state, jar);

  if !state.manifest.contains(&form.filename) {
    tracing::warn!("Rejected deck not in manifest: {:?}", form.filename);
    return apply(&state, jar, |session| {
      session.error = Some("No such deck in manifest.json.".to_string());
    });
  }

  let ticket = match state
    .sessions
    .with_session(&id, |session, _| session.begin_load(&form.filename))
  {
    Ok(ticket) => ticket,
    Err(e) => return session_error(e),
  };

  if let Err(e) = load_into_session(&state, &id, ticket, &form.filename).await {
    return session_error(e);
  }
  (jar, Redirect::to("/")).into_response()
}

#[derive(Deserialize)]
pub struct ModeForm {
  pub mode: String,
}

/// POST /mode - switch between sequential and random traversal
pub async fn set_mode(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<ModeForm>,
) -> Response {
  match form.mode.parse::<TraversalMode>() {
    Ok(mode) => {
      tracing::debug!("Traversal mode set to {}", mode);
      apply(&state, jar, |session| session.set_mode(mode))
    }
    Err(e) => {
      tracing::debug!("{}", e);
      apply(&state, jar, |_| ())
    }
  }
}

/// POST /first
pub async fn first(State(state): State<AppState>, jar: CookieJar) -> Response {
  apply(&state, jar, ViewerSession::first)
}

/// POST /last
pub async fn last(State(state): State<AppState>, jar: CookieJar) -> Response {
  apply(&state, jar, ViewerSession::last)
}

/// POST /next
pub async fn next(State(state): State<AppState>, jar: CookieJar) -> Response {
  apply(&state, jar, ViewerSession::next)
}

/// POST /prev
pub async fn previous(State(state): State<AppState>, jar: CookieJar) -> Response {
  apply(&state, jar, ViewerSession::previous)
}

/// POST /flip
pub async fn flip(State(state): State<AppState>, jar: CookieJar) -> Response {
  apply(&state, jar, ViewerSession::flip)
}

#[derive(Deserialize)]
pub struct TabForm {
  pub tab: String,
}

/// POST /tab - select a back-face tab (tabbed layout)
pub async fn select_tab(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<TabForm>,
) -> Response {
  match form.tab.parse::<BackTab>() {
    Ok(tab) => apply(&state, jar, |session| session.select_tab(tab)),
    Err(_) => apply(&state, jar, |_| ()),
  }
}

#[derive(Deserialize)]
pub struct JumpForm {
  #[serde(default)]
  pub query: String,
}

/// POST /jump - go to `surah:ayah[:word]`; misses are silently ignored
pub async fn jump(
  State(state): State<AppState>,
  jar: CookieJar,
  Form(form): Form<JumpForm>,
) -> Response {
  apply(&state, jar, |session| {
    session.jump_to(&form.query);
  })
}
