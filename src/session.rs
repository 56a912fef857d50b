//! In-memory viewer sessions.
//!
//! Each browser gets its own [`ViewerSession`] keyed by a session cookie.
//! Sessions auto-expire after a configurable duration of inactivity.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::config;
use crate::domain::Deck;
use crate::layout::{BackTab, Presentation};
use crate::navigator::{LoadTicket, Navigator, RandomStep, TraversalMode};

pub const SESSION_COOKIE_NAME: &str = "qc_session";

/// Navigation and presentation state for one viewer.
#[derive(Debug, Clone)]
pub struct ViewerSession {
  pub navigator: Navigator,
  pub presentation: Presentation,
  /// Deck file whose cards are currently shown
  pub deck_filename: Option<String>,
  /// Deck file of the most recent load still in flight
  pub pending_filename: Option<String>,
  /// Error banner text; cleared when a new load starts
  pub error: Option<String>,
}

impl ViewerSession {
  pub fn new(mode: TraversalMode, random_step: RandomStep) -> Self {
    Self {
      navigator: Navigator::new(mode, random_step),
      presentation: Presentation::default(),
      deck_filename: None,
      pending_filename: None,
      error: None,
    }
  }

  pub fn begin_load(&mut self, filename: &str) -> LoadTicket {
    self.error = None;
    self.pending_filename = Some(filename.to_string());
    self.navigator.begin_load()
  }

  /// Whether a deck has been shown or requested for this session.
  pub fn has_deck(&self) -> bool {
    self.deck_filename.is_some() || self.pending_filename.is_some()
  }

  /// Install a loaded deck, or an empty one with `error` shown in the banner.
  /// The filename follows the deck only when `ticket` is still current.
  pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Deck, String>) {
    let (deck, error) = match result {
      Ok(deck) => (deck, None),
      Err(message) => (Deck::default(), Some(message)),
    };
    if self.navigator.finish_load(ticket, deck) {
      self.deck_filename = self.pending_filename.take();
      self.error = error;
      self.presentation.reset();
    }
  }

  pub fn set_mode(&mut self, mode: TraversalMode) {
    self.navigator.set_mode(mode);
    self.presentation.reset();
  }

  pub fn first(&mut self) {
    self.navigator.first();
    self.presentation.reset();
  }

  pub fn last(&mut self) {
    self.navigator.last();
    self.presentation.reset();
  }

  pub fn next(&mut self) {
    self.navigator.next();
    self.presentation.reset();
  }

  pub fn previous(&mut self) {
    self.navigator.previous();
    self.presentation.reset();
  }

  pub fn flip(&mut self) {
    if !self.navigator.is_empty() {
      self.presentation.flip();
    }
  }

  pub fn select_tab(&mut self, tab: BackTab) {
    self.presentation.select_tab(tab);
  }

  /// Jump to a locator. On success the front face of the found card is
  /// shown; otherwise nothing changes.
  pub fn jump_to(&mut self, query: &str) -> bool {
    let found = self.navigator.jump_to(query);
    if found {
      self.presentation.reset();
    }
    found
  }
}

/// Session entry with last access time for expiration
#[derive(Debug)]
struct SessionEntry {
  session: ViewerSession,
  last_access: DateTime<Utc>,
}

/// Shared session store.
#[derive(Clone)]
pub struct SessionStore {
  sessions: Arc<Mutex<HashMap<String, SessionEntry>>>,
  expiry: Duration,
  mode: TraversalMode,
  random_step: RandomStep,
}

/// Error returned when the session store lock cannot be acquired
#[derive(Debug)]
pub struct SessionLockError;

impl std::fmt::Display for SessionLockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Session store unavailable")
  }
}

impl std::error::Error for SessionLockError {}

impl SessionStore {
  /// `expiry_hours` is clamped to `1..=MAX_SESSION_EXPIRY_HOURS`.
  pub fn new(expiry_hours: i64, mode: TraversalMode, random_step: RandomStep) -> Self {
    let hours = expiry_hours.clamp(1, config::MAX_SESSION_EXPIRY_HOURS);
    Self {
      sessions: Arc::new(Mutex::new(HashMap::new())),
      expiry: Duration::hours(hours),
      mode,
      random_step,
    }
  }

  fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, SessionEntry>>, SessionLockError> {
    self.sessions.lock().map_err(|_| {
      tracing::error!("Session store mutex poisoned");
      SessionLockError
    })
  }

  /// Run `f` against the session for `session_id`, creating it if needed.
  ///
  /// Returns whether the session was newly created alongside `f`'s result.
  /// The lock is held only for the duration of `f`, so `f` must not await.
  pub fn with_session<T>(
    &self,
    session_id: &str,
    f: impl FnOnce(&mut ViewerSession, bool) -> T,
  ) -> Result<T, SessionLockError> {
    let mut sessions = self.lock()?;

    // Clean up expired sessions occasionally (~10% chance)
    if rand::random::<u8>() < config::SESSION_CLEANUP_THRESHOLD {
      self.cleanup_expired(&mut sessions);
    }

    let created = !sessions.contains_key(session_id);
    if created {
      tracing::debug!("Creating viewer session");
    }

    let entry = sessions.entry(session_id.to_string()).or_insert_with(|| SessionEntry {
      session: ViewerSession::new(self.mode, self.random_step),
      last_access: Utc::now(),
    });
    entry.last_access = Utc::now();

    Ok(f(&mut entry.session, created))
  }

  /// Inactivity window after which a session is dropped
  pub fn expiry(&self) -> Duration {
    self.expiry
  }

  pub fn len(&self) -> usize {
    self.lock().map(|s| s.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  fn cleanup_expired(&self, sessions: &mut HashMap<String, SessionEntry>) {
    let Some(cutoff) = Utc::now().checked_sub_signed(self.expiry) else {
      return;
    };
    let before = sessions.len();
    sessions.retain(|_, entry| entry.last_access > cutoff);
    let removed = before - sessions.len();
    if removed > 0 {
      tracing::debug!("Expired {} viewer sessions", removed);
    }
  }
}

/// Generate a new session ID
pub fn generate_session_id() -> String {
  use rand::Rng;
  let mut rng = rand::rng();
  (0..32)
    .map(|_| {
      let idx = rng.random_range(0..36);
      if idx < 10 {
        (b'0' + idx) as char
      } else {
        (b'a' + idx - 10) as char
      }
    })
    .collect()
}
