//! Session credential handling.
//!
//! The character-window endpoints authenticate with the `POESESSID` cookie of
//! a logged-in browser session. No login flow exists here: the id is obtained
//! out of band and supplied through configuration.

/// # Session Authentication
///
/// Holds the pre-obtained session id and renders it as a request cookie.
///
/// ## Redaction
///
/// The session id grants full account access, so it is never printed:
/// [`SessionAuth::preview`] and the `Debug` impl expose only a short prefix.
#[derive(Clone)]
pub struct SessionAuth {
    session_id: String,
}

impl SessionAuth {
    pub fn new(session_id: String) -> Self {
        Self { session_id }
    }

    /// Value for the `Cookie` request header.
    pub fn cookie_header(&self) -> String {
        format!("POESESSID={}", self.session_id)
    }

    pub fn preview(&self) -> String {
        let visible: String = self.session_id.chars().take(4).collect();
        format!("{}...", visible)
    }
}

impl std::fmt::Debug for SessionAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionAuth")
            .field("session_id", &self.preview())
            .finish()
    }
}
