//! Session-related types.
//!
//! The whole per-visitor landing page state is one [`PageState`] value
//! stored under a single key.

use levure_core::PageState;
use tower_sessions::Session;

/// Session keys.
pub mod keys {
    /// Key for the visitor's page state (cart, carousel, overlays).
    pub const PAGE_STATE: &str = "page_state";
}

/// Load the visitor's page state.
///
/// A missing or unreadable entry yields a fresh state; the page should never
/// fail to render because of a stale session.
pub async fn load_page(session: &Session) -> PageState {
    match session.get::<PageState>(keys::PAGE_STATE).await {
        Ok(Some(page)) => page,
        Ok(None) => PageState::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Discarding unreadable page state");
            PageState::default()
        }
    }
}

/// Store the visitor's page state.
///
/// # Errors
///
/// Returns the session error if the store rejects the write.
pub async fn save_page(
    session: &Session,
    page: &PageState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::PAGE_STATE, page).await
}
