//! Viewport width client hint.
//!
//! The landing page switches a few layouts below 768 px. The width arrives
//! as the `Sec-CH-Viewport-Width` client hint (or the legacy `Viewport-Width`)
//! once the browser has seen our `Accept-CH` header. Missing or garbled hints
//! mean "wide".

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};

/// Widths below this are treated as narrow.
pub const NARROW_VIEWPORT_PX: u32 = 768;

/// Value for `Accept-CH` and `Vary`.
pub const CLIENT_HINT_HEADERS: &str = "Sec-CH-Viewport-Width, Viewport-Width";

const HINT_NAMES: [&str; 2] = ["sec-ch-viewport-width", "viewport-width"];

/// Viewport width reported by the client, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width_px: Option<u32>,
}

impl Viewport {
    /// Read the first parsable hint.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let width_px = HINT_NAMES.iter().find_map(|name| {
            headers
                .get(*name)
                .and_then(|value| value.to_str().ok())
                .and_then(parse_width)
        });
        Self { width_px }
    }

    /// Whether the page should use its narrow layout.
    #[must_use]
    pub fn is_narrow(self) -> bool {
        self.width_px.is_some_and(|w| w < NARROW_VIEWPORT_PX)
    }
}

/// Hints are CSS pixels and may carry a fractional part.
fn parse_width(raw: &str) -> Option<u32> {
    let whole = raw.trim().split('.').next()?;
    whole.parse().ok()
}

impl<S> FromRequestParts<S> for Viewport
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}
