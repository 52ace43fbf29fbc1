//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added in `main`)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (record in span, Sentry scope, and response header)
//! 4. Session lock (one request at a time per session cookie)
//! 5. Session layer (tower-sessions over an expiring `moka` store)
//! 6. CSP nonce (generate per-request nonce)
//! 7. Security headers (CSP, framing, client hints)

pub mod csp;
pub mod request_id;
pub mod security_headers;
pub mod session;
pub mod session_lock;
pub mod viewport;

pub use csp::{CspNonce, csp_nonce_middleware};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionRecords, create_session_layer};
pub use session_lock::{SessionLocks, session_lock_middleware};
pub use viewport::Viewport;
