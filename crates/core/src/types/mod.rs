//! Core types for Levure.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod accent;
pub mod id;
pub mod price;

pub use accent::{Accent, AccentStyle};
pub use id::*;
pub use price::{CurrencyCode, Price, PriceParseError};
