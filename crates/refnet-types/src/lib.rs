//! Shared API Types for refnet
//!
//! This crate is the SINGLE SOURCE OF TRUTH for all types crossing the HTTP
//! boundary between the refnet client and the referral platform backend.
//!
//! ## Boundaries
//!
//! ```text
//! ┌──────────────────┐         ┌──────────────────┐
//! │  Platform API    │  JSON   │  refnet client   │
//! │  (remote)        │ ◄─────► │  (CLI / library) │
//! └──────────────────┘         └──────────────────┘
//! ```
//!
//! ## Rules
//!
//! 1. All API types live here - no inline struct definitions in the client
//! 2. Wire names are camelCase: `#[serde(rename_all = "camelCase")]`
//! 3. Every response type implements [`Validate`]; use [`decode`] to parse
//!    and validate in one step

pub mod auth;
pub mod decode;
pub mod network;
pub mod wallet;

use serde::{Deserialize, Serialize};

pub use auth::*;
pub use decode::{decode, DecodeError, Validate};
pub use network::*;
pub use wallet::*;

// ============================================================================
// ERROR BODIES
// ============================================================================

/// Error payload returned by the backend on non-2xx responses.
///
/// The backend is inconsistent about which key it uses, so both are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiErrorBody {
    /// Human-readable reason, preferring `message` over `error`
    pub fn reason(&self) -> Option<&str> {
        [self.message.as_deref(), self.error.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.trim().is_empty())
    }
}
