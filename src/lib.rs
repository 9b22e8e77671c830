//! refnet - client for the referral platform backend
//!
//! The backend computes everything of substance (authentication,
//! commissions, balances, downline traversal). This crate wires the pieces
//! that sit on the client side:
//!
//! - [`config`]: defaults, YAML file and `REFNET_*` environment overrides
//! - [`account`]: session lifecycle over a [`refnet_client::SessionStore`]
//! - [`dashboard`]: network, wallet and referral views built from API data
//!
//! API types live in `refnet-types`, the HTTP client in `refnet-client`, and
//! the downline tree builder in `refnet-graph`.

pub mod account;
pub mod config;
pub mod dashboard;

pub use account::{AccountError, AccountService};
pub use config::{ConfigError, RefnetConfig};
pub use dashboard::{fetch_network, fetch_wallet, referral_link, NetworkView, WalletView};
