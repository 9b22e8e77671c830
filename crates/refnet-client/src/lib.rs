//! RefnetClient trait: the sole API boundary between refnet and the platform backend.
//! Callers depend on this trait, never on reqwest directly.

pub mod error;
pub mod http;
pub mod session;

use async_trait::async_trait;
use refnet_types::{
    AuthResponse, AuthUser, LoginRequest, NetworkStats, RegisterRequest, Transaction, Wallet,
    WithdrawRequest,
};

pub use error::ClientError;
pub use http::{ClientSettings, HttpClient};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore, SessionStoreError};

pub type Result<T> = std::result::Result<T, ClientError>;

#[async_trait]
pub trait RefnetClient: Send + Sync {
    async fn login(&self, req: LoginRequest) -> Result<AuthResponse>;

    /// Create an account, optionally under a sponsor's referral code.
    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse>;

    /// Invalidate the session's token on the backend.
    async fn logout(&self, session: &Session) -> Result<()>;

    async fn profile(&self, session: &Session) -> Result<AuthUser>;

    async fn wallet(&self, session: &Session) -> Result<Wallet>;

    /// Wallet history, newest first as ordered by the backend.
    async fn transactions(&self, session: &Session) -> Result<Vec<Transaction>>;

    /// Request a payout. The amount is checked locally before sending.
    async fn withdraw(&self, session: &Session, req: WithdrawRequest) -> Result<Transaction>;

    /// Per-level downline membership for the session's user.
    async fn network_stats(&self, session: &Session) -> Result<NetworkStats>;
}
