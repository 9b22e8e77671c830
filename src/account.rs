//! Account and session lifecycle
//!
//! `AccountService` owns the link between a [`RefnetClient`] and a
//! [`SessionStore`]: login and registration create and persist a session,
//! logout clears it, and any call the backend rejects as unauthorized drops
//! the stored session so the next command asks for a fresh login.

use std::future::Future;

use refnet_client::{ClientError, RefnetClient, Session, SessionStore, SessionStoreError};
use refnet_types::{LoginRequest, RegisterRequest};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("not logged in; run `refnet login` first")]
    NotLoggedIn,

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Store(#[from] SessionStoreError),
}

impl AccountError {
    pub fn is_auth_failure(&self) -> bool {
        match self {
            AccountError::NotLoggedIn => true,
            AccountError::Client(e) => e.is_auth_failure(),
            AccountError::Store(_) => false,
        }
    }
}

pub struct AccountService<C, S> {
    client: C,
    store: S,
}

impl<C, S> AccountService<C, S>
where
    C: RefnetClient,
    S: SessionStore,
{
    pub fn new(client: C, store: S) -> Self {
        Self { client, store }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AccountError> {
        let resp = self
            .client
            .login(LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        self.start(Session::from(resp))
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<Session, AccountError> {
        let resp = self.client.register(req).await?;
        self.start(Session::from(resp))
    }

    fn start(&self, session: Session) -> Result<Session, AccountError> {
        self.store.save(&session)?;
        tracing::info!(
            user = %session.user.email,
            referral_code = %session.user.referral_code,
            "session started"
        );
        Ok(session)
    }

    /// End the current session. Returns whether one existed.
    ///
    /// The backend call is best effort: the local session is cleared even
    /// when the backend cannot be reached.
    pub async fn logout(&self) -> Result<bool, AccountError> {
        let Some(session) = self.store.load()? else {
            return Ok(false);
        };
        if let Err(e) = self.client.logout(&session).await {
            tracing::warn!(error = %e, "backend logout failed; clearing local session anyway");
        }
        self.store.clear()?;
        tracing::info!(user = %session.user.email, "session ended");
        Ok(true)
    }

    pub fn current(&self) -> Result<Option<Session>, AccountError> {
        Ok(self.store.load()?)
    }

    pub fn require(&self) -> Result<Session, AccountError> {
        self.current()?.ok_or(AccountError::NotLoggedIn)
    }

    /// Run an authenticated call with the stored session.
    ///
    /// An auth failure from the backend clears the stored session before the
    /// error is returned.
    pub async fn with_session<'a, T, F, Fut>(&'a self, f: F) -> Result<T, AccountError>
    where
        F: FnOnce(&'a C, Session) -> Fut,
        Fut: Future<Output = refnet_client::Result<T>> + 'a,
    {
        let session = self.require()?;
        match f(&self.client, session).await {
            Ok(value) => Ok(value),
            Err(e) if e.is_auth_failure() => {
                tracing::warn!(error = %e, "session rejected by backend; clearing");
                self.store.clear()?;
                Err(e.into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch the profile and store it in the session
    pub async fn refresh_profile(&self) -> Result<Session, AccountError> {
        let session = self.require()?;
        let user = self
            .with_session(|client, session| async move { client.profile(&session).await })
            .await?;
        let session = session.with_user(user);
        self.store.save(&session)?;
        Ok(session)
    }
}
