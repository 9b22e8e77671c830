//! HttpClient: reqwest-backed implementation of RefnetClient.

use std::time::Duration;

use async_trait::async_trait;
use refnet_types::{
    decode, ApiErrorBody, AuthResponse, AuthUser, LoginRequest, NetworkStats, ProfileResponse,
    RegisterRequest, Transaction, TransactionList, Validate, Wallet, WithdrawRequest,
};
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{ClientError, RefnetClient, Result, Session};

const MAX_ERROR_TEXT: usize = 200;

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:4000".to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!("refnet/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HttpClient {
    http: Client,
    base_url: String,
}

impl HttpClient {
    pub fn new(settings: ClientSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(settings.timeout)
            .user_agent(settings.user_agent)
            .build()?;

        Ok(Self {
            http,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, session: Option<&Session>) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self
            .http
            .request(method, url)
            .header(header::ACCEPT, "application/json");
        match session {
            Some(s) => builder.bearer_auth(s.token()),
            None => builder,
        }
    }

    /// Send, check status, then decode + validate the body.
    async fn send<T>(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let body = self.send_raw(method, path, builder).await?;
        Ok(decode(&body)?)
    }

    async fn send_raw(&self, method: Method, path: &str, builder: RequestBuilder) -> Result<Vec<u8>> {
        tracing::debug!(%method, path, "backend request");

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(%method, path, error = %e, "backend unreachable");
            ClientError::from(e)
        })?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        if status.is_success() {
            return Ok(body);
        }

        let message = error_message(status, &body);
        tracing::warn!(%method, path, status = status.as_u16(), %message, "backend error");

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::Unauthorized(message));
        }
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn get<T>(&self, path: &str, session: &Session) -> Result<T>
    where
        T: DeserializeOwned + Validate,
    {
        let builder = self.request(Method::GET, path, Some(session));
        self.send(Method::GET, path, builder).await
    }

    async fn post<T, B>(&self, path: &str, body: &B, session: Option<&Session>) -> Result<T>
    where
        T: DeserializeOwned + Validate,
        B: Serialize + ?Sized,
    {
        let builder = self.request(Method::POST, path, session).json(body);
        self.send(Method::POST, path, builder).await
    }
}

/// Best human-readable reason from an error response
fn error_message(status: StatusCode, body: &[u8]) -> String {
    let fallback = || status.canonical_reason().unwrap_or("unknown error").to_string();

    // A JSON error object without a usable reason is not worth echoing
    if let Ok(parsed) = serde_json::from_slice::<ApiErrorBody>(body) {
        return parsed.reason().map(str::to_string).unwrap_or_else(fallback);
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return fallback();
    }
    text.chars().take(MAX_ERROR_TEXT).collect()
}

#[async_trait]
impl RefnetClient for HttpClient {
    async fn login(&self, req: LoginRequest) -> Result<AuthResponse> {
        self.post("/api/auth/login", &req, None).await
    }

    async fn register(&self, req: RegisterRequest) -> Result<AuthResponse> {
        self.post("/api/auth/register", &req, None).await
    }

    async fn logout(&self, session: &Session) -> Result<()> {
        let path = "/api/auth/logout";
        let builder = self.request(Method::POST, path, Some(session));
        self.send_raw(Method::POST, path, builder).await?;
        Ok(())
    }

    async fn profile(&self, session: &Session) -> Result<AuthUser> {
        let resp: ProfileResponse = self.get("/api/auth/me", session).await?;
        Ok(resp.user)
    }

    async fn wallet(&self, session: &Session) -> Result<Wallet> {
        self.get("/api/wallet", session).await
    }

    async fn transactions(&self, session: &Session) -> Result<Vec<Transaction>> {
        let list: TransactionList = self.get("/api/wallet/transactions", session).await?;
        Ok(list.transactions)
    }

    async fn withdraw(&self, session: &Session, req: WithdrawRequest) -> Result<Transaction> {
        req.validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;
        self.post("/api/wallet/withdraw", &req, Some(session)).await
    }

    async fn network_stats(&self, session: &Session) -> Result<NetworkStats> {
        self.get("/api/network/stats", session).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_trimmed() {
        let client = HttpClient::new(ClientSettings {
            base_url: "https://api.example.com/".into(),
            ..ClientSettings::default()
        })
        .unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn error_message_from_json_body() {
        let msg = error_message(
            StatusCode::BAD_REQUEST,
            br#"{"message":"Email already registered"}"#,
        );
        assert_eq!(msg, "Email already registered");
    }

    #[test]
    fn error_message_from_text_body_is_truncated() {
        let body = "x".repeat(500);
        let msg = error_message(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert_eq!(msg.len(), MAX_ERROR_TEXT);
    }

    #[test]
    fn error_message_empty_body_uses_reason_phrase() {
        assert_eq!(
            error_message(StatusCode::SERVICE_UNAVAILABLE, b""),
            "Service Unavailable"
        );
    }

    #[test]
    fn error_message_json_without_reason_uses_reason_phrase() {
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, b"{}"), "Unauthorized");
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, br#"{"message":"  ","code":7}"#),
            "Forbidden"
        );
    }
}
