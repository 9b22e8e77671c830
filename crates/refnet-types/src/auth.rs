//! Authentication and profile API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decode::{require_non_blank, DecodeError, Validate};

// ============================================================================
// REQUESTS
// ============================================================================

/// POST /api/auth/login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Sponsor's referral code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
}

// ============================================================================
// RESPONSES
// ============================================================================

/// Authenticated platform user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub referral_code: String,
    /// Rank in the platform's level scheme (0 = unranked)
    #[serde(default)]
    pub level: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referred_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Validate for AuthUser {
    fn validate(&self) -> Result<(), DecodeError> {
        require_non_blank("id", &self.id)?;
        require_non_blank("email", &self.email)?;
        require_non_blank("referralCode", &self.referral_code)?;
        Ok(())
    }
}

/// Response to login and registration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

impl Validate for AuthResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        require_non_blank("token", &self.token)?;
        self.user.validate().map_err(|e| e.within("user"))
    }
}

/// GET /api/auth/me
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: AuthUser,
}

impl Validate for ProfileResponse {
    fn validate(&self) -> Result<(), DecodeError> {
        self.user.validate().map_err(|e| e.within("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    const AUTH_JSON: &str = r#"{
        "token": "eyJhbGciOi.payload.sig",
        "user": {
            "id": "u-1",
            "name": "Alice",
            "email": "alice@example.com",
            "referralCode": "AL1",
            "level": 2,
            "createdAt": "2026-01-05T10:00:00Z"
        }
    }"#;

    #[test]
    fn test_auth_response_decodes() {
        let resp: AuthResponse = decode(AUTH_JSON.as_bytes()).unwrap();
        assert_eq!(resp.user.referral_code, "AL1");
        assert_eq!(resp.user.level, 2);
        assert!(resp.user.referred_by.is_none());
        assert!(resp.user.created_at.is_some());
    }

    #[test]
    fn test_level_defaults_to_zero() {
        let json = r#"{"user":{"id":"u-2","name":"Bob","email":"b@x.io","referralCode":"BB1"}}"#;
        let resp: ProfileResponse = decode(json.as_bytes()).unwrap();
        assert_eq!(resp.user.level, 0);
    }

    #[test]
    fn test_blank_token_rejected() {
        let json = AUTH_JSON.replace("eyJhbGciOi.payload.sig", " ");
        let err = decode::<AuthResponse>(json.as_bytes()).unwrap_err();
        match err {
            DecodeError::Invalid { field, .. } => assert_eq!(field, "token"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_blank_user_referral_code_path() {
        let json = AUTH_JSON.replace("\"AL1\"", "\"\"");
        let err = decode::<AuthResponse>(json.as_bytes()).unwrap_err();
        match err {
            DecodeError::Invalid { field, .. } => assert_eq!(field, "user.referralCode"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_email_is_json_error() {
        let json = r#"{"token":"t","user":{"id":"u","name":"n","referralCode":"R"}}"#;
        let err = decode::<AuthResponse>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_register_request_omits_missing_sponsor() {
        let req = RegisterRequest {
            name: "Cara".into(),
            email: "cara@example.com".into(),
            password: "hunter22".into(),
            referral_code: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("referralCode").is_none());
    }
}
