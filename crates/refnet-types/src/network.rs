//! Network statistics API types
//!
//! `GET /api/network/stats` returns the caller's downline partitioned by
//! referral level. The backend does not send referrer edges below level 1,
//! only per-level membership.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decode::{require_non_blank, validate_each, DecodeError, Validate};

/// A referred user as listed under one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeveledUser {
    pub name: String,
    pub referral_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

impl LeveledUser {
    pub fn new(name: impl Into<String>, referral_code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            referral_code: referral_code.into(),
            joined_at: None,
        }
    }

    pub fn joined(mut self, at: DateTime<Utc>) -> Self {
        self.joined_at = Some(at);
        self
    }
}

impl Validate for LeveledUser {
    fn validate(&self) -> Result<(), DecodeError> {
        require_non_blank("referralCode", &self.referral_code)
    }
}

/// One referral level of the downline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatrixLevel {
    /// Declared level number (1 = direct referrals)
    pub level: u32,
    /// Commission percentage paid on this level
    #[serde(default)]
    pub rate: Decimal,
    /// Referral count as aggregated by the backend; may exceed `users.len()`
    #[serde(default)]
    pub referrals_count: u64,
    #[serde(default)]
    pub users: Vec<LeveledUser>,
}

impl MatrixLevel {
    pub fn new(level: u32, users: Vec<LeveledUser>) -> Self {
        Self {
            level,
            rate: Decimal::ZERO,
            referrals_count: users.len() as u64,
            users,
        }
    }

    pub fn with_rate(mut self, rate: Decimal) -> Self {
        self.rate = rate;
        self
    }
}

impl Validate for MatrixLevel {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.level < 1 {
            return Err(DecodeError::invalid("level", "must be at least 1"));
        }
        if self.rate < Decimal::ZERO || self.rate > Decimal::ONE_HUNDRED {
            return Err(DecodeError::invalid(
                "rate",
                format!("{} is not a percentage", self.rate),
            ));
        }
        validate_each("users", &self.users)
    }
}

/// GET /api/network/stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    #[serde(default)]
    pub levels: Vec<MatrixLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_referrals: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_commission: Option<Decimal>,
}

impl NetworkStats {
    /// Users actually listed across all levels
    pub fn listed_users(&self) -> usize {
        self.levels.iter().map(|l| l.users.len()).sum()
    }
}

impl Validate for NetworkStats {
    fn validate(&self) -> Result<(), DecodeError> {
        validate_each("levels", &self.levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    const STATS_JSON: &str = r#"{
        "levels": [
            {
                "level": 1,
                "rate": 10,
                "referralsCount": 2,
                "users": [
                    {"name": "Bob", "referralCode": "BB1", "joinedAt": "2026-02-01T08:30:00Z"},
                    {"name": "Dan", "referralCode": "DD1"}
                ]
            },
            {
                "level": 2,
                "rate": "5.5",
                "referralsCount": 1,
                "users": [{"name": "Cara", "referralCode": "CC1"}]
            }
        ],
        "totalReferrals": 3,
        "totalCommission": "42.10"
    }"#;

    #[test]
    fn test_stats_decode() {
        let stats: NetworkStats = decode(STATS_JSON.as_bytes()).unwrap();
        assert_eq!(stats.levels.len(), 2);
        assert_eq!(stats.listed_users(), 3);
        assert_eq!(stats.levels[1].rate, Decimal::new(55, 1));
        assert!(stats.levels[0].users[0].joined_at.is_some());
        assert_eq!(stats.total_referrals, Some(3));
    }

    #[test]
    fn test_users_default_to_empty() {
        let json = r#"{"levels":[{"level":1,"rate":10,"referralsCount":0}]}"#;
        let stats: NetworkStats = decode(json.as_bytes()).unwrap();
        assert!(stats.levels[0].users.is_empty());
    }

    #[test]
    fn test_empty_body_object_is_empty_stats() {
        let stats: NetworkStats = decode(b"{}").unwrap();
        assert!(stats.levels.is_empty());
    }

    #[test]
    fn test_missing_referral_code_fails_parse() {
        let json = r#"{"levels":[{"level":1,"users":[{"name":"Bob"}]}]}"#;
        let err = decode::<NetworkStats>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_blank_referral_code_names_path() {
        let json = r#"{"levels":[
            {"level":1,"users":[{"name":"Bob","referralCode":"BB1"}]},
            {"level":2,"users":[{"name":"Cara","referralCode":" "}]}
        ]}"#;
        let err = decode::<NetworkStats>(json.as_bytes()).unwrap_err();
        match err {
            DecodeError::Invalid { field, .. } => {
                assert_eq!(field, "levels[1].users[0].referralCode")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_level_zero_rejected() {
        let json = r#"{"levels":[{"level":0,"users":[]}]}"#;
        let err = decode::<NetworkStats>(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("levels[0].level"));
    }

    #[test]
    fn test_rate_above_hundred_rejected() {
        let json = r#"{"levels":[{"level":1,"rate":150,"users":[]}]}"#;
        let err = decode::<NetworkStats>(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("levels[0].rate"));
    }
}
