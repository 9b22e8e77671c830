//! Wallet API types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decode::{require_non_blank, validate_each, DecodeError, Validate};

fn default_currency() -> String {
    "USD".to_string()
}

/// GET /api/wallet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub balance: Decimal,
    pub total_earned: Decimal,
    #[serde(default)]
    pub pending_withdrawals: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Validate for Wallet {
    fn validate(&self) -> Result<(), DecodeError> {
        for (field, amount) in [
            ("balance", self.balance),
            ("totalEarned", self.total_earned),
            ("pendingWithdrawals", self.pending_withdrawals),
        ] {
            if amount < Decimal::ZERO {
                return Err(DecodeError::invalid(field, "must not be negative"));
            }
        }
        require_non_blank("currency", &self.currency)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Commission,
    Bonus,
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Commission => "commission",
            TransactionKind::Bonus => "bonus",
            TransactionKind::Deposit => "deposit",
            TransactionKind::Withdrawal => "withdrawal",
        }
    }

    /// Whether the transaction adds to the balance
    pub fn is_credit(&self) -> bool {
        !matches!(self, TransactionKind::Withdrawal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: Decimal,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Validate for Transaction {
    fn validate(&self) -> Result<(), DecodeError> {
        require_non_blank("id", &self.id)?;
        if self.amount < Decimal::ZERO {
            return Err(DecodeError::invalid("amount", "must not be negative"));
        }
        Ok(())
    }
}

/// GET /api/wallet/transactions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransactionList {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

impl Validate for TransactionList {
    fn validate(&self) -> Result<(), DecodeError> {
        validate_each("transactions", &self.transactions)
    }
}

/// POST /api/wallet/withdraw
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WithdrawRequest {
    pub amount: Decimal,
}

impl Validate for WithdrawRequest {
    fn validate(&self) -> Result<(), DecodeError> {
        if self.amount <= Decimal::ZERO {
            return Err(DecodeError::invalid("amount", "must be greater than zero"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;

    #[test]
    fn test_wallet_defaults() {
        let wallet: Wallet = decode(br#"{"balance":"120.50","totalEarned":300}"#).unwrap();
        assert_eq!(wallet.currency, "USD");
        assert_eq!(wallet.pending_withdrawals, Decimal::ZERO);
        assert_eq!(wallet.balance, Decimal::new(12050, 2));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let err = decode::<Wallet>(br#"{"balance":"-1","totalEarned":0}"#).unwrap_err();
        assert!(err.to_string().contains("balance"));
    }

    #[test]
    fn test_transactions_decode() {
        let json = r#"{"transactions":[
            {"id":"t1","kind":"commission","amount":"12.00","status":"completed",
             "description":"Level 1 commission from BB1","createdAt":"2026-03-01T12:00:00Z"},
            {"id":"t2","kind":"withdrawal","amount":50,"status":"pending",
             "createdAt":"2026-03-02T12:00:00Z"}
        ]}"#;
        let list: TransactionList = decode(json.as_bytes()).unwrap();
        assert_eq!(list.transactions.len(), 2);
        assert!(list.transactions[0].kind.is_credit());
        assert!(!list.transactions[1].kind.is_credit());
        assert_eq!(list.transactions[1].status, TransactionStatus::Pending);
    }

    #[test]
    fn test_unknown_kind_is_json_error() {
        let json = r#"{"transactions":[{"id":"t1","kind":"gift","amount":1,"status":"completed","createdAt":"2026-03-01T12:00:00Z"}]}"#;
        let err = decode::<TransactionList>(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DecodeError::Json(_)));
    }

    #[test]
    fn test_blank_transaction_id_path() {
        let json = r#"{"transactions":[{"id":"","kind":"bonus","amount":1,"status":"completed","createdAt":"2026-03-01T12:00:00Z"}]}"#;
        let err = decode::<TransactionList>(json.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("transactions[0].id"));
    }

    #[test]
    fn test_withdraw_request_must_be_positive() {
        assert!(WithdrawRequest {
            amount: Decimal::ZERO
        }
        .validate()
        .is_err());
        assert!(WithdrawRequest {
            amount: Decimal::new(1, 2)
        }
        .validate()
        .is_ok());
    }
}
