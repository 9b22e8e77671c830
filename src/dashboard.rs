//! Dashboard views assembled from backend data

use std::fmt::Write;

use refnet_client::{ClientError, RefnetClient, SessionStore};
use refnet_graph::{
    build_downline_tree, render_level_table, render_text, total_users, unplaced_users, RootUser,
    TreeNode,
};
use refnet_types::{AuthUser, NetworkStats, Transaction, Wallet};

use crate::account::{AccountError, AccountService};

// =============================================================================
// NETWORK
// =============================================================================

/// The network page: level statistics plus the display tree
#[derive(Debug, Clone)]
pub struct NetworkView {
    pub stats: NetworkStats,
    pub tree: TreeNode,
    /// Listed users with no parent tier to attach to
    pub unplaced: usize,
}

impl NetworkView {
    pub fn new(user: &AuthUser, stats: NetworkStats) -> Self {
        let tree = build_downline_tree(&RootUser::from(user), &stats.levels);
        let unplaced = unplaced_users(&stats.levels);
        Self {
            stats,
            tree,
            unplaced,
        }
    }

    pub fn total_users(&self) -> usize {
        total_users(&self.stats.levels)
    }

    pub fn tree_text(&self) -> String {
        render_text(&self.tree)
    }

    pub fn render_text(&self) -> String {
        let mut out = render_level_table(&self.stats.levels);
        out.push('\n');
        out.push_str(&self.tree_text());

        let total = self
            .stats
            .total_referrals
            .unwrap_or(self.total_users() as u64);
        let _ = write!(out, "\nTotal referrals: {}", total);
        if let Some(commission) = self.stats.total_commission {
            let _ = write!(out, "  Total commission: {}", commission);
        }
        out.push('\n');
        if self.unplaced > 0 {
            let _ = writeln!(
                out,
                "{} user(s) listed below an empty level are not shown",
                self.unplaced
            );
        }
        out
    }
}

pub async fn fetch_network<C, S>(account: &AccountService<C, S>) -> Result<NetworkView, AccountError>
where
    C: RefnetClient,
    S: SessionStore,
{
    account
        .with_session(|client, session| async move {
            let stats = client.network_stats(&session).await?;
            Ok::<_, ClientError>(NetworkView::new(&session.user, stats))
        })
        .await
}

// =============================================================================
// WALLET
// =============================================================================

#[derive(Debug, Clone)]
pub struct WalletView {
    pub wallet: Wallet,
    pub transactions: Vec<Transaction>,
}

impl WalletView {
    pub fn render_text(&self) -> String {
        let w = &self.wallet;
        let mut out = String::new();
        let _ = writeln!(out, "Balance:             {} {}", w.balance, w.currency);
        let _ = writeln!(out, "Total earned:        {} {}", w.total_earned, w.currency);
        let _ = writeln!(
            out,
            "Pending withdrawals: {} {}",
            w.pending_withdrawals, w.currency
        );
        if !self.transactions.is_empty() {
            out.push('\n');
            out.push_str(&render_transactions(&self.transactions));
        }
        out
    }
}

pub fn render_transactions(transactions: &[Transaction]) -> String {
    let mut out = String::new();
    for tx in transactions {
        let sign = if tx.kind.is_credit() { '+' } else { '-' };
        let _ = writeln!(
            out,
            "{}  {:<10} {}{:<10} {:<9} {}",
            tx.created_at.format("%Y-%m-%d"),
            tx.kind.as_str(),
            sign,
            tx.amount,
            tx.status.as_str(),
            tx.description.as_deref().unwrap_or("")
        );
    }
    out
}

pub async fn fetch_wallet<C, S>(account: &AccountService<C, S>) -> Result<WalletView, AccountError>
where
    C: RefnetClient,
    S: SessionStore,
{
    account
        .with_session(|client, session| async move {
            let wallet = client.wallet(&session).await?;
            let transactions = client.transactions(&session).await?;
            Ok::<_, ClientError>(WalletView {
                wallet,
                transactions,
            })
        })
        .await
}

// =============================================================================
// REFERRALS
// =============================================================================

/// Shareable sign-up link carrying the user's referral code
pub fn referral_link(base: &str, code: &str) -> String {
    format!("{}?ref={}", base.trim_end_matches('/'), code)
}
