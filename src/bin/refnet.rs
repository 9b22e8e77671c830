//! refnet command line client
//!
//! # Usage
//!
//! ```bash
//! # Sign in (credentials may also come from REFNET_EMAIL / REFNET_PASSWORD)
//! refnet login --email alice@example.com --password '...'
//!
//! # Show the downline tree
//! refnet network
//!
//! # Wallet balance and history as JSON
//! refnet --format json wallet
//! ```

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use refnet::{
    dashboard::render_transactions, fetch_network, fetch_wallet, referral_link, AccountError,
    AccountService, RefnetConfig,
};
use refnet_client::{FileSessionStore, HttpClient, RefnetClient};
use refnet_types::{RegisterRequest, WithdrawRequest};

type Account = AccountService<HttpClient, FileSessionStore>;

#[derive(Parser)]
#[command(name = "refnet")]
#[command(version)]
#[command(about = "Referral platform client: account, wallet and downline network")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format: pretty (default) or json
    #[arg(long, short = 'o', global = true, default_value = "pretty", value_enum)]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        #[arg(long, env = "REFNET_EMAIL")]
        email: String,

        #[arg(long, env = "REFNET_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account, optionally under a sponsor's referral code
    Register {
        #[arg(long)]
        name: String,

        #[arg(long, env = "REFNET_EMAIL")]
        email: String,

        #[arg(long, env = "REFNET_PASSWORD", hide_env_values = true)]
        password: String,

        /// Sponsor's referral code
        #[arg(long)]
        sponsor: Option<String>,
    },

    /// End the session locally and on the backend
    Logout,

    /// Show the signed-in user's profile
    Whoami,

    /// Wallet balance and recent transactions
    Wallet,

    /// Wallet transaction history
    Transactions,

    /// Request a payout from the wallet balance
    Withdraw {
        amount: Decimal,
    },

    /// Downline statistics and referral tree
    Network {
        /// Print only the tree
        #[arg(long)]
        tree_only: bool,
    },

    /// Print the referral code and shareable sign-up link
    Referral,
}

// =============================================================================
// MAIN
// =============================================================================

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "refnet=info,refnet_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let auth = e
                .downcast_ref::<AccountError>()
                .map(AccountError::is_auth_failure)
                .unwrap_or(false);
            if format == OutputFormat::Json {
                println!("{}", json!({ "error": format!("{:#}", e) }));
            } else {
                eprintln!("{}: {:#}", "error".red().bold(), e);
                if auth {
                    eprintln!("{}", "hint: sign in again with `refnet login`".yellow());
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = RefnetConfig::load().context("loading configuration")?;
    let client =
        HttpClient::new(config.client_settings()).context("building HTTP client")?;
    let store = FileSessionStore::new(&config.session_file);
    let account = AccountService::new(client, store);
    let format = cli.format;

    match cli.command {
        Commands::Login { email, password } => cmd_login(&account, &email, &password, format).await,
        Commands::Register {
            name,
            email,
            password,
            sponsor,
        } => {
            let req = RegisterRequest {
                name,
                email,
                password,
                referral_code: sponsor,
            };
            cmd_register(&account, req, format).await
        }
        Commands::Logout => cmd_logout(&account, format).await,
        Commands::Whoami => cmd_whoami(&account, format).await,
        Commands::Wallet => cmd_wallet(&account, format).await,
        Commands::Transactions => cmd_transactions(&account, format).await,
        Commands::Withdraw { amount } => cmd_withdraw(&account, amount, format).await,
        Commands::Network { tree_only } => cmd_network(&account, tree_only, format).await,
        Commands::Referral => cmd_referral(&account, &config, format),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serializing output")?
    );
    Ok(())
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn cmd_login(account: &Account, email: &str, password: &str, format: OutputFormat) -> Result<()> {
    let session = account.login(email, password).await?;
    match format {
        OutputFormat::Json => print_json(&session.user),
        OutputFormat::Pretty => {
            println!(
                "{} Signed in as {} ({})",
                "✓".green(),
                session.user.name.bold(),
                session.user.email
            );
            Ok(())
        }
    }
}

async fn cmd_register(account: &Account, req: RegisterRequest, format: OutputFormat) -> Result<()> {
    let session = account.register(req).await?;
    match format {
        OutputFormat::Json => print_json(&session.user),
        OutputFormat::Pretty => {
            println!(
                "{} Account created for {}; your referral code is {}",
                "✓".green(),
                session.user.name.bold(),
                session.user.referral_code.cyan()
            );
            Ok(())
        }
    }
}

async fn cmd_logout(account: &Account, format: OutputFormat) -> Result<()> {
    let had_session = account.logout().await?;
    match format {
        OutputFormat::Json => print_json(&json!({ "loggedOut": had_session })),
        OutputFormat::Pretty => {
            if had_session {
                println!("{} Signed out", "✓".green());
            } else {
                println!("Not signed in");
            }
            Ok(())
        }
    }
}

async fn cmd_whoami(account: &Account, format: OutputFormat) -> Result<()> {
    let session = account.refresh_profile().await?;
    let user = &session.user;
    match format {
        OutputFormat::Json => print_json(user),
        OutputFormat::Pretty => {
            println!("{}", user.name.bold());
            println!("  Email:         {}", user.email);
            println!("  Referral code: {}", user.referral_code.cyan());
            println!("  Level:         {}", user.level);
            if let Some(sponsor) = &user.referred_by {
                println!("  Referred by:   {}", sponsor);
            }
            if let Some(created) = user.created_at {
                println!("  Member since:  {}", created.format("%Y-%m-%d"));
            }
            Ok(())
        }
    }
}

async fn cmd_wallet(account: &Account, format: OutputFormat) -> Result<()> {
    let view = fetch_wallet(account).await?;
    match format {
        OutputFormat::Json => print_json(&json!({
            "wallet": view.wallet,
            "transactions": view.transactions,
        })),
        OutputFormat::Pretty => {
            print!("{}", view.render_text());
            Ok(())
        }
    }
}

async fn cmd_transactions(account: &Account, format: OutputFormat) -> Result<()> {
    let transactions = account
        .with_session(|client, session| async move { client.transactions(&session).await })
        .await?;
    match format {
        OutputFormat::Json => print_json(&transactions),
        OutputFormat::Pretty => {
            if transactions.is_empty() {
                println!("No transactions yet");
            } else {
                print!("{}", render_transactions(&transactions));
            }
            Ok(())
        }
    }
}

async fn cmd_withdraw(account: &Account, amount: Decimal, format: OutputFormat) -> Result<()> {
    let tx = account
        .with_session(|client, session| async move {
            client.withdraw(&session, WithdrawRequest { amount }).await
        })
        .await?;
    match format {
        OutputFormat::Json => print_json(&tx),
        OutputFormat::Pretty => {
            println!(
                "{} Withdrawal of {} requested ({})",
                "✓".green(),
                tx.amount,
                tx.status.as_str()
            );
            Ok(())
        }
    }
}

async fn cmd_network(account: &Account, tree_only: bool, format: OutputFormat) -> Result<()> {
    let view = fetch_network(account).await?;
    if view.unplaced > 0 {
        tracing::warn!(unplaced = view.unplaced, "some listed users have no parent level");
    }
    match format {
        OutputFormat::Json if tree_only => print_json(&view.tree),
        OutputFormat::Json => print_json(&json!({
            "levels": view.stats.levels,
            "totalReferrals": view.stats.total_referrals,
            "totalCommission": view.stats.total_commission,
            "unplaced": view.unplaced,
            "tree": view.tree,
        })),
        OutputFormat::Pretty if tree_only => {
            print!("{}", view.tree_text());
            Ok(())
        }
        OutputFormat::Pretty => {
            print!("{}", view.render_text());
            Ok(())
        }
    }
}

fn cmd_referral(account: &Account, config: &RefnetConfig, format: OutputFormat) -> Result<()> {
    let session = account.require()?;
    let code = &session.user.referral_code;
    let link = referral_link(&config.referral_link_base(), code);
    match format {
        OutputFormat::Json => print_json(&json!({ "referralCode": code, "link": link })),
        OutputFormat::Pretty => {
            println!("Referral code: {}", code.cyan());
            println!("Share link:    {}", link);
            Ok(())
        }
    }
}
