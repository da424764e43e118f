use anyhow::{Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use iamport::{Bank, CancelOptions, CancelTarget, IamportClient, PaymentGateway, PaymentStatus};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "iamport")]
#[command(about = "Query and manage Iamport payments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Request a new access token and print its expiry
    Token,

    /// Show a payment by its imp_uid
    Payment { imp_uid: String },

    /// Show a payment by its merchant_uid
    Find { merchant_uid: String },

    /// List payments in a status (all, ready, paid, canceled, failed)
    List {
        status: PaymentStatus,

        /// Page number; omitted means the first page
        #[arg(long, short, default_value_t = 0)]
        page: u32,
    },

    /// Cancel a payment, fully or partially
    #[command(group(ArgGroup::new("target").required(true).args(["imp_uid", "merchant_uid"])))]
    Cancel {
        #[arg(long)]
        imp_uid: Option<String>,

        #[arg(long)]
        merchant_uid: Option<String>,

        /// Partial amount; omitted cancels the remaining amount
        #[arg(long)]
        amount: Option<String>,

        #[arg(long)]
        reason: Option<String>,

        #[arg(long)]
        refund_holder: Option<String>,

        /// Two-character bank code (see `iamport banks`)
        #[arg(long)]
        refund_bank: Option<Bank>,

        #[arg(long)]
        refund_account: Option<String>,
    },

    /// Register the expected amount for a merchant_uid
    Prepare { merchant_uid: String, amount: i64 },

    /// Show the amount registered for a merchant_uid
    Prepared { merchant_uid: String },

    /// List refund bank codes
    Banks,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Banks => {
            for bank in Bank::ALL {
                println!("{}\t{}", bank.code(), bank.name());
            }
        }
        Commands::Token => {
            let token = client()?.get_token().await?;
            println!("access token expires at {}", token.expired_at.to_rfc3339());
        }
        Commands::Payment { imp_uid } => {
            print_json(&client()?.get_payment_by_imp_uid(&imp_uid).await?)?;
        }
        Commands::Find { merchant_uid } => {
            print_json(&client()?.get_payment_by_merchant_uid(&merchant_uid).await?)?;
        }
        Commands::List { status, page } => {
            print_json(&client()?.get_payments_by_status(status, page).await?)?;
        }
        Commands::Cancel {
            imp_uid,
            merchant_uid,
            amount,
            reason,
            refund_holder,
            refund_bank,
            refund_account,
        } => {
            let target = match (imp_uid, merchant_uid) {
                (Some(imp_uid), _) => CancelTarget::ImpUid(imp_uid),
                (None, Some(merchant_uid)) => CancelTarget::MerchantUid(merchant_uid),
                (None, None) => anyhow::bail!("--imp-uid or --merchant-uid is required"),
            };
            let options = CancelOptions {
                amount,
                reason,
                refund_holder,
                refund_bank,
                refund_account,
            };
            print_json(&client()?.cancel_payment(target, Some(&options)).await?)?;
        }
        Commands::Prepare {
            merchant_uid,
            amount,
        } => {
            print_json(&client()?.prepare_payment(&merchant_uid, amount).await?)?;
        }
        Commands::Prepared { merchant_uid } => {
            print_json(&client()?.get_prepared_payment(&merchant_uid).await?)?;
        }
    }

    Ok(())
}

fn client() -> Result<IamportClient> {
    IamportClient::from_env().context("failed to configure Iamport client")
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
