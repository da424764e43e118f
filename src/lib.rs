//! Client for the Iamport payment gateway REST API.
//!
//! ```no_run
//! use iamport::{IamportClient, PaymentGateway, PaymentStatus};
//!
//! # async fn run() -> iamport::IamportResult<()> {
//! let client = IamportClient::new("imp_apikey", "imp_secret", None);
//! let payment = client.get_payment_by_imp_uid("imp_448280090638").await?;
//! let paid = client.get_payments_by_status(PaymentStatus::Paid, 0).await?;
//! # let _ = (payment, paid);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod payments;

pub use config::IamportConfig;
pub use error::{IamportError, IamportResult};
pub use payments::bank::Bank;
pub use payments::providers::IamportClient;
pub use payments::token::AccessToken;
pub use payments::traits::PaymentGateway;
pub use payments::types::{
    CancelOptions, CancelTarget, PagedPayments, Payment, PaymentStatus, PreparedPayment,
};
