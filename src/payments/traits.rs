//! Payment gateway trait definitions
//!
//! Defines the operations the Iamport REST API exposes for one-off payments.

use crate::error::IamportResult;
use crate::payments::types::{
    CancelOptions, CancelTarget, PagedPayments, Payment, PaymentStatus, PreparedPayment,
};
use async_trait::async_trait;

/// Trait for payment gateway implementations
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Look up a payment by its gateway transaction id
    ///
    /// `GET /payments/{imp_uid}`
    async fn get_payment_by_imp_uid(&self, imp_uid: &str) -> IamportResult<Payment>;

    /// Look up a payment by the merchant's own order id
    ///
    /// `GET /payments/find/{merchant_uid}`
    async fn get_payment_by_merchant_uid(&self, merchant_uid: &str) -> IamportResult<Payment>;

    /// List payments in a given status
    ///
    /// `GET /payments/status/{status}`. A `page` of 0 requests the gateway's
    /// default (first) page.
    async fn get_payments_by_status(
        &self,
        status: PaymentStatus,
        page: u32,
    ) -> IamportResult<PagedPayments>;

    /// Cancel (fully or partially) a payment
    ///
    /// `POST /payments/cancel`. Returns the payment as it stands after the
    /// cancellation.
    async fn cancel_payment(
        &self,
        target: CancelTarget,
        options: Option<&CancelOptions>,
    ) -> IamportResult<Payment>;

    /// Register the amount a future payment is expected to carry
    ///
    /// `POST /payments/prepare`
    async fn prepare_payment(
        &self,
        merchant_uid: &str,
        amount: i64,
    ) -> IamportResult<PreparedPayment>;

    /// `GET /payments/prepare/{merchant_uid}`
    async fn get_prepared_payment(&self, merchant_uid: &str) -> IamportResult<PreparedPayment>;

    async fn cancel_payment_by_imp_uid(
        &self,
        imp_uid: &str,
        options: Option<&CancelOptions>,
    ) -> IamportResult<Payment> {
        self.cancel_payment(CancelTarget::ImpUid(imp_uid.to_string()), options)
            .await
    }

    async fn cancel_payment_by_merchant_uid(
        &self,
        merchant_uid: &str,
        options: Option<&CancelOptions>,
    ) -> IamportResult<Payment> {
        self.cancel_payment(CancelTarget::MerchantUid(merchant_uid.to_string()), options)
            .await
    }
}
