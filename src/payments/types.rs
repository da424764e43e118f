//! Payment types and data structures
//!
//! Records mirror what the gateway returns; the client never mutates them.

use crate::error::IamportError;
use crate::payments::bank::Bank;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single payment as reported by `/payments/*`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// Gateway-assigned transaction id
    pub imp_uid: String,
    /// Merchant-assigned order id
    pub merchant_uid: String,
    pub pay_method: String,
    pub pg_provider: Option<String>,
    pub pg_tid: Option<String>,
    /// Card approval number
    pub apply_num: Option<String>,
    pub card_name: Option<String>,
    /// Installment months, 0 for lump sum
    pub card_quota: i64,
    pub vbank_name: Option<String>,
    pub vbank_num: Option<String>,
    pub vbank_holder: Option<String>,
    /// Virtual account deposit deadline (epoch seconds)
    pub vbank_date: i64,
    pub name: Option<String>,
    pub amount: i64,
    pub cancel_amount: i64,
    pub buyer_name: Option<String>,
    pub buyer_email: Option<String>,
    pub buyer_tel: Option<String>,
    pub buyer_addr: Option<String>,
    pub buyer_postcode: Option<String>,
    /// Opaque merchant data attached at checkout
    pub custom_data: Option<String>,
    pub user_agent: Option<String>,
    /// `ready`, `paid`, `cancelled` or `failed`
    pub status: String,
    pub paid_at: i64,
    pub failed_at: i64,
    pub canceled_at: i64,
    pub fail_reason: Option<String>,
    pub cancel_reason: Option<String>,
    pub receipt_url: Option<String>,
}

impl Payment {
    pub fn paid_time(&self) -> Option<DateTime<Utc>> {
        epoch(self.paid_at)
    }

    pub fn failed_time(&self) -> Option<DateTime<Utc>> {
        epoch(self.failed_at)
    }

    pub fn canceled_time(&self) -> Option<DateTime<Utc>> {
        epoch(self.canceled_at)
    }
}

fn epoch(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}

/// One page of `/payments/status/{status}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagedPayments {
    pub total: i64,
    pub previous: i64,
    pub next: i64,
    #[serde(rename = "list")]
    pub payments: Vec<Payment>,
}

/// An expected charge registered ahead of checkout
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreparedPayment {
    pub merchant_uid: String,
    pub amount: i64,
}

/// Status filter accepted by the listing endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    All,
    Ready,
    Paid,
    #[serde(rename = "canceled")]
    Cancelled,
    Failed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::All => "all",
            PaymentStatus::Ready => "ready",
            PaymentStatus::Paid => "paid",
            PaymentStatus::Cancelled => "canceled",
            PaymentStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = IamportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(PaymentStatus::All),
            "ready" => Ok(PaymentStatus::Ready),
            "paid" => Ok(PaymentStatus::Paid),
            "canceled" | "cancelled" => Ok(PaymentStatus::Cancelled),
            "failed" => Ok(PaymentStatus::Failed),
            other => Err(IamportError::config_error(format!(
                "unknown payment status: {}",
                other
            ))),
        }
    }
}

/// Which identifier a cancellation addresses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CancelTarget {
    ImpUid(String),
    MerchantUid(String),
}

impl CancelTarget {
    pub fn key(&self) -> &'static str {
        match self {
            CancelTarget::ImpUid(_) => "imp_uid",
            CancelTarget::MerchantUid(_) => "merchant_uid",
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            CancelTarget::ImpUid(uid) | CancelTarget::MerchantUid(uid) => uid,
        }
    }
}

/// Optional fields for `/payments/cancel`
///
/// Blank values are left out of the request entirely. Omitting `amount`
/// cancels the full remaining amount.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CancelOptions {
    pub amount: Option<String>,
    pub reason: Option<String>,
    pub refund_holder: Option<String>,
    pub refund_bank: Option<Bank>,
    pub refund_account: Option<String>,
}

impl CancelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Refund destination for virtual-account payments.
    pub fn refund_to(
        mut self,
        holder: impl Into<String>,
        bank: Bank,
        account: impl Into<String>,
    ) -> Self {
        self.refund_holder = Some(holder.into());
        self.refund_bank = Some(bank);
        self.refund_account = Some(account.into());
        self
    }

    pub(crate) fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = Vec::new();

        let text_fields = [
            ("amount", &self.amount),
            ("reason", &self.reason),
            ("refund_holder", &self.refund_holder),
        ];
        for (key, value) in text_fields {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((key, value.to_string()));
            }
        }

        if let Some(bank) = self.refund_bank {
            fields.push(("refund_bank", bank.code().to_string()));
        }

        if let Some(account) = self.refund_account.as_deref().filter(|v| !v.is_empty()) {
            fields.push(("refund_account", account.to_string()));
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_decodes_with_nulls_and_missing_fields() {
        let json = r#"{
            "imp_uid": "imp_123",
            "merchant_uid": "order_1",
            "pay_method": "card",
            "pg_tid": null,
            "card_name": "국민카드",
            "amount": 1000,
            "status": "paid",
            "paid_at": 1500000000
        }"#;

        let payment: Payment = serde_json::from_str(json).unwrap();
        assert_eq!(payment.imp_uid, "imp_123");
        assert_eq!(payment.pg_tid, None);
        assert_eq!(payment.card_name.as_deref(), Some("국민카드"));
        assert_eq!(payment.cancel_amount, 0);
        assert_eq!(payment.paid_time().unwrap().timestamp(), 1_500_000_000);
        assert_eq!(payment.failed_time(), None);
    }

    #[test]
    fn test_paged_payments_reads_list_key() {
        let json = r#"{"total": 2, "previous": 0, "next": 2, "list": [{"imp_uid": "a"}, {"imp_uid": "b"}]}"#;
        let page: PagedPayments = serde_json::from_str(json).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.next, 2);
        assert_eq!(page.payments.len(), 2);
        assert_eq!(page.payments[1].imp_uid, "b");
    }

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(PaymentStatus::Cancelled.as_str(), "canceled");
        assert_eq!(PaymentStatus::All.to_string(), "all");
        assert_eq!("cancelled".parse::<PaymentStatus>().unwrap(), PaymentStatus::Cancelled);
        assert_eq!("PAID".parse::<PaymentStatus>().unwrap(), PaymentStatus::Paid);
        assert!("refunded".parse::<PaymentStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Cancelled).unwrap(),
            "\"canceled\""
        );
    }

    #[test]
    fn test_cancel_form_skips_blank_fields() {
        let options = CancelOptions::new().amount("100").reason("");
        assert_eq!(options.form_fields(), vec![("amount", "100".to_string())]);
        assert!(CancelOptions::default().form_fields().is_empty());
    }

    #[test]
    fn test_cancel_form_with_refund_account() {
        let options = CancelOptions::new()
            .reason("customer request")
            .refund_to("Hong Gildong", Bank::Shinhan, "110-123-456789");

        assert_eq!(
            options.form_fields(),
            vec![
                ("reason", "customer request".to_string()),
                ("refund_holder", "Hong Gildong".to_string()),
                ("refund_bank", "88".to_string()),
                ("refund_account", "110-123-456789".to_string()),
            ]
        );
    }

    #[test]
    fn test_cancel_target_key() {
        let target = CancelTarget::MerchantUid("order_1".to_string());
        assert_eq!(target.key(), "merchant_uid");
        assert_eq!(target.uid(), "order_1");
        assert_eq!(CancelTarget::ImpUid("imp_1".to_string()).key(), "imp_uid");
    }
}
