//! The invoice record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shipledger_billing::BillingSubject;
use shipledger_core::{Cents, DateRange, DomainError, DomainResult, InvoiceId};

/// Invoice status lifecycle. `Paid` and `Rejected` are terminal: once
/// reached, the invoice is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvoiceStatus {
    Pending,
    Paid,
    Rejected,
}

impl InvoiceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, InvoiceStatus::Paid | InvoiceStatus::Rejected)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Rejected => "Rejected",
        }
    }
}

impl core::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a paid invoice was settled. Recorded on the self-service pay path;
/// a small fixed set, not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    Upi,
    BankTransfer,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
        }
    }
}

impl core::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A periodic bill for exactly one subject: an internal recipient, a
/// partner, or a sales agent.
///
/// Carries either a covering date range, a legacy `YYYY-MM` month label,
/// or both (range-generated invoices also stamp the label for display).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub subject: BillingSubject,
    pub amount: Cents,
    pub period: Option<DateRange>,
    /// `YYYY-MM` label, from the period's start date when one exists.
    pub month: String,
    pub status: InvoiceStatus,
    pub payment_mode: Option<PaymentMode>,
    pub created_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a Pending invoice.
    ///
    /// The amount must be positive: zero or negative previews are a signal
    /// to the operator that there is nothing to bill, not something to put
    /// on the books.
    pub fn pending(
        subject: BillingSubject,
        amount: Cents,
        period: Option<DateRange>,
        month: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if amount <= 0 {
            return Err(DomainError::validation("invoice amount must be positive"));
        }
        let month = match month {
            Some(label) if !label.trim().is_empty() => label.trim().to_string(),
            _ => match period {
                Some(range) => range.month_label(),
                None => {
                    return Err(DomainError::validation(
                        "a billing month or date range is required",
                    ));
                }
            },
        };
        Ok(Self {
            id: InvoiceId::new(),
            subject,
            amount,
            period,
            month,
            status: InvoiceStatus::Pending,
            payment_mode: None,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shipledger_billing::InternalRecipient;
    use shipledger_core::PartnerId;

    fn now() -> DateTime<Utc> {
        "2024-05-01T09:00:00Z".parse().unwrap()
    }

    fn april() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, 30).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn range_generated_invoice_stamps_month_label() {
        let invoice = Invoice::pending(
            BillingSubject::Internal(InternalRecipient::OwnerShare),
            50_000,
            Some(april()),
            None,
            now(),
        )
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert_eq!(invoice.month, "2024-04");
        assert!(invoice.payment_mode.is_none());
    }

    #[test]
    fn self_filed_invoice_takes_explicit_month() {
        let invoice = Invoice::pending(
            BillingSubject::Partner(PartnerId::new()),
            12_500,
            None,
            Some("2024-04".to_string()),
            now(),
        )
        .unwrap();
        assert_eq!(invoice.month, "2024-04");
        assert!(invoice.period.is_none());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for amount in [0, -100] {
            let err = Invoice::pending(
                BillingSubject::Partner(PartnerId::new()),
                amount,
                Some(april()),
                None,
                now(),
            )
            .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn month_or_period_is_required() {
        let err = Invoice::pending(
            BillingSubject::Partner(PartnerId::new()),
            1_000,
            None,
            None,
            now(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn terminal_statuses() {
        assert!(!InvoiceStatus::Pending.is_terminal());
        assert!(InvoiceStatus::Paid.is_terminal());
        assert!(InvoiceStatus::Rejected.is_terminal());
    }
}
