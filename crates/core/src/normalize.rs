//! Maps an untrusted [`RawTransaction`] into a fully defined [`ReceiptView`].
//!
//! Each display field has exactly one source path and one default, and the
//! fallback direction differs per field: the order id prefers the payload and
//! falls back to the caller-supplied reference, while the payment date prefers
//! the nested detail and falls back to the top-level transaction date.

use crate::models::{RawTransaction, ReceiptView};
use serde_json::Value;

/// Default shown for absent identity and status fields.
const ABSENT: &str = "N/A";

/// Display text of a leaf value, or `None` when the value counts as absent.
///
/// Absent means: leaf missing, JSON `null`, an empty string, numeric zero,
/// or `false`. Other numbers and booleans are formatted; remaining shapes
/// fall back to their JSON text.
fn leaf_text(value: Option<&Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            if s.is_empty() {
                None
            } else {
                Some(s.clone())
            }
        }
        Some(Value::Number(n)) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(n.to_string())
            }
        }
        Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some("true".to_string()),
        Some(other) => Some(other.to_string()),
    }
}

fn leaf_or(value: Option<&Value>, default: &str) -> String {
    leaf_text(value).unwrap_or_else(|| default.to_string())
}

/// Top-level scalars are expected on every successful payload; when one is
/// missing anyway it renders as an empty string rather than a placeholder.
fn scalar(value: Option<&Value>) -> String {
    leaf_text(value).unwrap_or_default()
}

/// Amounts settled in birr are always rendered with the currency suffix,
/// defaulting the magnitude to zero.
fn etb_amount(value: Option<&Value>) -> String {
    format!("{} ETB", leaf_or(value, "0"))
}

/// Build the display model for `order_id` from a successful lookup payload.
pub fn normalize(order_id: &str, raw: &RawTransaction) -> ReceiptView {
    let sender = raw.sender_info.as_ref();
    let receiver = raw.receiver_info.as_ref();
    let details = raw.transaction_details.as_ref();
    let additional = raw.additional_payment_details.as_ref();

    ReceiptView {
        date_time: scalar(raw.date.as_ref()),
        amount_usd: scalar(raw.amount_usd.as_ref()),
        fee_usd: scalar(raw.fee_usd.as_ref()),
        total_amount_usd: scalar(raw.total_amount.as_ref()),
        exchange_rate: scalar(raw.exchange_rate.as_ref()),
        received_amount: scalar(raw.received_amount.as_ref()),

        sender_name: leaf_or(sender.and_then(|s| s.sender_name.as_ref()), ABSENT),
        sender_phone: leaf_or(sender.and_then(|s| s.phone_number.as_ref()), ABSENT),
        sender_type: leaf_or(sender.and_then(|s| s.sender_type.as_ref()), ABSENT),

        receiver_name: leaf_or(receiver.and_then(|r| r.receiver_name.as_ref()), ABSENT),
        account_number: leaf_or(receiver.and_then(|r| r.account_number.as_ref()), ABSENT),
        transaction_status: leaf_or(receiver.and_then(|r| r.transaction_status.as_ref()), ABSENT),

        // Payload wins over the caller-supplied reference.
        order_id: leaf_text(details.and_then(|d| d.order_id.as_ref()))
            .unwrap_or_else(|| order_id.to_string()),
        // Nested payment date wins over the top-level transaction date.
        payment_date: leaf_text(details.and_then(|d| d.payment_date.as_ref()))
            .or_else(|| leaf_text(raw.date.as_ref()))
            .unwrap_or_default(),
        settled_amount: etb_amount(details.and_then(|d| d.settled_amount.as_ref())),
        charges: leaf_or(details.and_then(|d| d.charges.as_ref()), "0%"),
        receipt_number: leaf_or(details.and_then(|d| d.receipt_number.as_ref()), ABSENT),
        total_amount_paid: etb_amount(details.and_then(|d| d.total_amount_paid.as_ref())),

        total_amount_in_word: leaf_or(
            additional.and_then(|a| a.total_amount_in_word.as_ref()),
            ABSENT,
        ),
        payment_mode: leaf_or(additional.and_then(|a| a.payment_mode.as_ref()), ABSENT),
        payment_reason: leaf_or(additional.and_then(|a| a.payment_reason.as_ref()), ABSENT),
        payment_channel: leaf_or(additional.and_then(|a| a.payment_channel.as_ref()), ABSENT),
        destination_bank: leaf_or(additional.and_then(|a| a.destination_bank.as_ref()), ABSENT),
    }
}
