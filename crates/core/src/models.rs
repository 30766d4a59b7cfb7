use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Transaction payload as returned by the FastPay backend.
///
/// Every nested group and every leaf may be absent, and the backend is known
/// to emit amounts and dates either as strings or as bare numbers, so leaves
/// are kept as raw JSON values until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTransaction {
    pub date: Option<Value>,
    #[serde(rename = "amountUSD")]
    pub amount_usd: Option<Value>,
    #[serde(rename = "feeUSD")]
    pub fee_usd: Option<Value>,
    pub total_amount: Option<Value>,
    pub exchange_rate: Option<Value>,
    pub received_amount: Option<Value>,
    pub sender_info: Option<SenderInfo>,
    pub receiver_info: Option<ReceiverInfo>,
    pub transaction_details: Option<TransactionDetails>,
    pub additional_payment_details: Option<AdditionalPaymentDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SenderInfo {
    pub sender_name: Option<Value>,
    pub phone_number: Option<Value>,
    pub sender_type: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ReceiverInfo {
    pub receiver_name: Option<Value>,
    pub account_number: Option<Value>,
    pub transaction_status: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransactionDetails {
    #[serde(rename = "orderID")]
    pub order_id: Option<Value>,
    pub payment_date: Option<Value>,
    pub settled_amount: Option<Value>,
    pub charges: Option<Value>,
    pub receipt_number: Option<Value>,
    pub total_amount_paid: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdditionalPaymentDetails {
    pub total_amount_in_word: Option<Value>,
    pub payment_mode: Option<Value>,
    pub payment_reason: Option<Value>,
    pub payment_channel: Option<Value>,
    pub destination_bank: Option<Value>,
}

/// Flat display model of a receipt. Every field is always a defined string;
/// normalization fills absent source values with field-specific defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptView {
    pub date_time: String,
    pub amount_usd: String,
    pub fee_usd: String,
    pub total_amount_usd: String,
    pub exchange_rate: String,
    pub received_amount: String,
    pub sender_name: String,
    pub sender_phone: String,
    pub sender_type: String,
    pub receiver_name: String,
    pub account_number: String,
    pub transaction_status: String,
    pub order_id: String,
    pub payment_date: String,
    pub settled_amount: String,
    pub charges: String,
    pub receipt_number: String,
    pub total_amount_paid: String,
    pub total_amount_in_word: String,
    pub payment_mode: String,
    pub payment_reason: String,
    pub payment_channel: String,
    pub destination_bank: String,
}
