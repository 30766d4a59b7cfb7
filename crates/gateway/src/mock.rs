use super::{LookupEnvelope, ReceiptGateway};
use anyhow::Result;
use async_trait::async_trait;
use fp_receipt_core::RawTransaction;
use rand::Rng;
use std::sync::Arc;
use tokio::time::{sleep, Duration};

/// Offline gateway returning a plausible receipt for any order reference.
#[derive(Clone, Default)]
pub struct MockGateway;

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {})
    }

    fn sample_payload(order_id: &str) -> RawTransaction {
        let receipt_number: u32 = rand::thread_rng().gen_range(100_000..999_999);
        let payload = serde_json::json!({
            "date": "2025-03-14 09:21",
            "amountUSD": "250.00",
            "feeUSD": "5.00",
            "totalAmount": "255.00",
            "exchangeRate": "128.40",
            "receivedAmount": "32100.00",
            "senderInfo": {
                "senderName": "Abel Tesfaye",
                "phoneNumber": "+1 301-555-0142",
                "senderType": "Individual"
            },
            "receiverInfo": {
                "receiverName": "Hanna Bekele",
                "accountNumber": "1000234567890",
                "transactionStatus": "Completed"
            },
            "transactionDetails": {
                "orderID": order_id,
                "paymentDate": "2025-03-14 09:24",
                "settledAmount": "32100.00",
                "charges": "0%",
                "receiptNumber": format!("RCPT-{receipt_number}"),
                "totalAmountPaid": "32100.00"
            },
            "additionalPaymentDetails": {
                "totalAmountInWord": "Thirty two thousand one hundred birr only",
                "paymentMode": "Bank Transfer",
                "paymentReason": "Family Support",
                "paymentChannel": "Agent",
                "destinationBank": "Commercial Bank of Ethiopia"
            }
        });
        serde_json::from_value(payload).unwrap_or_default()
    }
}

#[async_trait]
impl ReceiptGateway for MockGateway {
    async fn fetch_by_reference(&self, order_id: &str) -> Result<LookupEnvelope> {
        // simulate network latency
        sleep(Duration::from_millis(200)).await;
        Ok(LookupEnvelope {
            success: true,
            data: Some(Self::sample_payload(order_id)),
        })
    }
}
