use super::{CredentialProvider, LookupEnvelope, ReceiptGateway};
use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

// Endpoint path as deployed, misspelling included.
const LOOKUP_PATH: &str = "/moneyTranasfer/agent/getTransactionByReference";

/// Gateway backed by the FastPay agent API.
pub struct FastpayGateway {
    base_url: String,
    http_client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
}

impl FastpayGateway {
    pub fn new(base_url: String, credentials: Arc<dyn CredentialProvider>) -> Arc<Self> {
        Arc::new(Self {
            base_url,
            http_client: reqwest::Client::new(),
            credentials,
        })
    }
}

#[async_trait]
impl ReceiptGateway for FastpayGateway {
    async fn fetch_by_reference(&self, order_id: &str) -> Result<LookupEnvelope> {
        let lookup_url = format!("{}{}", self.base_url, LOOKUP_PATH);

        let mut request = self
            .http_client
            .get(&lookup_url)
            .query(&[("fastPayOrderId", order_id)]);

        // Token read fresh on every request, never cached here.
        if let Some(token) = self.credentials.access_token() {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let resp = request
            .send()
            .await
            .context("Failed to reach the receipt lookup endpoint")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("Receipt lookup failed: {} - {}", status, body);
        }

        let envelope: LookupEnvelope = resp
            .json()
            .await
            .context("Failed to parse lookup response")?;

        tracing::debug!(
            %order_id,
            success = envelope.success,
            has_data = envelope.data.is_some(),
            "receipt lookup completed"
        );

        Ok(envelope)
    }
}
