use anyhow::Result;
use async_trait::async_trait;
use fp_receipt_core::{normalize, LoadOutcome, RawTransaction};
use serde::Deserialize;

/// Response envelope of the receipt-lookup endpoint. A lookup counts as
/// successful only when `success` is true and `data` is present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LookupEnvelope {
    pub success: bool,
    pub data: Option<RawTransaction>,
}

/// Source of the bearer token attached to lookup requests. Read at request
/// time on every call; implementations must not be assumed to cache.
pub trait CredentialProvider: Send + Sync {
    fn access_token(&self) -> Option<String>;
}

/// Reads the token from an environment variable, by default
/// `FASTPAY_ACCESS_TOKEN`.
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new("FASTPAY_ACCESS_TOKEN")
    }
}

impl CredentialProvider for EnvCredentials {
    fn access_token(&self) -> Option<String> {
        std::env::var(&self.var).ok().filter(|t| !t.is_empty())
    }
}

/// Fixed token, or no token at all. Used by tests and the mock wiring.
pub struct StaticCredentials(pub Option<String>);

impl CredentialProvider for StaticCredentials {
    fn access_token(&self) -> Option<String> {
        self.0.clone()
    }
}

#[async_trait]
pub trait ReceiptGateway: Send + Sync {
    /// Issue exactly one lookup for the given order reference.
    async fn fetch_by_reference(&self, order_id: &str) -> Result<LookupEnvelope>;
}

/// Load the receipt for `order_id` through `gateway`.
///
/// Exactly one fetch attempt, no retries. Every failure class, transport
/// error, non-success envelope, or malformed payload, collapses into
/// [`LoadOutcome::NotFound`]; the caller never sees a raw error.
pub async fn load(gateway: &dyn ReceiptGateway, order_id: &str) -> LoadOutcome {
    match gateway.fetch_by_reference(order_id).await {
        Ok(LookupEnvelope {
            success: true,
            data: Some(raw),
        }) => LoadOutcome::Found(normalize(order_id, &raw)),
        Ok(envelope) => {
            tracing::warn!(
                %order_id,
                success = envelope.success,
                has_data = envelope.data.is_some(),
                "lookup returned no usable receipt"
            );
            LoadOutcome::NotFound
        }
        Err(error) => {
            tracing::warn!(%order_id, error = %error, "receipt lookup failed");
            LoadOutcome::NotFound
        }
    }
}

pub mod fastpay;
pub mod mock;

#[cfg(test)]
mod tests {
    use super::*;
    use fp_receipt_core::LoadOutcome;

    struct CannedGateway(fn() -> Result<LookupEnvelope>);

    #[async_trait]
    impl ReceiptGateway for CannedGateway {
        async fn fetch_by_reference(&self, _order_id: &str) -> Result<LookupEnvelope> {
            (self.0)()
        }
    }

    fn block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("runtime")
            .block_on(fut)
    }

    #[test]
    fn unsuccessful_envelope_collapses_to_not_found() {
        let gateway = CannedGateway(|| {
            Ok(LookupEnvelope {
                success: false,
                data: Some(RawTransaction::default()),
            })
        });
        assert_eq!(block_on(load(&gateway, "FP1")), LoadOutcome::NotFound);
    }

    #[test]
    fn missing_data_collapses_to_not_found() {
        let gateway = CannedGateway(|| {
            Ok(LookupEnvelope {
                success: true,
                data: None,
            })
        });
        assert_eq!(block_on(load(&gateway, "FP1")), LoadOutcome::NotFound);
    }

    #[test]
    fn transport_error_collapses_to_not_found() {
        let gateway = CannedGateway(|| anyhow::bail!("connection reset"));
        assert_eq!(block_on(load(&gateway, "FP1")), LoadOutcome::NotFound);
    }

    #[test]
    fn successful_envelope_yields_normalized_view() {
        let gateway = CannedGateway(|| {
            Ok(LookupEnvelope {
                success: true,
                data: Some(RawTransaction::default()),
            })
        });
        match block_on(load(&gateway, "FP77")) {
            LoadOutcome::Found(view) => {
                assert_eq!(view.order_id, "FP77");
                assert_eq!(view.sender_name, "N/A");
            }
            LoadOutcome::NotFound => panic!("expected a receipt"),
        }
    }
}
