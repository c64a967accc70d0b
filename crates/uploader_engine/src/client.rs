use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uploader_core::{PublishPayload, Receipt};

use crate::{PublishError, PublishErrorKind};

pub const DEFAULT_DAEMON_URL: &str = "http://localhost:5279";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    /// `None` blocks until the daemon answers.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DAEMON_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
        }
    }
}

/// The two daemon operations a run depends on.
#[async_trait::async_trait]
pub trait PublishClient: Send + Sync {
    /// `Ok(true)` when the daemon reports it is running.
    async fn status(&self) -> Result<bool, PublishError>;

    async fn publish(&self, payload: &PublishPayload) -> Result<Receipt, PublishError>;
}

/// JSON-RPC over HTTP client for the content daemon.
#[derive(Debug)]
pub struct ReqwestPublishClient {
    settings: ClientSettings,
    client: reqwest::Client,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct RpcRequest<'a, P: Serialize> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: P,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

impl ReqwestPublishClient {
    pub fn new(settings: ClientSettings) -> Result<Self, PublishError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| PublishError::new(PublishErrorKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.settings.endpoint
    }

    async fn call<P>(&self, method: &str, params: P) -> Result<Value, PublishError>
    where
        P: Serialize + Send,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .client
            .post(self.settings.endpoint.as_str())
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PublishError::new(
                PublishErrorKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let body: RpcResponse = response.json().await.map_err(map_reqwest_error)?;
        if let Some(error) = body.error.filter(|error| !error.is_null()) {
            return Err(daemon_error(&error));
        }
        body.result.ok_or_else(|| {
            PublishError::new(
                PublishErrorKind::InvalidResponse,
                format!("'{method}' response has neither result nor error"),
            )
        })
    }
}

#[async_trait::async_trait]
impl PublishClient for ReqwestPublishClient {
    async fn status(&self) -> Result<bool, PublishError> {
        let result = self.call("status", serde_json::json!({})).await?;
        Ok(result
            .get("is_running")
            .and_then(Value::as_bool)
            .unwrap_or(false))
    }

    async fn publish(&self, payload: &PublishPayload) -> Result<Receipt, PublishError> {
        let result = self.call("publish", payload).await?;
        parse_receipt(&result)
    }
}

fn parse_receipt(result: &Value) -> Result<Receipt, PublishError> {
    let txid = result.get("txid").and_then(Value::as_str).ok_or_else(|| {
        PublishError::new(PublishErrorKind::InvalidResponse, "publish result has no txid")
    })?;
    let claim_id = result
        .get("claim_id")
        .and_then(Value::as_str)
        .or_else(|| {
            result
                .get("outputs")
                .and_then(Value::as_array)
                .and_then(|outputs| {
                    outputs
                        .iter()
                        .find_map(|output| output.get("claim_id").and_then(Value::as_str))
                })
        })
        .ok_or_else(|| {
            PublishError::new(
                PublishErrorKind::InvalidResponse,
                "publish result has no claim_id",
            )
        })?;
    Ok(Receipt {
        txid: txid.to_string(),
        claim_id: claim_id.to_string(),
    })
}

fn daemon_error(error: &Value) -> PublishError {
    let code = error.get("code").and_then(Value::as_i64);
    let message = match error {
        Value::String(message) => message.clone(),
        other => other
            .get("message")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| other.to_string()),
    };
    PublishError::new(PublishErrorKind::Daemon { code }, message)
}

fn map_reqwest_error(err: reqwest::Error) -> PublishError {
    if err.is_timeout() {
        return PublishError::new(PublishErrorKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return PublishError::new(PublishErrorKind::InvalidResponse, err.to_string());
    }
    PublishError::new(PublishErrorKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::{daemon_error, parse_receipt};
    use crate::PublishErrorKind;
    use serde_json::json;

    #[test]
    fn receipt_reads_claim_id_from_outputs() {
        let result = json!({"txid": "tx1", "outputs": [{"type": "claim", "claim_id": "c1"}]});
        let receipt = parse_receipt(&result).unwrap();
        assert_eq!(receipt.txid, "tx1");
        assert_eq!(receipt.claim_id, "c1");
    }

    #[test]
    fn receipt_without_txid_is_invalid() {
        let err = parse_receipt(&json!({"claim_id": "c1"})).unwrap_err();
        assert_eq!(err.kind, PublishErrorKind::InvalidResponse);
    }

    #[test]
    fn daemon_error_accepts_string_or_object() {
        let err = daemon_error(&json!({"code": -32500, "message": "insufficient funds"}));
        assert_eq!(err.kind, PublishErrorKind::Daemon { code: Some(-32500) });
        assert_eq!(err.message, "insufficient funds");

        let err = daemon_error(&json!("boom"));
        assert_eq!(err.kind, PublishErrorKind::Daemon { code: None });
        assert_eq!(err.message, "boom");
    }
}
