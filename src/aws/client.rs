//! Describe Client
//!
//! The transport seam between sources and the provider. Sources only ever hand
//! an operation name and a JSON input to a [`DescribeClient`] and get the JSON
//! page back.

use super::http::AwsHttpClient;
use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// `X-Amz-Target` prefix used by the Direct Connect JSON API
pub const DIRECTCONNECT_TARGET_PREFIX: &str = "OvertureService";

/// Errors raised by a describe transport
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("failed to send request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{target} returned {status}: {code} {message}")]
    Service {
        target: String,
        status: u16,
        code: String,
        message: String,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{0}")]
    Other(String),
}

/// Error code Direct Connect uses for bad input, including unknown ids
const CLIENT_EXCEPTION: &str = "DirectConnectClientException";

impl TransportError {
    /// Whether the provider rejected the request because the resource it names
    /// does not exist
    ///
    /// Direct Connect answers a describe for an unknown id with a 400 client
    /// exception rather than an empty page.
    pub fn is_missing_resource(&self) -> bool {
        match self {
            Self::Service {
                status: 400,
                code,
                message,
                ..
            } => code == CLIENT_EXCEPTION && message.contains("does not exist"),
            _ => false,
        }
    }
}

/// Provider transport for paginated describe calls
#[async_trait]
pub trait DescribeClient: Send + Sync {
    /// Invoke `operation` (e.g. `DescribeConnections`) with a JSON input object
    async fn describe(&self, operation: &str, input: &Value) -> Result<Value, TransportError>;
}

/// Describe client speaking the AWS JSON 1.1 protocol
///
/// Request signing is left to whatever sits behind `endpoint` (a signing proxy,
/// LocalStack, a recorded fixture server).
#[derive(Clone)]
pub struct AwsJsonClient {
    http: AwsHttpClient,
    endpoint: Url,
    target_prefix: String,
}

impl AwsJsonClient {
    /// Create a client for an explicit endpoint
    pub fn new(endpoint: &str) -> Result<Self, TransportError> {
        let endpoint = Url::parse(endpoint).map_err(|source| TransportError::Endpoint {
            endpoint: endpoint.to_string(),
            source,
        })?;

        Ok(Self {
            http: AwsHttpClient::new()?,
            endpoint,
            target_prefix: DIRECTCONNECT_TARGET_PREFIX.to_string(),
        })
    }

    /// Create a client for the public Direct Connect endpoint of `region`
    pub fn for_region(region: &str) -> Result<Self, TransportError> {
        Self::new(&default_endpoint(region))
    }

    /// Override the `X-Amz-Target` prefix
    pub fn with_target_prefix(mut self, prefix: &str) -> Self {
        self.target_prefix = prefix.to_string();
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl DescribeClient for AwsJsonClient {
    async fn describe(&self, operation: &str, input: &Value) -> Result<Value, TransportError> {
        let target = format!("{}.{}", self.target_prefix, operation);
        self.http
            .post_json(self.endpoint.as_str(), &target, input)
            .await
    }
}

/// Public Direct Connect endpoint for a region
pub fn default_endpoint(region: &str) -> String {
    if region.starts_with("cn-") {
        format!("https://directconnect.{}.amazonaws.com.cn/", region)
    } else {
        format!("https://directconnect.{}.amazonaws.com/", region)
    }
}
