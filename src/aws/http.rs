//! HTTP utilities for AWS JSON protocol calls

use super::client::TransportError;
use reqwest::Client;
use serde_json::Value;

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

const AMZ_JSON_CONTENT_TYPE: &str = "application/x-amz-json-1.1";

/// Sanitize response body for logging
/// Truncates long responses and drops non-printable characters
fn sanitize_for_log(body: &str) -> String {
    let truncated = if body.len() > MAX_LOG_BODY_LENGTH {
        let cut = (0..=MAX_LOG_BODY_LENGTH)
            .rev()
            .find(|idx| body.is_char_boundary(*idx))
            .unwrap_or(0);
        format!("{}... [truncated, {} bytes total]", &body[..cut], body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Pull the error code and message out of an AWS JSON error body
///
/// `__type` may be namespaced (`com.amazonaws.directconnect#DirectConnectClientException`),
/// only the part after `#` is kept.
fn parse_error_body(body: &str) -> (String, String) {
    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);

    let code = parsed
        .get("__type")
        .and_then(|v| v.as_str())
        .map(|t| t.rsplit('#').next().unwrap_or(t).to_string())
        .unwrap_or_else(|| "UnknownError".to_string());

    let message = parsed
        .get("message")
        .or_else(|| parsed.get("Message"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    (code, message)
}

/// HTTP client wrapper for AWS JSON 1.1 calls
#[derive(Clone)]
pub struct AwsHttpClient {
    client: Client,
}

impl AwsHttpClient {
    /// Create a new HTTP client
    pub fn new() -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(concat!("dxsource/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// POST a JSON 1.1 request with the given `X-Amz-Target`
    pub async fn post_json(
        &self,
        url: &str,
        target: &str,
        body: &Value,
    ) -> Result<Value, TransportError> {
        tracing::debug!("POST {} ({})", url, target);

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, AMZ_JSON_CONTENT_TYPE)
            .header("X-Amz-Target", target)
            .body(serde_json::to_vec(body)?)
            .send()
            .await?;

        let status = response.status();
        let response_body = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error: {} - {}", status, sanitize_for_log(&response_body));
            let (code, message) = parse_error_body(&response_body);
            return Err(TransportError::Service {
                target: target.to_string(),
                status: status.as_u16(),
                code,
                message,
            });
        }

        if response_body.is_empty() {
            return Ok(Value::Object(serde_json::Map::new()));
        }

        Ok(serde_json::from_str(&response_body)?)
    }
}

/// Format a transport error for display
///
/// Keeps the status-specific advice short and avoids echoing raw API bodies.
pub fn format_transport_error(error: &TransportError) -> String {
    let TransportError::Service { status, code, .. } = error else {
        return error.to_string();
    };

    let hint = match *status {
        400 if code.contains("Throttl") => "Rate limit exceeded. Lower --rps or --max-in-flight.",
        400 => "Invalid request. Check your parameters.",
        401 | 403 => "Permission denied. Check the credentials behind the endpoint.",
        404 => "Resource not found.",
        429 => "Rate limit exceeded. Please try again later.",
        500..=599 => "AWS service temporarily unavailable. Please try again.",
        _ => "Request failed. Check your network connection and try again.",
    };

    format!("{} ({})", hint, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_truncates_long_bodies() {
        let body = "x".repeat(500);
        let sanitized = sanitize_for_log(&body);
        assert!(sanitized.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(sanitized.contains("500 bytes total"));
    }

    #[test]
    fn test_sanitize_drops_control_characters() {
        assert_eq!(sanitize_for_log("a\nb\tc d"), "abc d");
    }

    #[test]
    fn test_parse_namespaced_error_type() {
        let (code, message) = parse_error_body(
            r#"{"__type":"com.amazonaws.directconnect#DirectConnectClientException","message":"Connection dxcon-x does not exist"}"#,
        );
        assert_eq!(code, "DirectConnectClientException");
        assert_eq!(message, "Connection dxcon-x does not exist");
    }

    #[test]
    fn test_parse_non_json_error_body() {
        let (code, message) = parse_error_body("<html>bad gateway</html>");
        assert_eq!(code, "UnknownError");
        assert_eq!(message, "");
    }

    #[test]
    fn test_format_transport_error_hints() {
        let err = TransportError::Service {
            target: "OvertureService.DescribeConnections".to_string(),
            status: 400,
            code: "ThrottlingException".to_string(),
            message: String::new(),
        };
        assert!(format_transport_error(&err).starts_with("Rate limit exceeded"));

        let err = TransportError::Service {
            target: "OvertureService.DescribeLags".to_string(),
            status: 503,
            code: "ServiceUnavailable".to_string(),
            message: String::new(),
        };
        assert!(format_transport_error(&err).contains("temporarily unavailable"));
    }
}
