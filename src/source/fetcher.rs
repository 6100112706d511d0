//! Describe Fetcher
//!
//! Drives a paginated describe call to completion. Every page goes through the
//! shared [`LimitBucket`] and races the caller's cancellation token.

use super::error::{SourceError, SourceResult};
use super::kind::ResourceKind;
use crate::aws::client::{DescribeClient, TransportError};
use crate::aws::limit::{LimitBucket, LimitError};
use serde::de::{DeserializeOwned, Error as _};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// Continuation token field, in both requests and responses
pub const NEXT_TOKEN_FIELD: &str = "nextToken";

/// One page of a describe response
#[derive(Debug)]
pub struct Page<R> {
    pub records: Vec<R>,
    pub next_token: Option<String>,
}

/// Decode a describe response into a page
///
/// A missing records field is an empty page; a missing or empty token ends
/// pagination.
pub fn read_page<R: DeserializeOwned>(
    response: Value,
    records_field: &str,
) -> Result<Page<R>, serde_json::Error> {
    let Value::Object(mut body) = response else {
        return Err(serde_json::Error::custom(
            "describe response is not a JSON object",
        ));
    };

    let records = match body.remove(records_field) {
        Some(Value::Null) | None => Vec::new(),
        Some(records) => serde_json::from_value(records)?,
    };

    let next_token = body
        .get(NEXT_TOKEN_FIELD)
        .and_then(|v| v.as_str())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string());

    Ok(Page {
        records,
        next_token,
    })
}

/// Fetch every page for `input` and return the records in provider order
///
/// Cancellation discards whatever pages were already collected.
pub async fn describe_all<K: ResourceKind>(
    client: &dyn DescribeClient,
    limit: &LimitBucket,
    cancel: &CancellationToken,
    scope: &str,
    input: &K::Input,
) -> SourceResult<Vec<K::Record>> {
    let cancelled = || SourceError::Cancelled {
        item_type: K::ITEM_TYPE.to_string(),
        scope: scope.to_string(),
    };
    let upstream = |source: TransportError| SourceError::Upstream {
        item_type: K::ITEM_TYPE.to_string(),
        scope: scope.to_string(),
        operation: K::OPERATION.to_string(),
        source,
    };

    let base = serde_json::to_value(input).map_err(|e| upstream(e.into()))?;
    let mut records = Vec::new();
    let mut next_token: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        let mut request = base.clone();
        if let (Value::Object(map), Some(token)) = (&mut request, &next_token) {
            map.insert(NEXT_TOKEN_FIELD.to_string(), Value::String(token.clone()));
        }

        let permit = limit.acquire(cancel).await.map_err(|e| match e {
            LimitError::Cancelled => cancelled(),
            LimitError::Closed => upstream(TransportError::Other(e.to_string())),
        })?;

        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(cancelled()),
            response = client.describe(K::OPERATION, &request) => response.map_err(upstream)?,
        };
        drop(permit);

        let page: Page<K::Record> =
            read_page(response, K::RECORDS_FIELD).map_err(|e| upstream(e.into()))?;
        page_number += 1;

        tracing::debug!(
            "{} page {} in {}: {} records",
            K::OPERATION,
            page_number,
            scope,
            page.records.len()
        );

        records.extend(page.records);

        match page.next_token {
            Some(token) if next_token.as_deref() == Some(token.as_str()) => {
                return Err(upstream(TransportError::Other(format!(
                    "{} returned the same nextToken {:?} twice",
                    K::OPERATION,
                    token
                ))));
            }
            Some(token) => next_token = Some(token),
            None => break,
        }
    }

    Ok(records)
}
