//! Shared test doubles for the describe transport

#![allow(dead_code)]

use async_trait::async_trait;
use dxsource::aws::client::{DescribeClient, TransportError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Serves canned pages keyed by operation and continuation token
#[derive(Default)]
pub struct PagedClient {
    pages: HashMap<(String, Option<String>), Value>,
    requests: Mutex<Vec<(String, Value)>>,
    delay: Option<Duration>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl PagedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `operation` with `response` when the request carries `token`
    pub fn page(mut self, operation: &str, token: Option<&str>, response: Value) -> Self {
        self.pages.insert(
            (operation.to_string(), token.map(|t| t.to_string())),
            response,
        );
        self
    }

    /// Hold every call for `delay` before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DescribeClient for PagedClient {
    async fn describe(&self, operation: &str, input: &Value) -> Result<Value, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((operation.to_string(), input.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let token = input
            .get("nextToken")
            .and_then(|v| v.as_str())
            .map(|t| t.to_string());

        self.pages
            .get(&(operation.to_string(), token))
            .cloned()
            .ok_or_else(|| TransportError::Other(format!("no canned page for {}", operation)))
    }
}

/// Always fails like the service would
pub struct FailingClient;

#[async_trait]
impl DescribeClient for FailingClient {
    async fn describe(&self, operation: &str, _input: &Value) -> Result<Value, TransportError> {
        Err(TransportError::Service {
            target: format!("OvertureService.{}", operation),
            status: 400,
            code: "DirectConnectClientException".to_string(),
            message: "boom".to_string(),
        })
    }
}
