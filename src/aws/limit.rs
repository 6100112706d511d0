//! Request limiting
//!
//! A [`LimitBucket`] is shared by every source talking to the same account so the
//! number of in-flight describe calls stays bounded across all of them.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio_util::sync::CancellationToken;

/// Default number of concurrent describe calls
pub const DEFAULT_MAX_IN_FLIGHT: usize = 10;

/// Errors from waiting on the bucket
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LimitError {
    #[error("cancelled while waiting for a request slot")]
    Cancelled,

    #[error("request limiter has been closed")]
    Closed,
}

/// Limiter settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitConfig {
    /// Maximum requests in flight at once
    pub max_in_flight: usize,
    /// Optional steady request rate
    #[serde(default)]
    pub requests_per_second: Option<u32>,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            max_in_flight: DEFAULT_MAX_IN_FLIGHT,
            requests_per_second: None,
        }
    }
}

/// Shared request budget
pub struct LimitBucket {
    max_in_flight: usize,
    permits: Arc<Semaphore>,
    pacer: Option<DefaultDirectRateLimiter>,
}

/// A held request slot, released on drop
#[derive(Debug)]
pub struct LimitPermit {
    _permit: OwnedSemaphorePermit,
}

impl LimitBucket {
    pub fn new(config: LimitConfig) -> Self {
        let max_in_flight = config.max_in_flight.max(1);
        let pacer = config
            .requests_per_second
            .and_then(NonZeroU32::new)
            .map(|rps| RateLimiter::direct(Quota::per_second(rps)));

        Self {
            max_in_flight,
            permits: Arc::new(Semaphore::new(max_in_flight)),
            pacer,
        }
    }

    /// Wait for a request slot
    ///
    /// Resolves once a slot is free and the pace allows another request, or fails
    /// with [`LimitError::Cancelled`] as soon as `cancel` fires.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<LimitPermit, LimitError> {
        let permit = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(LimitError::Cancelled),
            permit = self.permits.clone().acquire_owned() => {
                permit.map_err(|_| LimitError::Closed)?
            }
        };

        if let Some(pacer) = &self.pacer {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(LimitError::Cancelled),
                _ = pacer.until_ready() => {}
            }
        }

        Ok(LimitPermit { _permit: permit })
    }

    /// Free slots right now
    pub fn available(&self) -> usize {
        self.permits.available_permits()
    }

    /// Slots currently held
    pub fn in_flight(&self) -> usize {
        self.max_in_flight - self.available()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Stop handing out slots; pending and future waits fail with [`LimitError::Closed`]
    pub fn close(&self) {
        self.permits.close();
    }
}

impl Default for LimitBucket {
    fn default() -> Self {
        Self::new(LimitConfig::default())
    }
}
