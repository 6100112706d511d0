//! Source errors

use crate::aws::arn::ParseError;
use crate::aws::client::TransportError;
use thiserror::Error;

/// Errors surfaced by a source's get, list and search
///
/// Every variant carries the item type and scope so a failure can be diagnosed
/// without repeating the query.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{item_type} query {query:?} in scope {scope} is not a valid ARN: {source}")]
    Parse {
        item_type: String,
        scope: String,
        query: String,
        #[source]
        source: ParseError,
    },

    #[error("no {item_type} found for {query:?} in scope {scope}")]
    NotFound {
        item_type: String,
        scope: String,
        query: String,
    },

    #[error("{count} {item_type} items matched {query:?} in scope {scope}, expected exactly one")]
    Ambiguous {
        item_type: String,
        scope: String,
        query: String,
        count: usize,
    },

    #[error("{operation} failed for {item_type} in scope {scope}: {source}")]
    Upstream {
        item_type: String,
        scope: String,
        operation: String,
        #[source]
        source: TransportError,
    },

    #[error("{item_type} query in scope {scope} was cancelled")]
    Cancelled { item_type: String, scope: String },

    #[error("could not project {item_type} record in scope {scope} into attributes: {reason}")]
    AttributeProjection {
        item_type: String,
        scope: String,
        reason: String,
    },

    #[error("{item_type} source does not serve scope {requested} (serves {served})")]
    NoScope {
        item_type: String,
        requested: String,
        served: String,
    },

    #[error("ARN {query:?} belongs to scope {arn_scope}, not {scope}")]
    ScopeMismatch {
        item_type: String,
        scope: String,
        query: String,
        arn_scope: String,
    },
}

impl SourceError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }
}

/// Result type for source operations
pub type SourceResult<T> = Result<T, SourceError>;
