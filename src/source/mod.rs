//! Source abstraction layer
//!
//! Turns paginated describe calls into graph items.
//!
//! # Architecture
//!
//! - [`kind`] - Per-resource-type request shapes, fields and link tables
//! - [`fetcher`] - Rate-limited pagination of describe calls
//! - [`mapper`] - Record to [`Item`] mapping
//! - [`attributes`] - Serde-based attribute projection with key normalisation
//! - [`links`] - Declarative link rules with fixed blast propagation
//! - [`describe`] - The get/list/search [`Source`] built from the above
//! - [`registry`] - Static metadata loaded from embedded JSON
//!
//! # Example
//!
//! ```ignore
//! use dxsource::directconnect::ConnectionKind;
//! use dxsource::source::{DescribeSource, Source};
//!
//! async fn list_connections(client: Arc<dyn DescribeClient>) -> SourceResult<Vec<Item>> {
//!     let limit = Arc::new(LimitBucket::default());
//!     let source = DescribeSource::<ConnectionKind>::new(client, "123456789012", "eu-west-2", limit);
//!     source.list(&CancellationToken::new(), "123456789012.eu-west-2").await
//! }
//! ```

pub mod attributes;
pub mod describe;
pub mod error;
pub mod fetcher;
pub mod item;
pub mod kind;
pub mod links;
pub mod mapper;
pub mod registry;

pub use describe::{DescribeSource, Source};
pub use error::{SourceError, SourceResult};
pub use item::{Attributes, BlastPropagation, Item, LinkedItemQuery, Query, QueryMethod};
pub use kind::ResourceKind;
pub use links::{LinkRule, LinkScope};
pub use registry::{get_all_item_types, get_metadata, SourceMetadata};
