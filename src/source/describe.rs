//! Describe-only sources
//!
//! [`DescribeSource`] answers get, list and search for any [`ResourceKind`]
//! whose provider API is a single paginated describe call.

use super::error::{SourceError, SourceResult};
use super::fetcher::describe_all;
use super::item::Item;
use super::kind::ResourceKind;
use super::mapper::{map_record, map_records};
use super::registry::{get_metadata, SourceMetadata};
use crate::aws::arn::Arn;
use crate::aws::client::DescribeClient;
use crate::aws::limit::LimitBucket;
use crate::aws::scope::format_scope;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A registered resource-type handler
#[async_trait]
pub trait Source: Send + Sync {
    /// Item type this source returns
    fn item_type(&self) -> &str;

    /// Scopes this source can answer for
    fn scopes(&self) -> Vec<String>;

    /// Declarative metadata, if registered
    fn metadata(&self) -> Option<&'static SourceMetadata> {
        get_metadata(self.item_type())
    }

    /// Get exactly one item by its unique attribute
    async fn get(&self, cancel: &CancellationToken, scope: &str, query: &str) -> SourceResult<Item>;

    /// List every item in the scope
    async fn list(&self, cancel: &CancellationToken, scope: &str) -> SourceResult<Vec<Item>>;

    /// Find items by an ARN
    async fn search(
        &self,
        cancel: &CancellationToken,
        scope: &str,
        query: &str,
    ) -> SourceResult<Vec<Item>>;
}

/// Source backed by one describe operation
pub struct DescribeSource<K: ResourceKind> {
    client: Arc<dyn DescribeClient>,
    limit: Arc<LimitBucket>,
    account_id: String,
    region: String,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> DescribeSource<K> {
    pub fn new(
        client: Arc<dyn DescribeClient>,
        account_id: &str,
        region: &str,
        limit: Arc<LimitBucket>,
    ) -> Self {
        Self {
            client,
            limit,
            account_id: account_id.to_string(),
            region: region.to_string(),
            _kind: PhantomData,
        }
    }

    /// The single scope this source serves
    pub fn scope(&self) -> String {
        format_scope(&self.account_id, &self.region)
    }

    fn check_scope(&self, scope: &str) -> SourceResult<()> {
        let served = self.scope();
        if scope == served {
            Ok(())
        } else {
            Err(SourceError::NoScope {
                item_type: K::ITEM_TYPE.to_string(),
                requested: scope.to_string(),
                served,
            })
        }
    }

    async fn describe(
        &self,
        cancel: &CancellationToken,
        scope: &str,
        input: &K::Input,
    ) -> SourceResult<Vec<Item>> {
        let records =
            describe_all::<K>(self.client.as_ref(), &self.limit, cancel, scope, input).await?;
        map_records::<K>(scope, &records)
    }
}

#[async_trait]
impl<K: ResourceKind> Source for DescribeSource<K> {
    fn item_type(&self) -> &str {
        K::ITEM_TYPE
    }

    fn scopes(&self) -> Vec<String> {
        vec![self.scope()]
    }

    async fn get(&self, cancel: &CancellationToken, scope: &str, query: &str) -> SourceResult<Item> {
        self.check_scope(scope)?;

        let not_found = || SourceError::NotFound {
            item_type: K::ITEM_TYPE.to_string(),
            scope: scope.to_string(),
            query: query.to_string(),
        };

        // Records are counted before mapping so a duplicate is reported as
        // ambiguous even when it could not be projected
        let records = match describe_all::<K>(
            self.client.as_ref(),
            &self.limit,
            cancel,
            scope,
            &K::get_input(query),
        )
        .await
        {
            Ok(records) => records,
            Err(SourceError::Upstream { source, .. }) if source.is_missing_resource() => {
                return Err(not_found());
            }
            Err(e) => return Err(e),
        };

        match records.as_slice() {
            [] => Err(not_found()),
            [record] => map_record::<K>(scope, record),
            _ => Err(SourceError::Ambiguous {
                item_type: K::ITEM_TYPE.to_string(),
                scope: scope.to_string(),
                query: query.to_string(),
                count: records.len(),
            }),
        }
    }

    async fn list(&self, cancel: &CancellationToken, scope: &str) -> SourceResult<Vec<Item>> {
        self.check_scope(scope)?;
        self.describe(cancel, scope, &K::list_input()).await
    }

    async fn search(
        &self,
        cancel: &CancellationToken,
        scope: &str,
        query: &str,
    ) -> SourceResult<Vec<Item>> {
        self.check_scope(scope)?;

        let arn = Arn::parse(query).map_err(|source| SourceError::Parse {
            item_type: K::ITEM_TYPE.to_string(),
            scope: scope.to_string(),
            query: query.to_string(),
            source,
        })?;

        // Account-less ARNs (AWS-managed resources) are valid in any scope
        if !arn.account_id.is_empty() && arn.scope() != scope {
            return Err(SourceError::ScopeMismatch {
                item_type: K::ITEM_TYPE.to_string(),
                scope: scope.to_string(),
                query: query.to_string(),
                arn_scope: arn.scope(),
            });
        }

        let Some(input) = K::search_input(&arn) else {
            tracing::debug!(
                "{} cannot be searched by {} ARNs, returning nothing",
                K::ITEM_TYPE,
                arn.resource_type()
            );
            return Ok(Vec::new());
        };

        self.describe(cancel, scope, &input).await
    }
}
