//! Resource kinds
//!
//! A [`ResourceKind`] is everything type-specific about one describe-only
//! resource: how to build its requests, where its records live in a response,
//! which fields become attributes and which fields link to other items.

use super::links::LinkRule;
use crate::aws::arn::Arn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;

pub trait ResourceKind: Send + Sync + 'static {
    /// One resource as returned by the provider
    type Record: DeserializeOwned + Serialize + Send + Sync;
    /// Describe request body
    type Input: Serialize + Send + Sync;

    /// Item type, e.g. `directconnect-connection`
    const ITEM_TYPE: &'static str;
    /// Attribute that identifies an item within its scope
    const UNIQUE_ATTRIBUTE: &'static str;
    /// Describe operation, e.g. `DescribeConnections`
    const OPERATION: &'static str;
    /// Response field holding the records
    const RECORDS_FIELD: &'static str;
    /// ARN resource type prefix for this kind, e.g. `dxcon`
    const ARN_RESOURCE_TYPE: &'static str;
    /// Record fields never copied into attributes
    const EXCLUDED_FIELDS: &'static [&'static str] = &["tags"];

    /// Request for exactly one resource
    fn get_input(query: &str) -> Self::Input;

    /// Unfiltered request
    fn list_input() -> Self::Input;

    /// Request filtered by the secondary key found in `arn`
    ///
    /// `None` means nothing of this kind can match the ARN. The default treats an
    /// ARN of this kind's own resource type as a get by id.
    fn search_input(arn: &Arn) -> Option<Self::Input> {
        (arn.resource_type() == Self::ARN_RESOURCE_TYPE).then(|| Self::get_input(arn.resource_id()))
    }

    /// Flattened provider tags
    fn tags(record: &Self::Record) -> BTreeMap<String, String>;

    /// Relationships, in the order links are emitted
    fn link_rules() -> &'static [LinkRule<Self::Record>];
}
