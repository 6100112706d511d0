//! Item Mapper
//!
//! Turns raw records into [`Item`]s. Mapping is a pure function of the record
//! and the scope, so records can be mapped in any order or in parallel.

use super::attributes::to_attributes;
use super::error::{SourceError, SourceResult};
use super::item::Item;
use super::kind::ResourceKind;

/// Map one record
pub fn map_record<K: ResourceKind>(scope: &str, record: &K::Record) -> SourceResult<Item> {
    let attributes =
        to_attributes(record, K::EXCLUDED_FIELDS).map_err(|e| SourceError::AttributeProjection {
            item_type: K::ITEM_TYPE.to_string(),
            scope: scope.to_string(),
            reason: e.to_string(),
        })?;

    let mut item = Item {
        item_type: K::ITEM_TYPE.to_string(),
        unique_attribute: K::UNIQUE_ATTRIBUTE.to_string(),
        attributes,
        scope: scope.to_string(),
        tags: K::tags(record),
        linked_item_queries: Vec::new(),
    };

    if item.unique_attribute_value().is_none() {
        return Err(SourceError::AttributeProjection {
            item_type: K::ITEM_TYPE.to_string(),
            scope: scope.to_string(),
            reason: format!("unique attribute {} is missing or empty", K::UNIQUE_ATTRIBUTE),
        });
    }

    for rule in K::link_rules() {
        item.linked_item_queries.extend(rule.apply(record, scope));
    }

    Ok(item)
}

/// Map a batch of records, preserving order
///
/// A record that cannot be projected fails the whole batch.
pub fn map_records<K: ResourceKind>(scope: &str, records: &[K::Record]) -> SourceResult<Vec<Item>> {
    records
        .iter()
        .map(|record| map_record::<K>(scope, record))
        .collect()
}
