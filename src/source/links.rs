//! Link rules
//!
//! Each resource kind declares its relationships as a static table of
//! [`LinkRule`]s. The mapper walks the table in order, so the rules are the only
//! place link targets, methods and blast propagation are decided.

use super::item::{BlastPropagation, LinkedItemQuery, Query, QueryMethod};
use crate::aws::arn::Arn;

/// Where a linked query's scope comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkScope {
    /// Same scope as the item being mapped
    Item,
    /// The scope of the ARN held in the field
    Arn,
}

/// One relationship from a record to another item type
pub struct LinkRule<R> {
    pub target_type: &'static str,
    pub method: QueryMethod,
    pub scope: LinkScope,
    pub blast_propagation: BlastPropagation,
    /// Values to link to; empty when the field is absent
    pub extract: fn(&R) -> Vec<&str>,
}

impl<R> LinkRule<R> {
    /// Same-scope GET by identifier
    pub const fn get(
        target_type: &'static str,
        blast_propagation: BlastPropagation,
        extract: fn(&R) -> Vec<&str>,
    ) -> Self {
        Self {
            target_type,
            method: QueryMethod::Get,
            scope: LinkScope::Item,
            blast_propagation,
            extract,
        }
    }

    /// SEARCH by ARN, scoped to wherever the ARN lives
    pub const fn search_arn(
        target_type: &'static str,
        blast_propagation: BlastPropagation,
        extract: fn(&R) -> Vec<&str>,
    ) -> Self {
        Self {
            target_type,
            method: QueryMethod::Search,
            scope: LinkScope::Arn,
            blast_propagation,
            extract,
        }
    }

    /// Build the linked queries this rule yields for `record`
    ///
    /// ARN-scoped values that fail to parse, or carry no account to scope them
    /// by, are dropped; one bad reference must not cost the item its other links.
    pub fn apply(&self, record: &R, item_scope: &str) -> Vec<LinkedItemQuery> {
        (self.extract)(record)
            .into_iter()
            .filter(|value| !value.is_empty())
            .filter_map(|value| {
                let scope = match self.scope {
                    LinkScope::Item => item_scope.to_string(),
                    LinkScope::Arn => match Arn::parse(value) {
                        Ok(arn) if !arn.account_id.is_empty() => arn.scope(),
                        Ok(_) => {
                            tracing::debug!(
                                "skipping {} link from scope {}: {:?} has no account",
                                self.target_type,
                                item_scope,
                                value
                            );
                            return None;
                        }
                        Err(e) => {
                            tracing::debug!(
                                "skipping {} link from scope {}: {}",
                                self.target_type,
                                item_scope,
                                e
                            );
                            return None;
                        }
                    },
                };

                Some(LinkedItemQuery {
                    query: Query {
                        item_type: self.target_type.to_string(),
                        method: self.method,
                        query: value.to_string(),
                        scope,
                    },
                    blast_propagation: self.blast_propagation,
                })
            })
            .collect()
    }
}

/// Helper for extractors over a single optional field
pub fn optional(value: &Option<String>) -> Vec<&str> {
    value.as_deref().into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Record {
        lag_id: Option<String>,
        secrets: Vec<String>,
    }

    const LAG: LinkRule<Record> =
        LinkRule::get("directconnect-lag", BlastPropagation::new(true, true), |r| {
            optional(&r.lag_id)
        });

    const SECRET: LinkRule<Record> = LinkRule::search_arn(
        "secretsmanager-secret",
        BlastPropagation::new(true, false),
        |r| r.secrets.iter().map(String::as_str).collect(),
    );

    #[test]
    fn test_absent_field_yields_nothing() {
        let record = Record {
            lag_id: None,
            secrets: vec![],
        };
        assert!(LAG.apply(&record, "1.eu-west-2").is_empty());
        assert!(SECRET.apply(&record, "1.eu-west-2").is_empty());
    }

    #[test]
    fn test_get_link_uses_item_scope() {
        let record = Record {
            lag_id: Some("dxlag-1".to_string()),
            secrets: vec![],
        };
        let links = LAG.apply(&record, "1.eu-west-2");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].query.method, QueryMethod::Get);
        assert_eq!(links[0].query.query, "dxlag-1");
        assert_eq!(links[0].query.scope, "1.eu-west-2");
        assert_eq!(links[0].blast_propagation, BlastPropagation::new(true, true));
    }

    #[test]
    fn test_arn_link_uses_arn_scope_and_skips_bad_values() {
        let record = Record {
            lag_id: None,
            secrets: vec![
                "not-an-arn".to_string(),
                "arn:aws:secretsmanager:us-east-1:222:secret:dx-ckn".to_string(),
            ],
        };
        let links = SECRET.apply(&record, "1.eu-west-2");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].query.method, QueryMethod::Search);
        assert_eq!(links[0].query.scope, "222.us-east-1");
        assert_eq!(
            links[0].query.query,
            "arn:aws:secretsmanager:us-east-1:222:secret:dx-ckn"
        );
    }

    #[test]
    fn test_arn_without_account_is_skipped() {
        let record = Record {
            lag_id: None,
            secrets: vec![
                "arn:aws:secretsmanager:::secret:k".to_string(),
                "arn:aws:secretsmanager:eu-west-2:333:secret:kept".to_string(),
            ],
        };
        let links = SECRET.apply(&record, "1.eu-west-2");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].query.scope, "333.eu-west-2");
        assert!(links.iter().all(|link| !link.query.scope.is_empty()));
    }

    #[test]
    fn test_empty_values_are_ignored() {
        let record = Record {
            lag_id: Some(String::new()),
            secrets: vec![],
        };
        assert!(LAG.apply(&record, "1.eu-west-2").is_empty());
    }
}
