//! directconnect-lag

use super::{location_rule, mac_sec_secrets, tags_to_map, Connection, MacSecKey, Tag, SECRET_PROPAGATION};
use crate::source::links::optional;
use crate::source::{BlastPropagation, LinkRule, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A link aggregation group bundling several connections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lag {
    pub lag_id: Option<String>,
    pub lag_name: Option<String>,
    pub lag_state: Option<String>,
    pub owner_account: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub connections_bandwidth: Option<String>,
    pub number_of_connections: Option<i64>,
    pub minimum_links: Option<i64>,
    pub provider_name: Option<String>,
    pub aws_device: Option<String>,
    pub aws_device_v2: Option<String>,
    pub aws_logical_device_id: Option<String>,
    pub allows_hosted_connections: Option<bool>,
    pub jumbo_frame_capable: Option<bool>,
    pub has_logical_redundancy: Option<String>,
    pub mac_sec_capable: Option<bool>,
    pub encryption_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mac_sec_keys: Vec<MacSecKey>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Body of `DescribeLags`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeLagsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_id: Option<String>,
}

pub struct LagKind;

const LAG_LINKS: &[LinkRule<Lag>] = &[
    location_rule(|l| optional(&l.location)),
    // Member connections; the LAG is only as healthy as its minimum links
    LinkRule::get(
        "directconnect-connection",
        BlastPropagation::new(true, true),
        |l| {
            l.connections
                .iter()
                .filter_map(|c| c.connection_id.as_deref())
                .collect()
        },
    ),
    LinkRule::search_arn("secretsmanager-secret", SECRET_PROPAGATION, |l| {
        mac_sec_secrets(&l.mac_sec_keys)
    }),
];

impl ResourceKind for LagKind {
    type Record = Lag;
    type Input = DescribeLagsInput;

    const ITEM_TYPE: &'static str = "directconnect-lag";
    const UNIQUE_ATTRIBUTE: &'static str = "lagId";
    const OPERATION: &'static str = "DescribeLags";
    const RECORDS_FIELD: &'static str = "lags";
    const ARN_RESOURCE_TYPE: &'static str = "dxlag";

    fn get_input(query: &str) -> Self::Input {
        DescribeLagsInput {
            lag_id: Some(query.to_string()),
        }
    }

    fn list_input() -> Self::Input {
        DescribeLagsInput::default()
    }

    fn tags(record: &Lag) -> BTreeMap<String, String> {
        tags_to_map(&record.tags)
    }

    fn link_rules() -> &'static [LinkRule<Lag>] {
        LAG_LINKS
    }
}
