//! directconnect-connection

use super::{location_rule, mac_sec_secrets, tags_to_map, MacSecKey, Tag, SECRET_PROPAGATION};
use crate::source::links::optional;
use crate::source::{BlastPropagation, LinkRule, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A dedicated or hosted Direct Connect connection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub connection_id: Option<String>,
    pub connection_name: Option<String>,
    pub connection_state: Option<String>,
    pub owner_account: Option<String>,
    pub region: Option<String>,
    pub location: Option<String>,
    pub bandwidth: Option<String>,
    pub vlan: Option<i64>,
    pub partner_name: Option<String>,
    pub provider_name: Option<String>,
    /// Seconds since the epoch
    pub loa_issue_time: Option<f64>,
    pub lag_id: Option<String>,
    pub aws_device: Option<String>,
    pub aws_device_v2: Option<String>,
    pub aws_logical_device_id: Option<String>,
    pub jumbo_frame_capable: Option<bool>,
    pub has_logical_redundancy: Option<String>,
    pub mac_sec_capable: Option<bool>,
    pub port_encryption_status: Option<String>,
    pub encryption_mode: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mac_sec_keys: Vec<MacSecKey>,
    /// Read through [`ResourceKind::tags`]; never part of the attributes, even
    /// when the connection is nested inside a LAG
    #[serde(default, skip_serializing)]
    pub tags: Vec<Tag>,
}

/// Body of `DescribeConnections`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeConnectionsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
}

pub struct ConnectionKind;

const CONNECTION_LINKS: &[LinkRule<Connection>] = &[
    // A connection in a LAG goes down with it, and pulling the connection
    // degrades the LAG
    LinkRule::get(
        "directconnect-lag",
        BlastPropagation::new(true, true),
        |c| optional(&c.lag_id),
    ),
    location_rule(|c| optional(&c.location)),
    // The LOA only exists once it has been issued
    LinkRule::get(
        "directconnect-loa",
        BlastPropagation::new(true, false),
        |c| match c.loa_issue_time {
            Some(_) => optional(&c.connection_id),
            None => Vec::new(),
        },
    ),
    LinkRule::search_arn("secretsmanager-secret", SECRET_PROPAGATION, |c| {
        mac_sec_secrets(&c.mac_sec_keys)
    }),
];

impl ResourceKind for ConnectionKind {
    type Record = Connection;
    type Input = DescribeConnectionsInput;

    const ITEM_TYPE: &'static str = "directconnect-connection";
    const UNIQUE_ATTRIBUTE: &'static str = "connectionId";
    const OPERATION: &'static str = "DescribeConnections";
    const RECORDS_FIELD: &'static str = "connections";
    const ARN_RESOURCE_TYPE: &'static str = "dxcon";

    fn get_input(query: &str) -> Self::Input {
        DescribeConnectionsInput {
            connection_id: Some(query.to_string()),
        }
    }

    fn list_input() -> Self::Input {
        DescribeConnectionsInput::default()
    }

    fn tags(record: &Connection) -> BTreeMap<String, String> {
        tags_to_map(&record.tags)
    }

    fn link_rules() -> &'static [LinkRule<Connection>] {
        CONNECTION_LINKS
    }
}
