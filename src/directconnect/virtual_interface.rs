//! directconnect-virtual-interface

use super::{location_rule, tags_to_map, Tag};
use crate::aws::arn::Arn;
use crate::source::links::optional;
use crate::source::{BlastPropagation, LinkRule, ResourceKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A BGP peer on a virtual interface
///
/// The peer's auth key is not declared, so it never reaches the
/// item attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BgpPeer {
    pub bgp_peer_id: Option<String>,
    pub asn: Option<i64>,
    pub address_family: Option<String>,
    pub amazon_address: Option<String>,
    pub customer_address: Option<String>,
    pub bgp_peer_state: Option<String>,
    pub bgp_status: Option<String>,
    pub aws_device_v2: Option<String>,
    pub aws_logical_device_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteFilterPrefix {
    pub cidr: Option<String>,
}

/// A private, public or transit virtual interface
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualInterface {
    pub virtual_interface_id: Option<String>,
    pub virtual_interface_name: Option<String>,
    pub virtual_interface_type: Option<String>,
    pub virtual_interface_state: Option<String>,
    pub owner_account: Option<String>,
    pub region: Option<String>,
    pub connection_id: Option<String>,
    pub location: Option<String>,
    pub vlan: Option<i64>,
    pub asn: Option<i64>,
    pub amazon_side_asn: Option<i64>,
    pub auth_key: Option<String>,
    pub address_family: Option<String>,
    pub amazon_address: Option<String>,
    pub customer_address: Option<String>,
    pub customer_router_config: Option<String>,
    pub mtu: Option<i64>,
    pub jumbo_frame_capable: Option<bool>,
    pub site_link_enabled: Option<bool>,
    pub virtual_gateway_id: Option<String>,
    pub direct_connect_gateway_id: Option<String>,
    pub aws_device_v2: Option<String>,
    pub aws_logical_device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bgp_peers: Vec<BgpPeer>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub route_filter_prefixes: Vec<RouteFilterPrefix>,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Body of `DescribeVirtualInterfaces`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeVirtualInterfacesInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_interface_id: Option<String>,
}

pub struct VirtualInterfaceKind;

const VIRTUAL_INTERFACE_LINKS: &[LinkRule<VirtualInterface>] = &[
    // Traffic rides the connection; deleting the interface also changes what
    // the connection carries
    LinkRule::get(
        "directconnect-connection",
        BlastPropagation::new(true, true),
        |v| optional(&v.connection_id),
    ),
    LinkRule::get(
        "directconnect-direct-connect-gateway",
        BlastPropagation::new(true, true),
        |v| optional(&v.direct_connect_gateway_id),
    ),
    LinkRule::get(
        "ec2-vpn-gateway",
        BlastPropagation::new(true, true),
        |v| optional(&v.virtual_gateway_id),
    ),
    location_rule(|v| optional(&v.location)),
];

impl ResourceKind for VirtualInterfaceKind {
    type Record = VirtualInterface;
    type Input = DescribeVirtualInterfacesInput;

    const ITEM_TYPE: &'static str = "directconnect-virtual-interface";
    const UNIQUE_ATTRIBUTE: &'static str = "virtualInterfaceId";
    const OPERATION: &'static str = "DescribeVirtualInterfaces";
    const RECORDS_FIELD: &'static str = "virtualInterfaces";
    const ARN_RESOURCE_TYPE: &'static str = "dxvif";
    const EXCLUDED_FIELDS: &'static [&'static str] = &["tags", "authKey", "customerRouterConfig"];

    fn get_input(query: &str) -> Self::Input {
        DescribeVirtualInterfacesInput {
            virtual_interface_id: Some(query.to_string()),
            ..Default::default()
        }
    }

    fn list_input() -> Self::Input {
        DescribeVirtualInterfacesInput::default()
    }

    /// Interfaces are searched by the ARN of the connection they run over, or
    /// by their own ARN
    fn search_input(arn: &Arn) -> Option<Self::Input> {
        match arn.resource_type() {
            "dxcon" => Some(DescribeVirtualInterfacesInput {
                connection_id: Some(arn.resource_id().to_string()),
                ..Default::default()
            }),
            "dxvif" => Some(Self::get_input(arn.resource_id())),
            _ => None,
        }
    }

    fn tags(record: &VirtualInterface) -> BTreeMap<String, String> {
        tags_to_map(&record.tags)
    }

    fn link_rules() -> &'static [LinkRule<VirtualInterface>] {
        VIRTUAL_INTERFACE_LINKS
    }
}
