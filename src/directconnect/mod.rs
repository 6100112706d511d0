//! AWS Direct Connect sources
//!
//! Every Direct Connect resource here is describe-only: one paginated
//! `Describe*` call serves get, list and search.

mod connection;
mod lag;
mod virtual_interface;

pub use connection::{Connection, ConnectionKind, DescribeConnectionsInput};
pub use lag::{DescribeLagsInput, Lag, LagKind};
pub use virtual_interface::{
    BgpPeer, DescribeVirtualInterfacesInput, RouteFilterPrefix, VirtualInterface,
    VirtualInterfaceKind,
};

use crate::aws::client::DescribeClient;
use crate::aws::limit::LimitBucket;
use crate::source::{BlastPropagation, DescribeSource, LinkRule, Source};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A Direct Connect resource tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

/// MAC Security key attached to a connection or LAG
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacSecKey {
    #[serde(rename = "secretARN", default)]
    pub secret_arn: Option<String>,
    #[serde(default)]
    pub ckn: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub start_on: Option<String>,
}

/// Flatten Direct Connect tags; a tag without a value maps to `""`
pub fn tags_to_map(tags: &[Tag]) -> BTreeMap<String, String> {
    tags.iter()
        .map(|tag| (tag.key.clone(), tag.value.clone().unwrap_or_default()))
        .collect()
}

fn mac_sec_secrets(keys: &[MacSecKey]) -> Vec<&str> {
    keys.iter().filter_map(|key| key.secret_arn.as_deref()).collect()
}

/// Changes to the location affect the resource, never the other way round
const LOCATION_PROPAGATION: BlastPropagation = BlastPropagation::new(true, false);

/// A rotated or deleted MACsec secret breaks the link; the secret doesn't care
const SECRET_PROPAGATION: BlastPropagation = BlastPropagation::new(true, false);

const fn location_rule<R>(extract: fn(&R) -> Vec<&str>) -> LinkRule<R> {
    LinkRule::get("directconnect-location", LOCATION_PROPAGATION, extract)
}

/// Build every Direct Connect source for one account and region
///
/// All sources share `client` and `limit`.
pub fn sources(
    client: Arc<dyn DescribeClient>,
    account_id: &str,
    region: &str,
    limit: Arc<LimitBucket>,
) -> Vec<Arc<dyn Source>> {
    vec![
        Arc::new(DescribeSource::<ConnectionKind>::new(
            client.clone(),
            account_id,
            region,
            limit.clone(),
        )),
        Arc::new(DescribeSource::<LagKind>::new(
            client.clone(),
            account_id,
            region,
            limit.clone(),
        )),
        Arc::new(DescribeSource::<VirtualInterfaceKind>::new(
            client, account_id, region, limit,
        )),
    ]
}
