//! Property-based tests using proptest
//!
//! These tests check ARN and scope parsing, and that record mapping is
//! deterministic with a fixed link table, over randomized records.

use dxsource::aws::arn::Arn;
use dxsource::aws::scope::{format_scope, parse_scope};
use dxsource::directconnect::{Connection, ConnectionKind, VirtualInterface, VirtualInterfaceKind};
use dxsource::source::mapper::map_record;
use dxsource::source::{BlastPropagation, Item};
use proptest::prelude::*;
use serde_json::{json, Value};

const SCOPE: &str = "123456789012.eu-west-2";

fn arb_account() -> impl Strategy<Value = String> {
    "[0-9]{12}"
}

fn arb_region() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{2}-[a-z]{4,9}-[1-4]",
    ]
}

/// Connection records with every optional reference independently present
fn arb_connection() -> impl Strategy<Value = Value> {
    (
        "dxcon-[a-z0-9]{8}",
        proptest::option::of("dxlag-[a-z0-9]{8}"),
        proptest::option::of("[A-Za-z]{3,5}[0-9]"),
        proptest::option::of(1_600_000_000.0f64..1_800_000_000.0),
        proptest::collection::vec(
            prop_oneof![
                "arn:aws:secretsmanager:[a-z]{2}-[a-z]{4}-[1-3]:[0-9]{12}:secret:[a-z]{4}",
                "[a-z ]{0,12}",
            ],
            0..3,
        ),
        proptest::collection::btree_map("[a-z]{1,6}", "[a-z0-9]{0,6}", 0..4),
    )
        .prop_map(|(id, lag, location, loa, secrets, tags)| {
            json!({
                "connectionId": id,
                "connectionState": "available",
                "lagId": lag,
                "location": location,
                "loaIssueTime": loa,
                "macSecKeys": secrets.iter().map(|s| json!({"secretARN": s})).collect::<Vec<_>>(),
                "tags": tags.iter().map(|(k, v)| json!({"key": k, "value": v})).collect::<Vec<_>>(),
            })
        })
}

fn arb_virtual_interface() -> impl Strategy<Value = Value> {
    (
        "dxvif-[a-z0-9]{8}",
        proptest::option::of("dxcon-[a-z0-9]{8}"),
        proptest::option::of("[a-f0-9]{8}-[a-f0-9]{4}"),
        proptest::option::of("vgw-[a-f0-9]{8}"),
        prop_oneof!["private", "public", "transit"],
    )
        .prop_map(|(id, connection, dxgw, vgw, kind)| {
            json!({
                "virtualInterfaceId": id,
                "connectionId": connection,
                "directConnectGatewayId": dxgw,
                "virtualGatewayId": vgw,
                "virtualInterfaceType": kind,
                "authKey": "s3cret",
                "customerRouterConfig": "<config/>",
            })
        })
}

fn expected_propagation(target_type: &str) -> BlastPropagation {
    match target_type {
        "directconnect-lag"
        | "directconnect-connection"
        | "directconnect-direct-connect-gateway"
        | "ec2-vpn-gateway" => BlastPropagation::new(true, true),
        "directconnect-location" | "directconnect-loa" | "secretsmanager-secret" => {
            BlastPropagation::new(true, false)
        }
        other => panic!("unexpected link target {other}"),
    }
}

fn assert_links_fixed(item: &Item) {
    for link in &item.linked_item_queries {
        assert_eq!(
            link.blast_propagation,
            expected_propagation(&link.query.item_type),
            "link to {}",
            link.query.item_type
        );
        assert!(!link.query.query.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Parsing then printing an ARN gives back the same string
    #[test]
    fn arn_display_round_trips(
        service in "[a-z]{2,12}",
        region in arb_region(),
        account in prop_oneof![Just(String::new()), arb_account()],
        resource in "[a-z]{2,6}[/:][A-Za-z0-9:/_-]{1,20}",
    ) {
        let input = format!("arn:aws:{}:{}:{}:{}", service, region, account, resource);
        let arn = Arn::parse(&input).unwrap();

        prop_assert_eq!(arn.to_string(), input);
        prop_assert_eq!(arn.scope(), format_scope(&account, &region));
    }

    /// Anything without the arn: prefix is rejected
    #[test]
    fn non_arns_are_rejected(input in "[a-z0-9:/-]{0,40}") {
        prop_assume!(!input.starts_with("arn:"));
        prop_assert!(Arn::parse(&input).is_err());
    }

    /// Scopes split back into the parts they were built from
    #[test]
    fn scope_round_trips(account in arb_account(), region in arb_region()) {
        let scope = format_scope(&account, &region);
        prop_assert_eq!(parse_scope(&scope), Some((account.as_str(), region.as_str())));
    }

    /// Mapping the same record twice gives byte-identical items
    #[test]
    fn mapping_is_deterministic(record in arb_connection()) {
        let connection: Connection = serde_json::from_value(record).unwrap();

        let first = map_record::<ConnectionKind>(SCOPE, &connection).unwrap();
        let second = map_record::<ConnectionKind>(SCOPE, &connection).unwrap();

        prop_assert_eq!(
            serde_json::to_vec(&first).unwrap(),
            serde_json::to_vec(&second).unwrap()
        );
    }

    /// Every connection item is addressable and its links use the fixed table
    #[test]
    fn connection_items_are_well_formed(record in arb_connection()) {
        let connection: Connection = serde_json::from_value(record).unwrap();
        let item = map_record::<ConnectionKind>(SCOPE, &connection).unwrap();

        prop_assert_eq!(item.unique_attribute_value(), connection.connection_id.clone());
        prop_assert_eq!(item.scope.as_str(), SCOPE);
        prop_assert!(!item.attributes.contains_key("tags"));
        assert_links_fixed(&item);

        // A malformed secret reference never costs the item its other links
        prop_assert_eq!(
            item.links_to("directconnect-lag").count(),
            usize::from(connection.lag_id.is_some())
        );
        prop_assert_eq!(
            item.links_to("directconnect-location").count(),
            usize::from(connection.location.is_some())
        );
        prop_assert_eq!(
            item.links_to("directconnect-loa").count(),
            usize::from(connection.loa_issue_time.is_some())
        );

        let valid_secrets = connection
            .mac_sec_keys
            .iter()
            .filter_map(|k| k.secret_arn.as_deref())
            .filter(|s| Arn::parse(s).is_ok_and(|arn| !arn.account_id.is_empty()))
            .count();
        prop_assert_eq!(item.links_to("secretsmanager-secret").count(), valid_secrets);
    }

    /// Credentials never reach virtual interface attributes
    #[test]
    fn virtual_interface_items_hide_credentials(record in arb_virtual_interface()) {
        let vif: VirtualInterface = serde_json::from_value(record).unwrap();
        let item = map_record::<VirtualInterfaceKind>(SCOPE, &vif).unwrap();

        prop_assert!(!item.attributes.contains_key("authKey"));
        prop_assert!(!item.attributes.contains_key("customerRouterConfig"));
        assert_links_fixed(&item);
    }
}
