//! Scopes
//!
//! A scope partitions items so identifiers only need to be unique within it.
//! For AWS that is the account and region.

/// Build a scope from an account id and region
///
/// Global resources have no region and are scoped by the account alone.
pub fn format_scope(account_id: &str, region: &str) -> String {
    if region.is_empty() {
        account_id.to_string()
    } else {
        format!("{}.{}", account_id, region)
    }
}

/// Split a scope back into `(account_id, region)`
pub fn parse_scope(scope: &str) -> Option<(&str, &str)> {
    if scope.is_empty() {
        return None;
    }

    match scope.split_once('.') {
        Some((account, region)) if !account.is_empty() => Some((account, region)),
        Some(_) => None,
        None => Some((scope, "")),
    }
}
