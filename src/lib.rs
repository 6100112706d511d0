//! dxsource
//!
//! Maps AWS Direct Connect describe calls into blast-radius graph items.
//!
//! - [`aws`] - ARNs, scopes, request limiting and the describe transport
//! - [`source`] - The generic describe-to-item engine
//! - [`directconnect`] - Direct Connect resource kinds
//! - [`config`] - Persistent user configuration

pub mod aws;
pub mod config;
pub mod directconnect;
pub mod source;

/// Version injected at compile time via DXSOURCE_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("DXSOURCE_VERSION") {
    Some(v) => v,
    None => "dev",
};
