//! AWS plumbing
//!
//! Provider-side building blocks shared by every source.
//!
//! # Module Structure
//!
//! - [`arn`] - ARN parsing
//! - [`scope`] - Scope strings (`account.region`)
//! - [`limit`] - Shared request budget for describe calls
//! - [`client`] - Describe transport trait and the JSON 1.1 client
//! - [`http`] - HTTP utilities for JSON 1.1 calls
//!
//! # Example
//!
//! ```ignore
//! use dxsource::aws::{arn::Arn, scope::format_scope};
//!
//! let arn = Arn::parse("arn:aws:directconnect:eu-west-2:123456789012:dxlag/dxlag-ffrz71kw")?;
//! assert_eq!(arn.scope(), format_scope("123456789012", "eu-west-2"));
//! ```

pub mod arn;
pub mod client;
pub mod http;
pub mod limit;
pub mod scope;
