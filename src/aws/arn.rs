//! Amazon Resource Names
//!
//! Parses `arn:partition:service:region:account-id:resource` strings. Region and
//! account may be empty (global resources), everything else must be present.

use super::scope::format_scope;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const ARN_PREFIX: &str = "arn:";
const ARN_SECTIONS: usize = 6;

/// Errors returned when a string is not a well-formed ARN
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("arn: invalid prefix in {0:?}")]
    InvalidPrefix(String),

    #[error("arn: not enough sections in {0:?}")]
    NotEnoughSections(String),

    #[error("arn: empty {section} in {input:?}")]
    EmptySection { section: &'static str, input: String },
}

/// A parsed ARN
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Arn {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account_id: String,
    pub resource: String,
}

impl Arn {
    /// Parse an ARN string
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if !input.starts_with(ARN_PREFIX) {
            return Err(ParseError::InvalidPrefix(input.to_string()));
        }

        let sections: Vec<&str> = input.splitn(ARN_SECTIONS, ':').collect();
        if sections.len() != ARN_SECTIONS {
            return Err(ParseError::NotEnoughSections(input.to_string()));
        }

        let required = |section: &'static str, value: &str| {
            if value.is_empty() {
                Err(ParseError::EmptySection {
                    section,
                    input: input.to_string(),
                })
            } else {
                Ok(value.to_string())
            }
        };

        Ok(Self {
            partition: required("partition", sections[1])?,
            service: required("service", sections[2])?,
            region: sections[3].to_string(),
            account_id: sections[4].to_string(),
            resource: required("resource", sections[5])?,
        })
    }

    /// The resource type prefix, e.g. `dxcon` for `dxcon/dxcon-fg5678gh`
    pub fn resource_type(&self) -> &str {
        match self.separator() {
            Some(idx) => &self.resource[..idx],
            None => "",
        }
    }

    /// The resource id with its type prefix removed
    pub fn resource_id(&self) -> &str {
        match self.separator() {
            Some(idx) => &self.resource[idx + 1..],
            None => &self.resource,
        }
    }

    /// Scope of the account and region this ARN lives in
    pub fn scope(&self) -> String {
        format_scope(&self.account_id, &self.region)
    }

    fn separator(&self) -> Option<usize> {
        self.resource.find(['/', ':'])
    }
}

impl FromStr for Arn {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Arn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.resource
        )
    }
}
