//! Source Registry - Load source metadata from JSON
//!
//! Descriptions, query support and IaC mappings are declarative, so they live in
//! embedded JSON files rather than in code.

use super::item::QueryMethod;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Embedded metadata JSON files (compiled into the binary)
const METADATA_FILES: &[&str] = &[include_str!("../resources/directconnect.json")];

/// Maps an IaC resource attribute onto a query for this type
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TerraformQueryMap {
    /// Terraform resource type, e.g. `aws_dx_connection`
    pub resource: String,
    /// Attribute of that resource holding the query value
    pub attribute: String,
    pub method: QueryMethod,
}

impl TerraformQueryMap {
    /// `aws_dx_connection.id`
    pub fn path(&self) -> String {
        format!("{}.{}", self.resource, self.attribute)
    }
}

/// Static metadata for one source type
#[derive(Debug, Clone, Deserialize)]
pub struct SourceMetadata {
    /// Filled from the map key while loading
    #[serde(skip)]
    pub item_type: String,
    pub descriptive_name: String,
    #[serde(default)]
    pub group: Option<String>,
    /// Description of GET support, absent when unsupported
    #[serde(default)]
    pub get: Option<String>,
    #[serde(default)]
    pub list: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub terraform_query_map: Vec<TerraformQueryMap>,
}

impl SourceMetadata {
    /// Query methods this type answers
    pub fn supported_methods(&self) -> Vec<QueryMethod> {
        [
            (QueryMethod::Get, &self.get),
            (QueryMethod::List, &self.list),
            (QueryMethod::Search, &self.search),
        ]
        .into_iter()
        .filter(|(_, description)| description.is_some())
        .map(|(method, _)| method)
        .collect()
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    #[serde(default)]
    pub sources: HashMap<String, SourceMetadata>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<MetadataConfig> = OnceLock::new();

/// Get the metadata registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static MetadataConfig {
    REGISTRY.get_or_init(|| {
        let mut final_config = MetadataConfig {
            sources: HashMap::new(),
        };

        for content in METADATA_FILES {
            let partial: MetadataConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded metadata JSON: {}", e));
            final_config.sources.extend(partial.sources);
        }

        for (item_type, metadata) in final_config.sources.iter_mut() {
            metadata.item_type = item_type.clone();
        }

        final_config
    })
}

/// Get metadata for an item type
pub fn get_metadata(item_type: &str) -> Option<&'static SourceMetadata> {
    get_registry().sources.get(item_type)
}

/// Get all known item types, sorted
pub fn get_all_item_types() -> Vec<&'static str> {
    let mut types: Vec<&'static str> = get_registry()
        .sources
        .keys()
        .map(|s| s.as_str())
        .collect();
    types.sort_unstable();
    types
}
