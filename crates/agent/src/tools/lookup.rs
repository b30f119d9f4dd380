use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use partdesk_catalog::CatalogLookup;

use super::Tool;

/// Looks up full part details by part number. Returns the part as JSON,
/// or an error object the follow-up generator knows to skip.
pub struct ProductLookupTool {
    catalog: Arc<dyn CatalogLookup>,
}

impl ProductLookupTool {
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for ProductLookupTool {
    fn name(&self) -> &'static str {
        "product_lookup_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let part_number = query.trim();

        match self.catalog.get_part(part_number).await? {
            Some(part) => Ok(serde_json::to_string_pretty(&part)?),
            None => {
                warn!(part_number, "part not found in catalog");
                Ok(json!({ "error": format!("Part {part_number} not found") }).to_string())
            }
        }
    }
}
