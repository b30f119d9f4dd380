use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use partdesk_catalog::CatalogLookup;

use super::Tool;

/// Checks whether a part fits a model. Query grammar:
/// `part_number:model_number`.
pub struct CompatibilityTool {
    catalog: Arc<dyn CatalogLookup>,
}

impl CompatibilityTool {
    pub fn new(catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl Tool for CompatibilityTool {
    fn name(&self) -> &'static str {
        "compatibility_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let segments: Vec<&str> = query.split(':').collect();
        let [part_number, model_number] = segments.as_slice() else {
            return Ok("Invalid query format. Use 'part_number:model_number'".to_string());
        };
        let part_number = part_number.trim();
        let model_number = model_number.trim();

        if self.catalog.check_compatibility(part_number, model_number).await? {
            let part_name = self
                .catalog
                .get_part(part_number)
                .await?
                .map(|part| part.name)
                .unwrap_or_else(|| "Unknown Part".to_string());
            Ok(format!(
                "Fits: {part_name} (Part #{part_number}) is compatible with model {model_number}."
            ))
        } else {
            Ok(format!(
                "Not Compatible: Part #{part_number} is not compatible with model {model_number}."
            ))
        }
    }
}
