use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fixtures;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceType {
    Refrigerator,
    Dishwasher,
}

impl ApplianceType {
    pub fn label(&self) -> &'static str {
        match self {
            ApplianceType::Refrigerator => "refrigerator",
            ApplianceType::Dishwasher => "dishwasher",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "refrigerator" => Some(ApplianceType::Refrigerator),
            "dishwasher" => Some(ApplianceType::Dishwasher),
            _ => None,
        }
    }
}

/// One catalog entry. Serialized with the backend's wire field names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    pub part_number: String,
    pub name: String,
    pub price: Decimal,
    pub stock: String,
    pub appliance_type: ApplianceType,
    pub compatible_models: Vec<String>,
    pub description: String,
}

/// Read access to the product catalog.
#[async_trait]
pub trait CatalogLookup: Send + Sync {
    async fn get_part(&self, part_number: &str) -> Result<Option<Part>>;

    async fn search_parts(
        &self,
        query: &str,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Part>>;

    async fn check_compatibility(&self, part_number: &str, model_number: &str) -> Result<bool>;
}

/// Seeded in-memory catalog.
#[derive(Clone, Debug)]
pub struct MemoryCatalog {
    parts: Vec<Part>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self { parts: fixtures::seed_parts() }
    }

    pub fn with_parts(parts: Vec<Part>) -> Self {
        Self { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogLookup for MemoryCatalog {
    async fn get_part(&self, part_number: &str) -> Result<Option<Part>> {
        Ok(self.parts.iter().find(|part| part.part_number == part_number).cloned())
    }

    async fn search_parts(
        &self,
        query: &str,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Part>> {
        let query_lower = query.to_lowercase();
        let results = self
            .parts
            .iter()
            .filter(|part| {
                appliance_type.map_or(true, |appliance| part.appliance_type == appliance)
            })
            .filter(|part| {
                part.name.to_lowercase().contains(&query_lower)
                    || part.description.to_lowercase().contains(&query_lower)
                    || part.part_number.to_lowercase().contains(&query_lower)
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(results)
    }

    async fn check_compatibility(&self, part_number: &str, model_number: &str) -> Result<bool> {
        let model_upper = model_number.to_uppercase();
        Ok(self
            .parts
            .iter()
            .find(|part| part.part_number == part_number)
            .map_or(false, |part| part.compatible_models.iter().any(|model| *model == model_upper)))
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplianceType, CatalogLookup, MemoryCatalog};

    #[tokio::test]
    async fn get_part_finds_seeded_entries() {
        let catalog = MemoryCatalog::new();
        let part = catalog.get_part("W10295370A").await.expect("lookup").expect("seeded");
        assert_eq!(part.name, "Refrigerator Water Filter");
        assert_eq!(part.appliance_type, ApplianceType::Refrigerator);
    }

    #[tokio::test]
    async fn get_part_misses_cleanly() {
        let catalog = MemoryCatalog::new();
        assert!(catalog.get_part("NOPE123").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn search_matches_name_and_honors_filter() {
        let catalog = MemoryCatalog::new();

        let hits = catalog.search_parts("pump", None, 10).await.expect("search");
        assert!(!hits.is_empty());
        assert!(hits.iter().any(|part| part.part_number == "W10348269"));

        let fridge_hits = catalog
            .search_parts("pump", Some(ApplianceType::Refrigerator), 10)
            .await
            .expect("search");
        assert!(fridge_hits.iter().all(|part| {
            part.appliance_type == ApplianceType::Refrigerator
        }));
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let catalog = MemoryCatalog::new();
        let hits = catalog.search_parts("e", None, 2).await.expect("search");
        assert!(hits.len() <= 2);
    }

    #[tokio::test]
    async fn compatibility_uppercases_model() {
        let catalog = MemoryCatalog::new();
        assert!(catalog
            .check_compatibility("67003753", "gd5shaaxnq00")
            .await
            .expect("check"));
        assert!(!catalog
            .check_compatibility("67003753", "WDT780SAEM1")
            .await
            .expect("check"));
        assert!(!catalog.check_compatibility("NOPE123", "GD5SHAAXNQ00").await.expect("check"));
    }
}
