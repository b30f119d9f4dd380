use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::fixtures;
use crate::parts::ApplianceType;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Installation,
    Troubleshooting,
    Safety,
}

/// One documentation entry: an installation guide, a troubleshooting
/// article, or the safety sheet. Content is markdown.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub title: String,
    pub doc_type: DocType,
    /// None means the doc applies to every appliance we cover.
    pub appliance_type: Option<ApplianceType>,
    pub content: String,
}

impl Doc {
    fn matches_appliance(&self, appliance_type: Option<ApplianceType>) -> bool {
        match (appliance_type, self.appliance_type) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        }
    }
}

/// Read access to installation and troubleshooting documentation.
#[async_trait]
pub trait DocsLookup: Send + Sync {
    async fn get_installation_docs(
        &self,
        part_name: Option<&str>,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Doc>>;

    async fn get_troubleshooting_docs(
        &self,
        problem: Option<&str>,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Doc>>;

    async fn get_repair_steps(
        &self,
        part_name: &str,
        appliance_type: Option<ApplianceType>,
    ) -> Result<Vec<String>>;

    async fn get_safety_notes(&self, appliance_type: Option<ApplianceType>) -> Result<Vec<String>>;
}

const GENERIC_REPAIR_STEPS: &[&str] = &[
    "Turn off power to the appliance",
    "Remove the old part carefully",
    "Install the new part in the same position",
    "Restore power and test the appliance",
];

const GENERIC_SAFETY_NOTES: &[&str] = &[
    "ALWAYS disconnect power before attempting repairs",
    "Use appropriate safety gear (gloves, eye protection)",
    "Turn off water supply for water-connected appliances",
    "Keep a fire extinguisher nearby",
    "When in doubt, consult a professional",
];

/// Seeded in-memory documentation store.
#[derive(Clone, Debug)]
pub struct MemoryDocs {
    docs: Vec<Doc>,
}

impl MemoryDocs {
    pub fn new() -> Self {
        Self { docs: fixtures::seed_docs() }
    }

    pub fn with_docs(docs: Vec<Doc>) -> Self {
        Self { docs }
    }
}

impl Default for MemoryDocs {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocsLookup for MemoryDocs {
    async fn get_installation_docs(
        &self,
        part_name: Option<&str>,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Doc>> {
        let results = self
            .docs
            .iter()
            .filter(|doc| doc.doc_type == DocType::Installation)
            .filter(|doc| doc.matches_appliance(appliance_type))
            .filter(|doc| {
                part_name.map_or(true, |name| {
                    doc.title.to_lowercase().contains(&name.to_lowercase())
                })
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(results)
    }

    async fn get_troubleshooting_docs(
        &self,
        problem: Option<&str>,
        appliance_type: Option<ApplianceType>,
        limit: usize,
    ) -> Result<Vec<Doc>> {
        let results = self
            .docs
            .iter()
            .filter(|doc| doc.doc_type == DocType::Troubleshooting)
            .filter(|doc| doc.matches_appliance(appliance_type))
            .filter(|doc| {
                problem.map_or(true, |problem| {
                    let needle = problem.to_lowercase();
                    doc.title.to_lowercase().contains(&needle)
                        || doc.content.to_lowercase().contains(&needle)
                })
            })
            .take(limit)
            .cloned()
            .collect();
        Ok(results)
    }

    async fn get_repair_steps(
        &self,
        part_name: &str,
        appliance_type: Option<ApplianceType>,
    ) -> Result<Vec<String>> {
        let docs = self.get_installation_docs(Some(part_name), appliance_type, 1).await?;

        let Some(doc) = docs.first() else {
            return Ok(GENERIC_REPAIR_STEPS.iter().map(|step| step.to_string()).collect());
        };

        let steps = extract_numbered_steps(&doc.content);
        if steps.is_empty() {
            return Ok(GENERIC_REPAIR_STEPS.iter().map(|step| step.to_string()).collect());
        }
        Ok(steps)
    }

    async fn get_safety_notes(
        &self,
        _appliance_type: Option<ApplianceType>,
    ) -> Result<Vec<String>> {
        let Some(doc) = self.docs.iter().find(|doc| doc.doc_type == DocType::Safety) else {
            return Ok(GENERIC_SAFETY_NOTES.iter().map(|note| note.to_string()).collect());
        };

        let notes: Vec<String> = doc
            .content
            .lines()
            .filter_map(|line| line.trim().strip_prefix("### "))
            .map(|heading| heading.trim().to_string())
            .take(5)
            .collect();

        if notes.is_empty() {
            return Ok(GENERIC_SAFETY_NOTES.iter().map(|note| note.to_string()).collect());
        }
        Ok(notes)
    }
}

/// Pull the numbered lines out of a "## Step-by-Step Instructions"
/// section, without their numeric prefixes.
fn extract_numbered_steps(content: &str) -> Vec<String> {
    let Some(section_start) = content.find("## Step-by-Step Instructions") else {
        return Vec::new();
    };

    let section = &content[section_start + "## Step-by-Step Instructions".len()..];
    let section = match section.find("\n## ") {
        Some(end) => &section[..end],
        None => section,
    };

    section
        .lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            let (number, rest) = trimmed.split_once(". ")?;
            number.parse::<u32>().ok()?;
            Some(rest.trim().to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{DocType, DocsLookup, MemoryDocs};
    use crate::parts::ApplianceType;

    #[tokio::test]
    async fn installation_docs_filter_by_part_and_appliance() {
        let docs = MemoryDocs::new();

        let hits = docs
            .get_installation_docs(Some("water filter"), Some(ApplianceType::Refrigerator), 5)
            .await
            .expect("docs");
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|doc| doc.doc_type == DocType::Installation));
        assert!(hits[0].title.to_lowercase().contains("water filter"));

        let misses = docs
            .get_installation_docs(Some("water filter"), Some(ApplianceType::Dishwasher), 5)
            .await
            .expect("docs");
        assert!(misses.is_empty());
    }

    #[tokio::test]
    async fn troubleshooting_docs_match_content_text() {
        let docs = MemoryDocs::new();
        let hits = docs
            .get_troubleshooting_docs(Some("not cooling"), None, 3)
            .await
            .expect("docs");
        assert!(!hits.is_empty());
    }

    #[tokio::test]
    async fn repair_steps_come_from_the_guide_when_available() {
        let docs = MemoryDocs::new();
        let steps = docs
            .get_repair_steps("water filter", Some(ApplianceType::Refrigerator))
            .await
            .expect("steps");
        assert!(steps.len() >= 3);
        // extracted steps carry no leading numbers; the caller renders them
        assert!(steps.iter().all(|step| !step.starts_with(|ch: char| ch.is_ascii_digit())));
    }

    #[tokio::test]
    async fn repair_steps_fall_back_to_generic_sequence() {
        let docs = MemoryDocs::new();
        let steps = docs.get_repair_steps("flux capacitor", None).await.expect("steps");
        assert_eq!(steps.len(), 4);
        assert!(steps[0].contains("Turn off power"));
    }

    #[tokio::test]
    async fn safety_notes_are_capped_at_five() {
        let docs = MemoryDocs::new();
        let notes = docs.get_safety_notes(None).await.expect("notes");
        assert!(!notes.is_empty());
        assert!(notes.len() <= 5);
    }
}
