use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use partdesk_catalog::{ApplianceType, CatalogLookup, DocsLookup};

use super::Tool;

/// Parts worth cross-checking against the catalog when they come up in
/// troubleshooting text.
const COMMON_PARTS: &[&str] = &[
    "compressor",
    "condenser",
    "evaporator",
    "fan motor",
    "water filter",
    "ice maker",
    "thermostat",
    "temperature control",
    "defrost heater",
    "door gasket",
    "water valve",
    "dispenser",
    "control board",
    "pump",
    "spray arm",
    "heating element",
    "water inlet valve",
    "float switch",
    "timer",
    "control panel",
    "door latch",
    "drain hose",
];

/// Diagnoses an appliance problem from the troubleshooting docs and
/// suggests likely replacement parts. Query grammar:
/// `problem[:appliance_type]`.
pub struct ErrorDiagnosisTool {
    docs: Arc<dyn DocsLookup>,
    catalog: Arc<dyn CatalogLookup>,
}

impl ErrorDiagnosisTool {
    pub fn new(docs: Arc<dyn DocsLookup>, catalog: Arc<dyn CatalogLookup>) -> Self {
        Self { docs, catalog }
    }
}

/// Scan text for known part names, title-cased for display. BTreeSet
/// keeps the suggestion order stable.
fn extract_parts_from_text(text: &str) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    COMMON_PARTS
        .iter()
        .filter(|part| text_lower.contains(**part))
        .map(|part| {
            part.split(' ')
                .map(|word| {
                    let mut chars = word.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

#[async_trait]
impl Tool for ErrorDiagnosisTool {
    fn name(&self) -> &'static str {
        "error_diagnosis_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let (problem, appliance_label) = match query.split_once(':') {
            Some((problem, appliance)) => (problem.trim(), Some(appliance.trim())),
            None => (query.trim(), None),
        };
        let appliance_type = appliance_label.and_then(ApplianceType::from_label);

        let docs = self.docs.get_troubleshooting_docs(Some(problem), appliance_type, 3).await?;
        if docs.is_empty() {
            return Ok(format!("No troubleshooting information found for '{problem}'."));
        }

        let mut diagnosis = format!("# Diagnosis for: {problem}\n\n");
        let mut likely_parts = BTreeSet::new();

        for doc in &docs {
            let _ = write!(diagnosis, "## {}\n\n{}\n\n", doc.title, doc.content);
            likely_parts.extend(extract_parts_from_text(&doc.content));
        }

        if !likely_parts.is_empty() {
            diagnosis.push_str("## Likely Parts to Check/Replace:\n");
            for part_name in &likely_parts {
                let candidates =
                    self.catalog.search_parts(part_name, appliance_type, 1).await?;
                match candidates.first() {
                    Some(part) => {
                        let _ = writeln!(
                            diagnosis,
                            "\u{2022} {part_name} (Part #{}, Price: ${})",
                            part.part_number, part.price
                        );
                    }
                    None => {
                        let _ = writeln!(diagnosis, "\u{2022} {part_name}");
                    }
                }
            }
        }

        Ok(diagnosis)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use partdesk_catalog::{MemoryCatalog, MemoryDocs};

    use super::{extract_parts_from_text, ErrorDiagnosisTool, Tool};

    fn tool() -> ErrorDiagnosisTool {
        ErrorDiagnosisTool::new(Arc::new(MemoryDocs::new()), Arc::new(MemoryCatalog::new()))
    }

    #[test]
    fn part_extraction_is_title_cased_and_sorted() {
        let parts =
            extract_parts_from_text("check the drain hose, then the pump, then the float switch");
        let parts: Vec<String> = parts.into_iter().collect();
        assert_eq!(parts, vec!["Drain Hose", "Float Switch", "Pump"]);
    }

    #[tokio::test]
    async fn diagnosis_includes_docs_and_part_suggestions() {
        let result = tool().invoke("not cooling:refrigerator").await.expect("invoke");

        assert!(result.starts_with("# Diagnosis for: not cooling"));
        assert!(result.contains("Refrigerator Not Cooling Troubleshooting"));
        assert!(result.contains("## Likely Parts to Check/Replace:"));
        // the fan motor is in the catalog, so the bullet carries a number
        assert!(result.contains("Fan Motor (Part #PS11784756"));
    }

    #[tokio::test]
    async fn unknown_problem_reports_no_information() {
        let result = tool().invoke("spontaneous combustion").await.expect("invoke");
        assert_eq!(
            result,
            "No troubleshooting information found for 'spontaneous combustion'."
        );
    }
}
