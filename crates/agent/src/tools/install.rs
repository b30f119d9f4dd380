use std::fmt::Write as _;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use partdesk_catalog::{ApplianceType, DocsLookup};

use super::Tool;

/// Builds a step-by-step installation guide. Query grammar:
/// `part_name[:appliance_type]`.
pub struct InstallationGuideTool {
    docs: Arc<dyn DocsLookup>,
}

impl InstallationGuideTool {
    pub fn new(docs: Arc<dyn DocsLookup>) -> Self {
        Self { docs }
    }

    fn render_safety_section(notes: &[String], heading: &str) -> String {
        if notes.is_empty() {
            return String::new();
        }
        let bullets: Vec<String> = notes.iter().map(|note| format!("\u{2022} {note}")).collect();
        format!("\n\n{heading}\n{}", bullets.join("\n"))
    }
}

#[async_trait]
impl Tool for InstallationGuideTool {
    fn name(&self) -> &'static str {
        "installation_guide_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let (part_name, appliance_label) = match query.split_once(':') {
            Some((part, appliance)) => (part.trim(), Some(appliance.trim())),
            None => (query.trim(), None),
        };
        let appliance_type = appliance_label.and_then(ApplianceType::from_label);

        let repair_steps = self.docs.get_repair_steps(part_name, appliance_type).await?;
        if !repair_steps.is_empty() {
            let numbered: Vec<String> = repair_steps
                .iter()
                .enumerate()
                .map(|(index, step)| format!("{}. {step}", index + 1))
                .collect();

            let safety_notes = self.docs.get_safety_notes(appliance_type).await?;
            let safety_section = Self::render_safety_section(
                &safety_notes,
                "\u{26a0}\u{fe0f} SAFETY PRECAUTIONS:",
            );

            return Ok(format!(
                "# Installation Guide for {part_name}\n\n## Step-by-Step Instructions:\n{}{safety_section}",
                numbered.join("\n")
            ));
        }

        let docs = self.docs.get_installation_docs(Some(part_name), appliance_type, 2).await?;
        if docs.is_empty() {
            return Ok(format!("No installation instructions found for {part_name}."));
        }

        let mut guide = String::from("# Installation Guide\n\n");
        for doc in &docs {
            let _ = write!(guide, "## {}\n\n{}\n\n", doc.title, doc.content);
        }

        let safety_notes = self.docs.get_safety_notes(appliance_type).await?;
        if !safety_notes.is_empty() {
            guide.push_str("## \u{26a0}\u{fe0f} Safety Precautions:\n");
            let bullets: Vec<String> =
                safety_notes.iter().map(|note| format!("\u{2022} {note}")).collect();
            guide.push_str(&bullets.join("\n"));
        }

        Ok(guide)
    }
}
