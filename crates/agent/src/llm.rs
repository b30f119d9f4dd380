use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::debug;

use partdesk_core::config::LlmConfig;
use partdesk_core::Intent;

/// External classifier consulted when the rule-based pipeline cannot
/// place a query. One attempt per turn; callers absorb failures.
#[async_trait]
pub trait LlmClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Intent>;
}

/// Labels the external classifier may answer with. Deliberately narrower
/// than the full intent set: the fallback only has to rescue queries the
/// rules could not place at all.
const CLASSIFIER_LABELS: &[(&str, Intent)] = &[
    ("lookup", Intent::Lookup),
    ("compatibility", Intent::Compatibility),
    ("install", Intent::Install),
    ("diagnose", Intent::Diagnose),
    ("out_of_scope", Intent::OutOfScope),
];

/// Chat-completions backed classifier.
pub struct DeepseekClassifier {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl DeepseekClassifier {
    /// Returns `None` when no API key is configured; the router then
    /// runs rules-only.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Some(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        }))
    }

    fn prompt(text: &str) -> String {
        format!(
            "You are a specialized intent classifier for an appliance parts system.\n\
             Your task is to categorize user queries related to refrigerator and dishwasher parts.\n\
             \n\
             The possible intents are:\n\
             - lookup: User wants to find or identify a specific part\n\
             - compatibility: User wants to check if a part is compatible with their appliance\n\
             - install: User needs installation instructions for a part\n\
             - diagnose: User has an issue and needs to diagnose which part may be causing it\n\
             - out_of_scope: Query is not related to refrigerator or dishwasher parts\n\
             \n\
             Analyze the following query and respond with only one of the intent labels above:\n\
             \n\
             User query: \"{text}\"\n\
             \n\
             Intent:"
        )
    }
}

/// Match the completion text against the known labels, case-insensitive,
/// by substring. Anything unrecognizable counts as out of scope.
pub fn parse_intent_label(response: &str) -> Intent {
    let response_lower = response.to_lowercase();
    CLASSIFIER_LABELS
        .iter()
        .find(|(label, _)| response_lower.contains(label))
        .map(|(_, intent)| *intent)
        .unwrap_or(Intent::OutOfScope)
}

#[async_trait]
impl LlmClassifier for DeepseekClassifier {
    async fn classify(&self, text: &str) -> Result<Intent> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": Self::prompt(text) }],
            "temperature": 0.1,
            "max_tokens": 50,
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            bail!("classifier API error: {status} - {detail}");
        }

        let payload: serde_json::Value = response.json().await?;
        let content = payload["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("classifier response had no message content"))?;

        debug!(content, "classifier raw completion");
        Ok(parse_intent_label(content))
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_intent_label, DeepseekClassifier};
    use partdesk_core::config::LlmConfig;
    use partdesk_core::Intent;

    #[test]
    fn labels_are_matched_case_insensitively() {
        assert_eq!(parse_intent_label("Diagnose"), Intent::Diagnose);
        assert_eq!(parse_intent_label("  install  "), Intent::Install);
        assert_eq!(parse_intent_label("Intent: compatibility."), Intent::Compatibility);
    }

    #[test]
    fn unknown_labels_fall_back_to_out_of_scope() {
        assert_eq!(parse_intent_label("I cannot help with that"), Intent::OutOfScope);
        assert_eq!(parse_intent_label(""), Intent::OutOfScope);
    }

    #[test]
    fn classifier_is_disabled_without_api_key() {
        let config = LlmConfig {
            api_key: None,
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_secs: 30,
        };
        assert!(DeepseekClassifier::from_config(&config).expect("build").is_none());
    }

    #[test]
    fn classifier_is_built_with_api_key() {
        let config = LlmConfig {
            api_key: Some("sk-test".to_string().into()),
            base_url: "https://api.deepseek.com/".to_string(),
            model: "deepseek-chat".to_string(),
            timeout_secs: 30,
        };
        let classifier =
            DeepseekClassifier::from_config(&config).expect("build").expect("enabled");
        assert_eq!(classifier.base_url, "https://api.deepseek.com");
    }
}
