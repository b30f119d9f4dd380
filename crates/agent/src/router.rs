use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use partdesk_core::context::{enhance_with_context, is_context_dependent, ConversationContext};
use partdesk_core::extract::{extract_parameters, CartAction, ParameterSet};
use partdesk_core::{classify, is_in_scope, Intent};

use crate::llm::LlmClassifier;
use crate::tools::ToolRegistry;

/// Substrings that mark a query as a problem report, overriding whatever
/// the classifier decided.
const PROBLEM_INDICATORS: &[&str] = &[
    "not working",
    "not cooling",
    "leaking",
    "strange",
    "noise",
    "broken",
    "doesn't work",
    "isn't working",
    "problem",
    "issue",
    "doesn't",
];

const SCOPE_REJECTION: &str =
    "I'm sorry, but I can only help with questions about refrigerator and dishwasher parts.";

const UNPLACEABLE_REJECTION: &str =
    "I understand your question is about appliance parts, but I'm not sure how to help \
     specifically. Could you please rephrase your question about refrigerator or dishwasher \
     parts?";

const UNPLACEABLE_HINT: &str =
    "Try asking about finding a specific part, checking compatibility, installation \
     instructions, or diagnosing a problem.";

/// The single externally observable output of a turn. Always well-formed,
/// whatever happened inside the pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    pub tool_name: String,
    pub result: String,
    pub follow_up: Option<String>,
}

impl DispatchResult {
    fn out_of_scope() -> Self {
        Self {
            tool_name: "out_of_scope".to_string(),
            result: SCOPE_REJECTION.to_string(),
            follow_up: None,
        }
    }

    fn unplaceable() -> Self {
        Self {
            tool_name: "out_of_scope".to_string(),
            result: UNPLACEABLE_REJECTION.to_string(),
            follow_up: Some(UNPLACEABLE_HINT.to_string()),
        }
    }

    fn unknown_intent() -> Self {
        Self {
            tool_name: "unknown_intent".to_string(),
            result: "I'm not sure how to process that request.".to_string(),
            follow_up: None,
        }
    }
}

/// Top-level pipeline: context resolution, scope check, classification,
/// optional LLM fallback, tool dispatch, context update. One instance per
/// logical session; calls are expected to be serialized per instance.
pub struct ToolRouter {
    tools: ToolRegistry,
    llm: Option<Arc<dyn LlmClassifier>>,
    context: ConversationContext,
}

impl ToolRouter {
    pub fn new(tools: ToolRegistry) -> Self {
        Self { tools, llm: None, context: ConversationContext::new() }
    }

    pub fn with_llm(mut self, llm: Arc<dyn LlmClassifier>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Process one turn. Never fails: every path, including tool errors,
    /// terminates in a well-formed DispatchResult.
    pub async fn process_query(&mut self, text: &str) -> DispatchResult {
        if is_context_dependent(text, &self.context) {
            if let Some((intent, rewritten)) = enhance_with_context(text, &self.context) {
                info!(intent = %intent, rewritten = %rewritten, "resolved context-dependent query");
                return self.dispatch(intent, &rewritten).await;
            }
        }

        if !is_in_scope(text) {
            info!("query rejected as out of scope");
            return DispatchResult::out_of_scope();
        }

        let classification = classify(text);
        debug!(
            intent = %classification.intent,
            source = ?classification.source,
            "rule-based classification"
        );
        let mut intent = classification.intent;

        let text_lower = text.to_lowercase();
        if PROBLEM_INDICATORS.iter().any(|indicator| text_lower.contains(indicator)) {
            if intent != Intent::Diagnose {
                info!(classified = %intent, "problem indicators override intent to diagnose");
            }
            intent = Intent::Diagnose;
        }

        if intent == Intent::OutOfScope {
            if let Some(llm) = &self.llm {
                match llm.classify(text).await {
                    Ok(label) => {
                        info!(label = %label, "adopted llm fallback label");
                        intent = label;
                    }
                    Err(fallback_error) => {
                        error!(error = %fallback_error, "llm fallback classification failed");
                    }
                }
            }
            if intent == Intent::OutOfScope {
                return DispatchResult::unplaceable();
            }
        }

        let result = self.dispatch(intent, text).await;

        let params = extract_parameters(intent, text);
        self.context.record_turn(intent, &params);

        result
    }

    async fn dispatch(&self, intent: Intent, text: &str) -> DispatchResult {
        let Some(tool) = self.tools.get(intent) else {
            warn!(intent = %intent, "no tool registered for intent");
            return DispatchResult::unknown_intent();
        };

        let params = extract_parameters(intent, text);
        let query = build_subquery(intent, &params);
        info!(tool = tool.name(), intent = %intent, query = %query, "dispatching to tool");

        match tool.invoke(&query).await {
            Ok(result) => {
                let follow_up = follow_up_for(intent, &params, &result);
                DispatchResult { tool_name: tool.name().to_string(), result, follow_up }
            }
            Err(tool_error) => {
                error!(tool = tool.name(), error = %tool_error, "tool invocation failed");
                DispatchResult {
                    tool_name: "error".to_string(),
                    result: format!(
                        "I encountered an error while processing your request: {tool_error}"
                    ),
                    follow_up: Some("Could you try rephrasing your question?".to_string()),
                }
            }
        }
    }
}

/// Build the canonical sub-query handed to the tool for this intent.
fn build_subquery(intent: Intent, params: &ParameterSet) -> String {
    match intent {
        Intent::Lookup => params.part_number.clone().unwrap_or_default(),
        Intent::Compatibility => format!(
            "{}:{}",
            params.part_number.as_deref().unwrap_or_default(),
            params.model_number.as_deref().unwrap_or_default()
        ),
        Intent::Install => {
            with_optional_appliance(params.part_name.as_deref(), params.appliance_type.as_deref())
        }
        Intent::Diagnose => {
            with_optional_appliance(params.problem.as_deref(), params.appliance_type.as_deref())
        }
        Intent::Cart => match (params.action.unwrap_or(CartAction::View), &params.part_number) {
            (CartAction::Add, Some(part_number)) => {
                let quantity = params.quantity.as_deref().unwrap_or("1");
                format!("add:{part_number}:{quantity}")
            }
            (CartAction::Remove, Some(part_number)) => format!("remove:{part_number}"),
            (CartAction::Clear, _) => "clear".to_string(),
            _ => "view".to_string(),
        },
        Intent::Order => match (&params.order_number, &params.email) {
            (Some(order_number), Some(email)) => format!("{order_number}:{email}"),
            (Some(order_number), None) => order_number.clone(),
            (None, Some(email)) => format!("email:{email}"),
            (None, None) => "status".to_string(),
        },
        Intent::Status | Intent::OutOfScope => String::new(),
    }
}

fn with_optional_appliance(head: Option<&str>, appliance_type: Option<&str>) -> String {
    match (head, appliance_type) {
        (head, Some(appliance)) => format!("{}:{appliance}", head.unwrap_or_default()),
        (head, None) => head.unwrap_or_default().to_string(),
    }
}

fn follow_up_for(intent: Intent, params: &ParameterSet, result: &str) -> Option<String> {
    match intent {
        Intent::Lookup => lookup_follow_up(result),
        Intent::Compatibility => {
            Some("Would you like to see installation instructions for this part?".to_string())
        }
        Intent::Install => Some("Do you need help finding this part?".to_string()),
        Intent::Diagnose => {
            Some("Would you like me to help you find any of these parts?".to_string())
        }
        Intent::Cart => Some(match params.action.unwrap_or(CartAction::View) {
            CartAction::Add => "Would you like to view your cart or continue shopping?".to_string(),
            CartAction::View => "Would you like to checkout or continue shopping?".to_string(),
            _ => "Is there anything else you'd like to do with your cart?".to_string(),
        }),
        Intent::Order => {
            Some("Would you like to check another order or continue shopping?".to_string())
        }
        Intent::Status | Intent::OutOfScope => None,
    }
}

/// Lookup results are part JSON; a parseable payload with a name earns a
/// tailored suggestion, an error payload earns none.
fn lookup_follow_up(result: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(result) {
        Ok(value) => {
            if value.get("error").is_some() {
                return None;
            }
            let name = value.get("name").and_then(|name| name.as_str()).unwrap_or_default();
            if name.is_empty() {
                None
            } else {
                Some(format!("Would you like installation instructions for the {name}?"))
            }
        }
        Err(_) => {
            Some("Would you like to check compatibility or get installation instructions?"
                .to_string())
        }
    }
}
