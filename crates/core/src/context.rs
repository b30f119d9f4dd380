//! Short-term conversational memory and follow-up resolution. Turns like
//! "How do I install it?" only make sense against the previous turn; the
//! resolver rewrites them into explicit queries before routing.

use crate::extract::ParameterSet;
use crate::intent::Intent;

const PRONOUNS: &[&str] = &["it", "this", "that", "them", "these", "those"];

const FOLLOW_UP_PREFIXES: &[&str] = &[
    "how do i",
    "how to",
    "install",
    "compatible",
    "will it work",
    "is it compatible",
    "where does it go",
    "how much",
    "what about",
    "add to cart",
    "remove from cart",
    "check order",
];

/// What the previous turn established. One instance per logical session;
/// fields are only ever overwritten, never cleared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConversationContext {
    pub last_intent: Option<Intent>,
    pub last_part_number: Option<String>,
    pub last_part_name: Option<String>,
    pub last_model_number: Option<String>,
    pub last_appliance_type: Option<String>,
}

impl ConversationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a completed turn into the context. Only slots present in the
    /// turn's ParameterSet overwrite their fields.
    pub fn record_turn(&mut self, intent: Intent, params: &ParameterSet) {
        self.last_intent = Some(intent);

        if let Some(part_number) = &params.part_number {
            self.last_part_number = Some(part_number.clone());
        }
        if let Some(part_name) = &params.part_name {
            self.last_part_name = Some(part_name.clone());
        }
        if let Some(model_number) = &params.model_number {
            self.last_model_number = Some(model_number.clone());
        }
        if let Some(appliance_type) = &params.appliance_type {
            self.last_appliance_type = Some(appliance_type.clone());
        }
    }
}

/// Heuristic for "this turn leans on the previous one". The three
/// branches are exclusive: a short query that matches neither pronouns
/// nor prefixes is not retried against the cart/order branches.
pub fn is_context_dependent(query: &str, context: &ConversationContext) -> bool {
    let query_lower = query.to_lowercase();
    let query_lower = query_lower.trim();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();

    if tokens.len() <= 5 {
        if PRONOUNS.iter().any(|pronoun| tokens.contains(pronoun)) {
            return true;
        }
        if FOLLOW_UP_PREFIXES.iter().any(|prefix| query_lower.starts_with(prefix)) {
            return true;
        }
        false
    } else if query_lower.contains("cart")
        || query_lower.contains("add")
        || query_lower.contains("basket")
    {
        context.last_part_number.is_some()
    } else {
        query_lower.contains("order")
            || query_lower.contains("status")
            || query_lower.contains("track")
    }
}

/// Rewrite a context-dependent query into an explicit one. Returns the
/// resolved intent and replacement text, or `None` when the context
/// cannot carry the turn. Two rule chains; within a chain only the first
/// matching head is considered, and a head that matches but cannot
/// produce a rewrite falls through to the next chain.
pub fn enhance_with_context(
    query: &str,
    context: &ConversationContext,
) -> Option<(Intent, String)> {
    let query_lower = query.to_lowercase();
    let query_lower = query_lower.trim();

    context.last_intent?;

    if (query_lower.contains("how") && query_lower.contains("install"))
        || query_lower.contains("installation")
    {
        if let Some(part_name) = &context.last_part_name {
            let appliance = context.last_appliance_type.as_deref().unwrap_or("refrigerator");
            return Some((
                Intent::Install,
                format!("How do I install a {part_name} in my {appliance}?"),
            ));
        }
    } else if query_lower.contains("compatible") || query_lower.contains("work with") {
        if let (Some(part_number), Some(model_number)) =
            (&context.last_part_number, &context.last_model_number)
        {
            return Some((
                Intent::Compatibility,
                format!("Is part {part_number} compatible with {model_number}?"),
            ));
        }
    } else if query_lower.contains("where")
        || query_lower.contains("find")
        || query_lower.contains("get")
    {
        if let Some(part_name) = &context.last_part_name {
            let appliance = context.last_appliance_type.as_deref().unwrap_or("refrigerator");
            return Some((Intent::Lookup, format!("I need a {part_name} for my {appliance}")));
        }
    }

    if matches!(context.last_intent, Some(Intent::Lookup | Intent::Compatibility)) {
        if query_lower.contains("install") || query_lower.contains("how") {
            let part_name = context.last_part_name.as_deref().unwrap_or("part");
            let appliance = context.last_appliance_type.as_deref().unwrap_or("refrigerator");
            return Some((
                Intent::Install,
                format!("How do I install a {part_name} in my {appliance}?"),
            ));
        }
    } else if query_lower.contains("cart")
        || query_lower.contains("add")
        || query_lower.contains("basket")
    {
        if let Some(part_number) = &context.last_part_number {
            if query_lower.contains("add") {
                return Some((Intent::Cart, format!("Add part {part_number} to my cart")));
            }
            return Some((Intent::Cart, "View my cart".to_string()));
        }
    } else if query_lower.contains("order")
        || query_lower.contains("status")
        || query_lower.contains("track")
    {
        return Some((Intent::Order, "Check my order status".to_string()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{enhance_with_context, is_context_dependent, ConversationContext};
    use crate::extract::ParameterSet;
    use crate::intent::Intent;

    fn lookup_context() -> ConversationContext {
        ConversationContext {
            last_intent: Some(Intent::Lookup),
            last_part_number: Some("W10295370A".to_string()),
            last_part_name: Some("water filter".to_string()),
            last_model_number: None,
            last_appliance_type: Some("refrigerator".to_string()),
        }
    }

    #[test]
    fn short_pronoun_queries_are_context_dependent() {
        let context = ConversationContext::new();
        assert!(is_context_dependent("How do I install it?", &context));
        assert!(is_context_dependent("will that fit", &context));
    }

    #[test]
    fn follow_up_prefixes_are_context_dependent() {
        let context = ConversationContext::new();
        assert!(is_context_dependent("how much", &context));
        assert!(is_context_dependent("check order", &context));
    }

    #[test]
    fn short_query_without_signals_is_not_retried_against_later_branches() {
        let mut context = ConversationContext::new();
        context.last_part_number = Some("W10295370A".to_string());
        // 1 token, no pronoun, no prefix; the cart branch is not consulted.
        assert!(!is_context_dependent("cart", &context));
    }

    #[test]
    fn cart_mentions_depend_on_remembered_part() {
        let mut context = ConversationContext::new();
        let query = "please put the same filter in my shopping cart";
        assert!(!is_context_dependent(query, &context));

        context.last_part_number = Some("W10295370A".to_string());
        assert!(is_context_dependent(query, &context));
    }

    #[test]
    fn order_mentions_are_always_context_dependent() {
        let context = ConversationContext::new();
        assert!(is_context_dependent(
            "can you check the status of the order I placed",
            &context
        ));
    }

    #[test]
    fn enhancement_requires_prior_intent() {
        let context = ConversationContext::new();
        assert_eq!(enhance_with_context("How do I install it?", &context), None);
    }

    #[test]
    fn install_follow_up_reuses_remembered_part() {
        let context = lookup_context();
        let (intent, rewritten) =
            enhance_with_context("How do I install it?", &context).expect("resolvable");
        assert_eq!(intent, Intent::Install);
        assert_eq!(rewritten, "How do I install a water filter in my refrigerator?");
    }

    #[test]
    fn compatibility_follow_up_needs_part_and_model() {
        let mut context = lookup_context();
        assert_eq!(enhance_with_context("is it compatible", &context), None);

        context.last_model_number = Some("WDT780SAEM1".to_string());
        let (intent, rewritten) =
            enhance_with_context("is it compatible", &context).expect("resolvable");
        assert_eq!(intent, Intent::Compatibility);
        assert_eq!(rewritten, "Is part W10295370A compatible with WDT780SAEM1?");
    }

    #[test]
    fn where_follow_up_becomes_lookup() {
        let context = lookup_context();
        let (intent, rewritten) =
            enhance_with_context("where can i buy one", &context).expect("resolvable");
        assert_eq!(intent, Intent::Lookup);
        assert_eq!(rewritten, "I need a water filter for my refrigerator");
    }

    #[test]
    fn generic_install_fallback_after_lookup() {
        let mut context = lookup_context();
        context.last_part_name = None;
        let (intent, rewritten) =
            enhance_with_context("how does it go in", &context).expect("resolvable");
        assert_eq!(intent, Intent::Install);
        assert_eq!(rewritten, "How do I install a part in my refrigerator?");
    }

    #[test]
    fn cart_follow_up_uses_remembered_part_number() {
        let mut context = lookup_context();
        context.last_intent = Some(Intent::Diagnose);
        let (intent, rewritten) =
            enhance_with_context("add it to my basket", &context).expect("resolvable");
        assert_eq!(intent, Intent::Cart);
        assert_eq!(rewritten, "Add part W10295370A to my cart");

        let (intent, rewritten) =
            enhance_with_context("show my cart", &context).expect("resolvable");
        assert_eq!(intent, Intent::Cart);
        assert_eq!(rewritten, "View my cart");
    }

    #[test]
    fn order_follow_up_becomes_generic_status_check() {
        let mut context = lookup_context();
        context.last_intent = Some(Intent::Diagnose);
        let (intent, rewritten) =
            enhance_with_context("track my order", &context).expect("resolvable");
        assert_eq!(intent, Intent::Order);
        assert_eq!(rewritten, "Check my order status");
    }

    #[test]
    fn record_turn_overwrites_only_present_slots() {
        let mut context = lookup_context();

        let params = ParameterSet {
            appliance_type: Some("dishwasher".to_string()),
            ..ParameterSet::default()
        };
        context.record_turn(Intent::Diagnose, &params);

        assert_eq!(context.last_intent, Some(Intent::Diagnose));
        assert_eq!(context.last_appliance_type.as_deref(), Some("dishwasher"));
        // untouched slots carry over
        assert_eq!(context.last_part_number.as_deref(), Some("W10295370A"));
        assert_eq!(context.last_part_name.as_deref(), Some("water filter"));
    }
}
