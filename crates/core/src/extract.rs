//! Per-intent slot extraction. Every rule is an ordered, deterministic
//! table lookup or regex probe so the same text always yields the same
//! ParameterSet.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::intent::Intent;

static PART_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]{0,3}\d{4,10}[A-Za-z0-9]{0,5}").expect("part pattern"));

static MODEL_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]{2,5}\d{3,7}[A-Za-z0-9]{0,5}").expect("model pattern"));

static QUANTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+(pcs|pieces|units|quantity)").expect("quantity pattern"));

static ORDER_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"order\s+(?:number\s+)?#?(\d{6,10})").expect("order pattern"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.\w+").expect("email pattern"));

/// Part phrases the assistant can resolve to a demo catalog entry.
/// First column: trigger phrases; then canonical part number and name.
const PART_SYNONYMS: &[(&[&str], &str, &str)] = &[
    (&["water filter"], "W10295370A", "water filter"),
    (&["ice maker"], "W10190961", "ice maker"),
    (&["control board"], "WPW10503278", "control board"),
    (&["heating element", "heater"], "WPW10518394", "heating element"),
    (&["drain pump"], "W10348269", "drain pump"),
    (&["door gasket", "seal"], "WPW10438677", "door gasket"),
];

const PART_NAME_PHRASES: &[&str] =
    &["water filter", "ice maker", "control board", "heating element", "drain pump", "door gasket"];

/// Ordered problem phrases for the diagnose intent; first match wins.
const PROBLEM_PHRASES: &[&str] = &[
    "not cooling",
    "no water",
    "leaking",
    "not draining",
    "making noise",
    "not working",
    "ice maker",
    "no ice",
    "water dispenser",
    "not running",
    "door",
    "light",
    "strange taste",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CartAction {
    Add,
    Remove,
    View,
    Clear,
}

impl CartAction {
    pub fn label(&self) -> &'static str {
        match self {
            CartAction::Add => "add",
            CartAction::Remove => "remove",
            CartAction::View => "view",
            CartAction::Clear => "clear",
        }
    }
}

/// Slots extracted from one turn. Produced fresh per call, never mutated
/// afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    pub part_number: Option<String>,
    pub part_name: Option<String>,
    pub model_number: Option<String>,
    pub appliance_type: Option<String>,
    pub problem: Option<String>,
    pub action: Option<CartAction>,
    pub quantity: Option<String>,
    pub order_number: Option<String>,
    pub email: Option<String>,
}

/// Extract the slots relevant to `intent` from `text`.
pub fn extract_parameters(intent: Intent, text: &str) -> ParameterSet {
    let text_lower = text.to_lowercase();
    let mut params = ParameterSet::default();

    match intent {
        Intent::Lookup => {
            if let Some(matched) = PART_NUMBER_RE.find(text) {
                params.part_number = Some(matched.as_str().to_string());
            } else if let Some((_, number, name)) = find_synonym(&text_lower) {
                params.part_number = Some(number.to_string());
                params.part_name = Some(name.to_string());
            } else if let Some(name) = find_part_name(&text_lower) {
                params.part_name = Some(name.to_string());
            }
        }
        Intent::Compatibility => {
            if let Some(matched) = PART_NUMBER_RE.find(text) {
                params.part_number = Some(matched.as_str().to_string());
            }
            params.model_number = find_model_number(text, params.part_number.as_deref());
            if params.model_number.is_some()
                && params.part_number.is_none()
                && text_lower.contains("water filter")
            {
                params.part_number = Some("W10295370A".to_string());
                params.part_name = Some("water filter".to_string());
            }
        }
        Intent::Install | Intent::Diagnose => {
            params.appliance_type = find_appliance_type(&text_lower);

            if intent == Intent::Install {
                params.part_name = find_part_name(&text_lower).map(str::to_string);
            } else {
                params.problem = PROBLEM_PHRASES
                    .iter()
                    .find(|phrase| text_lower.contains(**phrase))
                    .map(|phrase| phrase.to_string());

                // Odd-tasting water points at the filter, whatever else the
                // problem list matched.
                if text_lower.contains("water")
                    && (text_lower.contains("taste")
                        || text_lower.contains("strange")
                        || text_lower.contains("bad"))
                {
                    params.problem = Some("water filter".to_string());
                    params.part_name = Some("water filter".to_string());
                }
            }
        }
        Intent::Cart => {
            if let Some(matched) = PART_NUMBER_RE.find(text) {
                params.part_number = Some(matched.as_str().to_string());
            }
            params.quantity = Some(
                QUANTITY_RE
                    .captures(&text_lower)
                    .map(|captures| captures[1].to_string())
                    .unwrap_or_else(|| "1".to_string()),
            );
            params.action = Some(find_cart_action(&text_lower));
        }
        Intent::Order => {
            if let Some(captures) = ORDER_NUMBER_RE.captures(&text_lower) {
                params.order_number = Some(captures[1].to_string());
            }
            if let Some(matched) = EMAIL_RE.find(text) {
                params.email = Some(matched.as_str().to_string());
            }
        }
        Intent::Status | Intent::OutOfScope => {}
    }

    params
}

fn find_synonym(text_lower: &str) -> Option<(&'static [&'static str], &'static str, &'static str)> {
    PART_SYNONYMS
        .iter()
        .find(|(phrases, _, _)| phrases.iter().any(|phrase| text_lower.contains(phrase)))
        .copied()
}

fn find_part_name(text_lower: &str) -> Option<&'static str> {
    PART_NAME_PHRASES.iter().find(|phrase| text_lower.contains(**phrase)).copied()
}

fn find_appliance_type(text_lower: &str) -> Option<String> {
    if text_lower.contains("refrigerator") || text_lower.contains("fridge") {
        Some("refrigerator".to_string())
    } else if text_lower.contains("dishwasher") || text_lower.contains("dish washer") {
        Some("dishwasher".to_string())
    } else {
        None
    }
}

/// Model numbers come in two shapes: a letters-then-digits run the
/// primary pattern catches, and longer designations with interleaved
/// letter/digit groups (GD5SHAAXNQ00). The fallback accepts any
/// alphanumeric token of 8+ characters that opens with two letters and
/// carries a digit, excluding the already-extracted part number.
fn find_model_number(text: &str, part_number: Option<&str>) -> Option<String> {
    if let Some(matched) = MODEL_NUMBER_RE.find(text) {
        let candidate = matched.as_str();
        if Some(candidate) != part_number {
            return Some(candidate.to_string());
        }
    }

    text.split(|ch: char| !ch.is_ascii_alphanumeric())
        .find(|token| {
            token.len() >= 8
                && token.chars().take(2).all(|ch| ch.is_ascii_alphabetic())
                && token.chars().any(|ch| ch.is_ascii_digit())
                && Some(*token) != part_number
        })
        .map(str::to_string)
}

fn find_cart_action(text_lower: &str) -> CartAction {
    if text_lower.contains("add") || text_lower.contains("put") {
        CartAction::Add
    } else if text_lower.contains("remove") || text_lower.contains("delete") {
        CartAction::Remove
    } else if text_lower.contains("view")
        || text_lower.contains("show")
        || text_lower.contains("what")
    {
        CartAction::View
    } else if text_lower.contains("clear") || text_lower.contains("empty") {
        CartAction::Clear
    } else {
        CartAction::View
    }
}
