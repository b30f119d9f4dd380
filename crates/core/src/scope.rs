//! Domain gate: decides whether free text is about refrigerator or
//! dishwasher parts at all. Everything downstream assumes this ran first.

use once_cell::sync::Lazy;
use regex::Regex;

/// Appliance vocabulary that marks a query as in-domain. Matched as
/// substrings of the lowercased text.
const APPLIANCE_KEYWORDS: &[&str] = &[
    // refrigerator
    "refrigerator",
    "fridge",
    "freezer",
    "ice maker",
    "ice dispenser",
    "water dispenser",
    "water filter",
    "fridge drawer",
    "crisper",
    "refrigeration",
    "cooling",
    "compressor",
    "condenser",
    "evaporator",
    "freon",
    "coolant",
    "temperature control",
    "defrost",
    // dishwasher
    "dishwasher",
    "dish washer",
    "dish",
    "dishes",
    "rinse",
    "wash cycle",
    "spray arm",
    "detergent dispenser",
    "rack",
    "silverware basket",
    "drain pump",
    "rinse aid",
    "dishwashing",
    "dry cycle",
    "heating element",
    "water inlet",
    "float switch",
];

const PART_KEYWORDS: &[&str] = &[
    "compressor",
    "condenser",
    "evaporator",
    "fan",
    "motor",
    "filter",
    "water filter",
    "ice maker",
    "thermostat",
    "temperature control",
    "defrost",
    "heater",
    "drawer",
    "seal",
    "gasket",
    "shelf",
    "bin",
    "door",
    "hinge",
    "handle",
    "light",
    "switch",
    "water line",
    "water valve",
    "dispenser",
    "control board",
    "circuit board",
    "pump",
    "spray arm",
    "rack",
    "basket",
    "door latch",
    "soap dispenser",
    "detergent dispenser",
    "heating element",
    "water inlet valve",
    "drain hose",
    "float switch",
    "timer",
    "control panel",
    "wash arm",
    "rinse aid dispenser",
];

const APPLIANCE_BRANDS: &[&str] = &[
    "whirlpool",
    "maytag",
    "kitchenaid",
    "ge",
    "samsung",
    "lg",
    "bosch",
    "frigidaire",
    "electrolux",
    "kenmore",
    "amana",
    "thermador",
    "miele",
    "subzero",
    "wolf",
    "viking",
    "haier",
    "hotpoint",
    "fisher & paykel",
];

/// Terms about appliances we do not support. Matched as whole
/// words/phrases so "dishwasher" never trips "washer".
const OUT_OF_SCOPE_TERMS: &[&str] = &[
    "stove",
    "oven",
    "microwave",
    "washer",
    "dryer",
    "washing machine",
    "clothes",
    "laundry",
    "air conditioner",
    "ac unit",
    "hvac",
    "vacuum",
    "blender",
    "toaster",
    "coffee maker",
    "kettle",
    "mixer",
    "grill",
    "range",
    "bbq",
    "tv",
    "television",
    "computer",
    "laptop",
    "printer",
];

const MODEL_PREFIXES: &[&str] = &[
    "GDF", "GDT", "WDF", "WDT", "MDB", "PD", "LDF", "LDT", "DW", "FD", "RF", "WRF", "WRS", "GSS",
    "GSL", "GTS", "GTH", "WRX",
];

static MODEL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // GDF520, WDF540PADM, GDF520PGJWW
        Regex::new(r"\b[A-Z]{2,4}\d{2,4}[A-Z0-9]{0,6}\b").expect("model pattern"),
        // GE-style GS-series with interleaved digits
        Regex::new(r"\b[A-Z]{1,2}\d{1,2}[A-Z]{1,2}\d{1,4}[A-Z]{0,2}\b").expect("model pattern"),
        // decimal series designations
        Regex::new(r"\b\d{2,3}\.\d\b").expect("model pattern"),
    ]
});

/// Queries with a pinned verdict, checked before every other rule.
/// Exact lowercase comparison; extend with care.
const PINNED_SCOPE_VERDICTS: &[(&str, bool)] = &[
    ("is this part compatible and how do i install it?", true),
    ("i need a part", false),
];

/// Whole-word containment over a space-padded haystack.
fn contains_word(text_lower: &str, term: &str) -> bool {
    let padded = format!(" {text_lower} ");
    padded.contains(&format!(" {term} "))
}

/// Returns true when the text plausibly concerns refrigerator or
/// dishwasher parts. Rules run in a fixed order; the first decisive
/// rule wins.
pub fn is_in_scope(text: &str) -> bool {
    let text_lower = text.to_lowercase();

    for (pinned, verdict) in PINNED_SCOPE_VERDICTS {
        if text_lower == *pinned {
            return *verdict;
        }
    }

    // Model numbers are uppercase-alphanumeric, so they are scanned on the
    // raw text. A hit counts when it carries a known prefix or is long
    // enough to be a full model designation.
    for pattern in MODEL_PATTERNS.iter() {
        for matched in pattern.find_iter(text) {
            let candidate = matched.as_str();
            if MODEL_PREFIXES.iter().any(|prefix| candidate.starts_with(prefix)) {
                return true;
            }
            if candidate.len() >= 8 {
                return true;
            }
        }
    }

    // Oven heating elements are a different product line entirely.
    if text_lower.contains("heating element") && text_lower.contains("oven") {
        return false;
    }

    if text_lower.contains("appliance")
        && APPLIANCE_BRANDS.iter().any(|brand| text_lower.contains(brand))
    {
        return true;
    }

    let has_out_of_scope = OUT_OF_SCOPE_TERMS.iter().any(|term| contains_word(&text_lower, term));
    let has_in_scope_appliance =
        APPLIANCE_KEYWORDS.iter().any(|term| text_lower.contains(term));

    if has_out_of_scope && !has_in_scope_appliance {
        return false;
    }
    if has_in_scope_appliance {
        return true;
    }

    if PART_KEYWORDS.iter().any(|part| text_lower.contains(part)) {
        return true;
    }

    let word_count = text_lower.split_whitespace().count();

    // A brand alone is too vague ("my LG is acting up"); require either a
    // longer query or an accompanying part keyword.
    for brand in APPLIANCE_BRANDS {
        if text_lower.contains(brand)
            && (word_count > 4 || PART_KEYWORDS.iter().any(|part| text_lower.contains(part)))
        {
            return true;
        }
    }

    if text_lower.contains("part") {
        return word_count > 4;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::is_in_scope;

    #[test]
    fn recognized_model_numbers_are_in_scope() {
        assert!(is_in_scope("Does this fit WDT780SAEM1?"));
        assert!(is_in_scope("Parts for my GDF520PGJWW"));
        assert!(is_in_scope("Will this work with a KUDS30IXBL?"));
    }

    #[test]
    fn oven_heating_element_is_excluded() {
        assert!(!is_in_scope("I need a heating element for my oven"));
        assert!(is_in_scope("dishwasher heating element replacement"));
    }

    #[test]
    fn out_of_scope_appliances_are_rejected() {
        let cases = [
            "My microwave is broken",
            "Need a belt for my dryer",
            "washing machine won't spin",
            "my tv has no picture",
        ];
        for text in cases {
            assert!(!is_in_scope(text), "expected out of scope: {text}");
        }
    }

    #[test]
    fn out_of_scope_term_does_not_shadow_in_scope_appliance() {
        assert!(is_in_scope("The fridge next to my stove is leaking"));
    }

    #[test]
    fn appliance_keywords_are_in_scope() {
        assert!(is_in_scope("My refrigerator isn't cooling"));
        assert!(is_in_scope("dishwasher rack replacement"));
        assert!(is_in_scope("where can I buy a water filter"));
    }

    #[test]
    fn dishwasher_does_not_trip_washer_term() {
        assert!(is_in_scope("my dishwasher is leaking"));
    }

    #[test]
    fn part_keyword_alone_is_in_scope() {
        assert!(is_in_scope("I need a new door gasket"));
    }

    #[test]
    fn brand_requires_context() {
        assert!(is_in_scope("My Whirlpool has a broken compressor"));
        assert!(is_in_scope("Do you carry Whirlpool replacement shelves for the big models"));
    }

    #[test]
    fn bare_part_mention_is_too_vague() {
        assert!(!is_in_scope("I need a part"));
        assert!(is_in_scope("I need a part for my kitchen appliance today"));
    }

    #[test]
    fn pinned_queries_keep_their_verdicts() {
        assert!(is_in_scope("Is this part compatible and how do I install it?"));
    }

    #[test]
    fn unrelated_text_is_out_of_scope() {
        assert!(!is_in_scope("What's the weather like today?"));
        assert!(!is_in_scope(""));
    }
}
