use serde::{Deserialize, Serialize};

/// Closed set of request categories the assistant can route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Lookup,
    Compatibility,
    Install,
    Diagnose,
    Cart,
    Order,
    Status,
    OutOfScope,
}

impl Intent {
    pub fn label(&self) -> &'static str {
        match self {
            Intent::Lookup => "lookup",
            Intent::Compatibility => "compatibility",
            Intent::Install => "install",
            Intent::Diagnose => "diagnose",
            Intent::Cart => "cart",
            Intent::Order => "order",
            Intent::Status => "status",
            Intent::OutOfScope => "out_of_scope",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "lookup" => Some(Intent::Lookup),
            "compatibility" => Some(Intent::Compatibility),
            "install" => Some(Intent::Install),
            "diagnose" => Some(Intent::Diagnose),
            "cart" => Some(Intent::Cart),
            "order" => Some(Intent::Order),
            "status" => Some(Intent::Status),
            "out_of_scope" => Some(Intent::OutOfScope),
            _ => None,
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which stage of the classifier produced the label. Diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntentSource {
    Rule,
    Override,
    Llm,
    Default,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassificationResult {
    pub intent: Intent,
    pub source: IntentSource,
}

#[cfg(test)]
mod tests {
    use super::Intent;

    #[test]
    fn labels_round_trip() {
        let all = [
            Intent::Lookup,
            Intent::Compatibility,
            Intent::Install,
            Intent::Diagnose,
            Intent::Cart,
            Intent::Order,
            Intent::Status,
            Intent::OutOfScope,
        ];
        for intent in all {
            assert_eq!(Intent::from_label(intent.label()), Some(intent));
        }
    }

    #[test]
    fn unknown_label_is_rejected() {
        assert_eq!(Intent::from_label("chitchat"), None);
    }
}
