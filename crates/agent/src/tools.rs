use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;

use partdesk_core::Intent;

mod cart;
mod compatibility;
mod diagnose;
mod install;
mod lookup;
mod order;

pub use cart::CartTool;
pub use compatibility::CompatibilityTool;
pub use diagnose::ErrorDiagnosisTool;
pub use install::InstallationGuideTool;
pub use lookup::ProductLookupTool;
pub use order::OrderStatusTool;

/// One intent handler. `query` is the canonical sub-query string the
/// router builds; the return value is the user-facing result body.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    async fn invoke(&self, query: &str) -> Result<String>;
}

/// Static intent-to-handler table. Intents without a registered tool are
/// unroutable and reported as such by the router.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<Intent, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, intent: Intent, tool: Arc<dyn Tool>) {
        self.tools.insert(intent, tool);
    }

    pub fn get(&self, intent: Intent) -> Option<&Arc<dyn Tool>> {
        self.tools.get(&intent)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use async_trait::async_trait;

    use partdesk_core::Intent;

    use super::{Tool, ToolRegistry};

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &'static str {
            "echo_tool"
        }

        async fn invoke(&self, query: &str) -> Result<String> {
            Ok(query.to_string())
        }
    }

    #[test]
    fn registry_maps_intents_to_tools() {
        let mut registry = ToolRegistry::new();
        assert!(registry.is_empty());

        registry.register(Intent::Lookup, Arc::new(EchoTool));
        assert_eq!(registry.len(), 1);
        assert!(registry.get(Intent::Lookup).is_some());
        assert!(registry.get(Intent::Status).is_none());
    }
}
