use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use uuid::Uuid;

use partdesk_core::config::AppConfig;
use partdesk_core::Intent;

use partdesk_catalog::{MemoryCartStore, MemoryCatalog, MemoryDocs, MemoryOrders};

use crate::llm::DeepseekClassifier;
use crate::router::ToolRouter;
use crate::tools::{
    CartTool, CompatibilityTool, ErrorDiagnosisTool, InstallationGuideTool, OrderStatusTool,
    ProductLookupTool, ToolRegistry,
};

/// Wire a router over the seeded in-memory collaborators. One router per
/// logical session; the cart id comes from config or is generated fresh.
pub fn build_router(config: &AppConfig) -> Result<ToolRouter> {
    let catalog = Arc::new(MemoryCatalog::new());
    let docs = Arc::new(MemoryDocs::new());
    let cart_store = Arc::new(MemoryCartStore::new());
    let orders = Arc::new(MemoryOrders::new());

    let cart_id = config
        .cart
        .cart_id
        .clone()
        .unwrap_or_else(|| format!("cart:{}", Uuid::new_v4()));

    let mut registry = ToolRegistry::new();
    registry.register(Intent::Lookup, Arc::new(ProductLookupTool::new(catalog.clone())));
    registry.register(Intent::Compatibility, Arc::new(CompatibilityTool::new(catalog.clone())));
    registry.register(Intent::Install, Arc::new(InstallationGuideTool::new(docs.clone())));
    registry.register(
        Intent::Diagnose,
        Arc::new(ErrorDiagnosisTool::new(docs.clone(), catalog.clone())),
    );
    registry.register(
        Intent::Cart,
        Arc::new(CartTool::new(catalog.clone(), cart_store, cart_id)),
    );
    registry.register(Intent::Order, Arc::new(OrderStatusTool::new(orders)));
    // the status intent stays unregistered; the router reports it as
    // unroutable

    let mut router = ToolRouter::new(registry);

    match DeepseekClassifier::from_config(&config.llm)? {
        Some(classifier) => {
            info!(model = %config.llm.model, "llm fallback classifier enabled");
            router = router.with_llm(Arc::new(classifier));
        }
        None => {
            info!("no llm api key configured; running rules-only");
        }
    }

    Ok(router)
}

#[cfg(test)]
mod tests {
    use partdesk_core::config::AppConfig;

    use super::build_router;

    #[tokio::test]
    async fn default_config_builds_a_working_router() {
        let mut router = build_router(&AppConfig::default()).expect("build");
        let result = router.process_query("I need a water filter for my refrigerator").await;
        assert_eq!(result.tool_name, "product_lookup_tool");
        assert!(result.result.contains("Refrigerator Water Filter"));
    }
}
