use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::info;

use partdesk_catalog::{CartStore, CatalogLookup};

use super::Tool;

/// Shopping-cart operations. Query grammar:
/// `add:part_number:quantity` | `remove:part_number` | `view` | `clear`.
/// Replies are JSON payloads with either a `status` or an `error` field.
pub struct CartTool {
    catalog: Arc<dyn CatalogLookup>,
    store: Arc<dyn CartStore>,
    cart_id: String,
}

impl CartTool {
    pub fn new(catalog: Arc<dyn CatalogLookup>, store: Arc<dyn CartStore>, cart_id: String) -> Self {
        Self { catalog, store, cart_id }
    }

    async fn add(&self, part_number: &str, raw_quantity: &str) -> Result<String> {
        let Ok(quantity) = raw_quantity.trim().parse::<i64>() else {
            return Ok(json!({ "error": "Quantity must be a valid number" }).to_string());
        };
        if quantity <= 0 {
            return Ok(json!({ "error": "Quantity must be positive" }).to_string());
        }

        let Some(part) = self.catalog.get_part(part_number).await? else {
            return Ok(json!({ "error": format!("Part {part_number} not found") }).to_string());
        };

        let new_quantity = self.store.add_item(&self.cart_id, part_number, quantity as u32).await?;
        info!(cart_id = %self.cart_id, part_number, quantity, "added to cart");

        Ok(json!({
            "status": "success",
            "message": format!("Added {quantity} of {} to cart", part.name),
            "part": part,
            "quantity": new_quantity,
        })
        .to_string())
    }

    async fn remove(&self, part_number: &str) -> Result<String> {
        if !self.store.remove_item(&self.cart_id, part_number).await? {
            return Ok(json!({ "error": format!("Part {part_number} not in cart") }).to_string());
        }
        Ok(json!({
            "status": "success",
            "message": format!("Removed part {part_number} from cart"),
        })
        .to_string())
    }

    async fn view(&self) -> Result<String> {
        let lines = self.store.view(&self.cart_id).await?;
        if lines.is_empty() {
            return Ok(json!({
                "status": "success",
                "message": "Your cart is empty",
                "items": [],
            })
            .to_string());
        }

        let mut items = Vec::new();
        let mut total_price = Decimal::ZERO;
        for (part_number, quantity) in &lines {
            let Some(part) = self.catalog.get_part(part_number).await? else {
                continue;
            };
            let line_total = part.price * Decimal::from(*quantity);
            total_price += line_total;
            items.push(json!({
                "part_number": part_number,
                "name": part.name,
                "quantity": quantity,
                "unit_price": part.price,
                "total_price": line_total,
            }));
        }

        Ok(json!({
            "status": "success",
            "message": format!("Cart contains {} items", items.len()),
            "items": items,
            "total_price": total_price,
        })
        .to_string())
    }

    async fn clear(&self) -> Result<String> {
        self.store.clear(&self.cart_id).await?;
        Ok(json!({ "status": "success", "message": "Cart cleared" }).to_string())
    }
}

#[async_trait]
impl Tool for CartTool {
    fn name(&self) -> &'static str {
        "cart_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let segments: Vec<&str> = query.splitn(3, ':').collect();
        let operation = segments[0].trim().to_lowercase();

        match (operation.as_str(), segments.len()) {
            ("add", 3) => self.add(segments[1].trim(), segments[2]).await,
            ("add", _) => {
                Ok(json!({ "error": "Invalid format. Use 'add:part_number:quantity'" }).to_string())
            }
            ("remove", 2) => self.remove(segments[1].trim()).await,
            ("remove", _) => {
                Ok(json!({ "error": "Invalid format. Use 'remove:part_number'" }).to_string())
            }
            ("view", _) => self.view().await,
            ("clear", _) => self.clear().await,
            (other, _) => Ok(json!({
                "error": format!(
                    "Unknown operation: {other}. Valid operations are 'add', 'remove', 'view', 'clear'"
                ),
            })
            .to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use partdesk_catalog::{MemoryCartStore, MemoryCatalog};

    use super::{CartTool, Tool};

    fn tool() -> CartTool {
        CartTool::new(
            Arc::new(MemoryCatalog::new()),
            Arc::new(MemoryCartStore::new()),
            "cart-test".to_string(),
        )
    }

    #[tokio::test]
    async fn add_then_view_then_remove() {
        let tool = tool();

        let added = tool.invoke("add:W10295370A:3").await.expect("add");
        let added: serde_json::Value = serde_json::from_str(&added).expect("json");
        assert_eq!(added["status"], "success");
        assert_eq!(added["quantity"], 3);
        assert_eq!(added["message"], "Added 3 of Refrigerator Water Filter to cart");

        let viewed = tool.invoke("view").await.expect("view");
        let viewed: serde_json::Value = serde_json::from_str(&viewed).expect("json");
        assert_eq!(viewed["message"], "Cart contains 1 items");
        assert_eq!(viewed["items"][0]["quantity"], 3);

        let removed = tool.invoke("remove:W10295370A").await.expect("remove");
        let removed: serde_json::Value = serde_json::from_str(&removed).expect("json");
        assert_eq!(removed["status"], "success");
    }

    #[tokio::test]
    async fn add_accumulates_across_calls() {
        let tool = tool();
        tool.invoke("add:W10295370A:1").await.expect("add");
        let second = tool.invoke("add:W10295370A:2").await.expect("add");
        let second: serde_json::Value = serde_json::from_str(&second).expect("json");
        assert_eq!(second["quantity"], 3);
    }

    #[tokio::test]
    async fn invalid_inputs_become_error_objects() {
        let tool = tool();

        let cases = [
            ("add:W10295370A", "Invalid format. Use 'add:part_number:quantity'"),
            ("add:W10295370A:zero", "Quantity must be a valid number"),
            ("add:W10295370A:0", "Quantity must be positive"),
            ("add:NOPE123:1", "Part NOPE123 not found"),
            ("remove:W10295370A", "Part W10295370A not in cart"),
        ];

        for (query, expected) in cases {
            let result = tool.invoke(query).await.expect("invoke");
            let value: serde_json::Value = serde_json::from_str(&result).expect("json");
            assert_eq!(value["error"], expected, "query: {query}");
        }
    }

    #[tokio::test]
    async fn empty_view_and_clear() {
        let tool = tool();

        let viewed = tool.invoke("view").await.expect("view");
        let viewed: serde_json::Value = serde_json::from_str(&viewed).expect("json");
        assert_eq!(viewed["message"], "Your cart is empty");

        tool.invoke("add:W10190961:1").await.expect("add");
        let cleared = tool.invoke("clear").await.expect("clear");
        let cleared: serde_json::Value = serde_json::from_str(&cleared).expect("json");
        assert_eq!(cleared["message"], "Cart cleared");

        let viewed = tool.invoke("view").await.expect("view");
        let viewed: serde_json::Value = serde_json::from_str(&viewed).expect("json");
        assert_eq!(viewed["items"].as_array().expect("items").len(), 0);
    }

    #[tokio::test]
    async fn unknown_operation_is_rejected() {
        let result = tool().invoke("checkout").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert!(value["error"].as_str().expect("error").starts_with("Unknown operation: checkout"));
    }
}
