use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;

use partdesk_catalog::OrderStatusProvider;

use super::Tool;

/// Order-status lookup. Query grammar:
/// `order_number:email` | `order_number` | `email:address` | `status`.
pub struct OrderStatusTool {
    orders: Arc<dyn OrderStatusProvider>,
}

impl OrderStatusTool {
    pub fn new(orders: Arc<dyn OrderStatusProvider>) -> Self {
        Self { orders }
    }

    async fn by_order_number(&self, order_number: &str) -> Result<String> {
        let number_upper = order_number.trim().to_uppercase();
        match self.orders.find_by_order_number(&number_upper).await? {
            Some(order) => Ok(serde_json::to_string(&order)?),
            None => Ok(json!({ "error": format!("Order '{number_upper}' not found") }).to_string()),
        }
    }

    async fn by_email(&self, email: &str) -> Result<String> {
        let email_lower = email.trim().to_lowercase();
        let orders = self.orders.find_by_email(&email_lower).await?;
        if orders.is_empty() {
            return Ok(
                json!({ "error": format!("No orders found for email '{email_lower}'") }).to_string()
            );
        }
        Ok(json!({ "customer_email": email_lower, "orders": orders }).to_string())
    }
}

#[async_trait]
impl Tool for OrderStatusTool {
    fn name(&self) -> &'static str {
        "order_status_tool"
    }

    async fn invoke(&self, query: &str) -> Result<String> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(json!({ "error": "Order number or email is required" }).to_string());
        }

        if let Some(email) = query.strip_prefix("email:") {
            return self.by_email(email).await;
        }

        // "order_number:email": the order number is authoritative.
        if let Some((order_number, _email)) = query.split_once(':') {
            return self.by_order_number(order_number).await;
        }

        if query.contains('@') {
            return self.by_email(query).await;
        }

        self.by_order_number(query).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use partdesk_catalog::MemoryOrders;

    use super::{OrderStatusTool, Tool};

    fn tool() -> OrderStatusTool {
        OrderStatusTool::new(Arc::new(MemoryOrders::new()))
    }

    #[tokio::test]
    async fn lookup_by_order_number() {
        let result = tool().invoke("ORD123456").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["status"], "Shipped");
        assert_eq!(value["carrier"], "UPS");
    }

    #[tokio::test]
    async fn lookup_by_email_collects_orders() {
        let result = tool().invoke("email:john.doe@example.com").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["orders"].as_array().expect("orders").len(), 1);
    }

    #[tokio::test]
    async fn bare_email_is_recognized() {
        let result = tool().invoke("bob.jones@example.com").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["orders"][0]["status"], "Delivered");
    }

    #[tokio::test]
    async fn combined_query_prefers_the_order_number() {
        let result = tool().invoke("ORD789012:jane.smith@example.com").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["status"], "Processing");
    }

    #[tokio::test]
    async fn generic_status_query_reports_not_found() {
        let result = tool().invoke("status").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["error"], "Order 'STATUS' not found");
    }

    #[tokio::test]
    async fn empty_query_requires_an_identifier() {
        let result = tool().invoke("").await.expect("invoke");
        let value: serde_json::Value = serde_json::from_str(&result).expect("json");
        assert_eq!(value["error"], "Order number or email is required");
    }
}
