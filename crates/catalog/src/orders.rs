use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::fixtures;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub part_number: String,
    pub name: String,
    pub quantity: u32,
    pub price: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: String,
    pub date: NaiveDate,
    pub customer_email: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_delivery: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<NaiveDate>,
    pub items: Vec<OrderItem>,
    pub total: Decimal,
    pub shipping_address: ShippingAddress,
}

/// Read access to the order-status backend.
#[async_trait]
pub trait OrderStatusProvider: Send + Sync {
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>>;
}

/// Seeded in-memory order store.
#[derive(Clone, Debug)]
pub struct MemoryOrders {
    orders: Vec<Order>,
}

impl MemoryOrders {
    pub fn new() -> Self {
        Self { orders: fixtures::seed_orders() }
    }

    pub fn with_orders(orders: Vec<Order>) -> Self {
        Self { orders }
    }
}

impl Default for MemoryOrders {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStatusProvider for MemoryOrders {
    async fn find_by_order_number(&self, order_number: &str) -> Result<Option<Order>> {
        let number_upper = order_number.to_uppercase();
        Ok(self.orders.iter().find(|order| order.order_number == number_upper).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Order>> {
        let email_lower = email.to_lowercase();
        Ok(self
            .orders
            .iter()
            .filter(|order| order.customer_email.to_lowercase() == email_lower)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::{MemoryOrders, OrderStatusProvider};

    #[tokio::test]
    async fn order_number_lookup_is_case_insensitive() {
        let orders = MemoryOrders::new();
        let order = orders
            .find_by_order_number("ord123456")
            .await
            .expect("lookup")
            .expect("seeded order");
        assert_eq!(order.status, "Shipped");
        assert!(order.tracking_number.is_some());
    }

    #[tokio::test]
    async fn unknown_order_number_misses_cleanly() {
        let orders = MemoryOrders::new();
        assert!(orders.find_by_order_number("ORD000000").await.expect("lookup").is_none());
    }

    #[tokio::test]
    async fn email_lookup_returns_all_matching_orders() {
        let orders = MemoryOrders::new();
        let hits = orders.find_by_email("JANE.SMITH@example.com").await.expect("lookup");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].order_number, "ORD789012");

        assert!(orders.find_by_email("nobody@example.com").await.expect("lookup").is_empty());
    }
}
