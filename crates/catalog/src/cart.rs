use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Shopping-cart storage keyed by cart identifier. Quantities are
/// per-part; adding accumulates, removing deletes the line.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Returns the new total quantity for the part.
    async fn add_item(&self, cart_id: &str, part_number: &str, quantity: u32) -> Result<u32>;

    /// Returns false when the part was not in the cart.
    async fn remove_item(&self, cart_id: &str, part_number: &str) -> Result<bool>;

    /// Cart lines in stable part-number order.
    async fn view(&self, cart_id: &str) -> Result<Vec<(String, u32)>>;

    async fn clear(&self, cart_id: &str) -> Result<()>;
}

/// In-memory cart store. Carts live as long as the process; there is no
/// expiry at this layer.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: Mutex<HashMap<String, BTreeMap<String, u32>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn add_item(&self, cart_id: &str, part_number: &str, quantity: u32) -> Result<u32> {
        let mut carts = self.carts.lock().await;
        let cart = carts.entry(cart_id.to_string()).or_default();
        let line = cart.entry(part_number.to_string()).or_insert(0);
        *line = line.saturating_add(quantity);
        Ok(*line)
    }

    async fn remove_item(&self, cart_id: &str, part_number: &str) -> Result<bool> {
        let mut carts = self.carts.lock().await;
        Ok(carts
            .get_mut(cart_id)
            .map_or(false, |cart| cart.remove(part_number).is_some()))
    }

    async fn view(&self, cart_id: &str) -> Result<Vec<(String, u32)>> {
        let carts = self.carts.lock().await;
        Ok(carts
            .get(cart_id)
            .map(|cart| cart.iter().map(|(part, qty)| (part.clone(), *qty)).collect())
            .unwrap_or_default())
    }

    async fn clear(&self, cart_id: &str) -> Result<()> {
        let mut carts = self.carts.lock().await;
        carts.remove(cart_id);
        Ok(())
    }
}
