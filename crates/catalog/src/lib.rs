//! Collaborator interfaces for the partdesk agent: the product catalog,
//! the documentation store, the shopping cart, and the order-status
//! backend. Each trait ships with a seeded in-memory implementation used
//! in development and tests; production deployments swap in real
//! backends behind the same traits.

pub mod cart;
pub mod docs;
pub mod fixtures;
pub mod orders;
pub mod parts;

pub use cart::{CartStore, MemoryCartStore};
pub use docs::{Doc, DocType, DocsLookup, MemoryDocs};
pub use orders::{MemoryOrders, Order, OrderItem, OrderStatusProvider};
pub use parts::{ApplianceType, CatalogLookup, MemoryCatalog, Part};
