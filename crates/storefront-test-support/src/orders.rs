//! Test order repositories — recording and failing `OrderRepository`
//! implementations.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use storefront_core::error::StorefrontError;
use storefront_core::model::{Order, OrderView, ProductSummary};
use storefront_core::repository::OrderRepository;
use uuid::Uuid;

/// An order repository that records every insert and status write so tests
/// can assert on exactly what was persisted.
#[derive(Debug, Default)]
pub struct RecordingOrders {
    orders: Mutex<Vec<Order>>,
    product_summaries: Mutex<HashMap<Uuid, ProductSummary>>,
    buyer_names: Mutex<HashMap<Uuid, String>>,
    status_writes: Mutex<Vec<(Uuid, String)>>,
}

impl RecordingOrders {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an order directly.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_order(&self, order: Order) {
        self.orders.lock().unwrap().push(order);
    }

    /// Registers a product summary used when resolving order views.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_product_summary(&self, summary: ProductSummary) {
        self.product_summaries
            .lock()
            .unwrap()
            .insert(summary.id, summary);
    }

    /// Registers a buyer name used when resolving order views.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn seed_buyer_name(&self, buyer: Uuid, name: &str) {
        self.buyer_names
            .lock()
            .unwrap()
            .insert(buyer, name.to_owned());
    }

    /// Snapshot of every persisted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }

    /// Snapshot of every `(order_id, status)` write performed through
    /// `update_status`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn status_writes(&self) -> Vec<(Uuid, String)> {
        self.status_writes.lock().unwrap().clone()
    }

    fn view_of(&self, order: &Order) -> OrderView {
        let summaries = self.product_summaries.lock().unwrap();
        let products = order
            .product_ids
            .iter()
            .filter_map(|id| summaries.get(id).cloned())
            .collect();
        OrderView {
            id: order.id,
            products,
            buyer: order.buyer,
            buyer_name: self.buyer_names.lock().unwrap().get(&order.buyer).cloned(),
            payment: order.payment.clone(),
            status: order.status.clone(),
            created_at: order.created_at,
        }
    }
}

#[async_trait]
impl OrderRepository for RecordingOrders {
    async fn insert(&self, order: Order) -> Result<(), StorefrontError> {
        self.orders.lock().unwrap().push(order);
        Ok(())
    }

    async fn update_status(&self, order_id: Uuid, status: &str) -> Result<Order, StorefrontError> {
        self.status_writes
            .lock()
            .unwrap()
            .push((order_id, status.to_owned()));
        let mut orders = self.orders.lock().unwrap();
        match orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status.to_owned();
                Ok(order.clone())
            }
            None => Err(StorefrontError::NotFound(format!("order {order_id}"))),
        }
    }

    async fn for_buyer(&self, buyer: Uuid) -> Result<Vec<OrderView>, StorefrontError> {
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.buyer == buyer)
            .map(|o| self.view_of(o))
            .collect())
    }

    async fn all(&self) -> Result<Vec<OrderView>, StorefrontError> {
        let mut orders = self.orders.lock().unwrap().clone();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders.iter().map(|o| self.view_of(o)).collect())
    }
}

/// An order repository whose every operation fails with an infrastructure
/// error.
#[derive(Debug, Default)]
pub struct FailingOrders;

#[async_trait]
impl OrderRepository for FailingOrders {
    async fn insert(&self, _order: Order) -> Result<(), StorefrontError> {
        Err(StorefrontError::Infrastructure("connection refused".into()))
    }

    async fn update_status(
        &self,
        _order_id: Uuid,
        _status: &str,
    ) -> Result<Order, StorefrontError> {
        Err(StorefrontError::Infrastructure("connection refused".into()))
    }

    async fn for_buyer(&self, _buyer: Uuid) -> Result<Vec<OrderView>, StorefrontError> {
        Err(StorefrontError::Infrastructure("connection refused".into()))
    }

    async fn all(&self) -> Result<Vec<OrderView>, StorefrontError> {
        Err(StorefrontError::Infrastructure("connection refused".into()))
    }
}
