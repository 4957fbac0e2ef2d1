use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::CustomerStore;
use crate::common::{CustomerId, InstallerId};
use crate::domains::customers::models::{Customer, EmailDeliveryStatus};
use crate::kernel::{StoreError, StoreResult};

/// In-memory customer store. Data is lost on restart.
#[derive(Default)]
pub struct MemoryCustomerStore {
    customers: RwLock<HashMap<CustomerId, Customer>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.customers.read().await.is_empty()
    }

    async fn modify<F>(&self, id: CustomerId, f: F) -> StoreResult<()>
    where
        F: FnOnce(&mut Customer) + Send,
    {
        let mut customers = self.customers.write().await;
        let customer = customers
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Customer", id))?;
        f(customer);
        Ok(())
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn insert(&self, customer: &Customer) -> StoreResult<()> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        Ok(self.customers.read().await.get(&id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<Customer>> {
        let mut customers: Vec<Customer> = self.customers.read().await.values().cloned().collect();
        customers.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(customers
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> StoreResult<i64> {
        Ok(self.customers.read().await.len() as i64)
    }

    async fn set_assigned_installer(
        &self,
        customer_id: CustomerId,
        installer_id: InstallerId,
        company_name: &str,
    ) -> StoreResult<()> {
        let company_name = company_name.to_string();
        self.modify(customer_id, move |customer| {
            customer.assigned_installer_id = Some(installer_id);
            customer.assigned_installer_name = Some(company_name);
        })
        .await
    }

    async fn set_email_delivery_status(
        &self,
        customer_id: CustomerId,
        status: EmailDeliveryStatus,
    ) -> StoreResult<()> {
        self.modify(customer_id, move |customer| {
            customer.email_delivery_status = status;
        })
        .await
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
