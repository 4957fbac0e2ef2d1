//! Customer persistence.

mod memory;
mod postgres;

pub use memory::MemoryCustomerStore;
pub use postgres::PostgresCustomerStore;

use async_trait::async_trait;

use crate::common::{CustomerId, InstallerId};
use crate::domains::customers::models::{Customer, EmailDeliveryStatus};
use crate::kernel::StoreResult;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn insert(&self, customer: &Customer) -> StoreResult<()>;

    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>>;

    /// Newest first
    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<Customer>>;

    async fn count(&self) -> StoreResult<i64>;

    async fn set_assigned_installer(
        &self,
        customer_id: CustomerId,
        installer_id: InstallerId,
        company_name: &str,
    ) -> StoreResult<()>;

    async fn set_email_delivery_status(
        &self,
        customer_id: CustomerId,
        status: EmailDeliveryStatus,
    ) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}
