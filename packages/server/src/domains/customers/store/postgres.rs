use async_trait::async_trait;
use sqlx::PgPool;

use super::CustomerStore;
use crate::common::{CustomerId, InstallerId};
use crate::domains::customers::models::{Customer, EmailDeliveryStatus};
use crate::kernel::{StoreError, StoreResult};

const COLUMNS: &str = "id, name, postal_code, phone_number, email, created_at, \
     assigned_installer_id, assigned_installer_name, email_delivery_status";

#[derive(Clone)]
pub struct PostgresCustomerStore {
    pool: PgPool,
}

impl PostgresCustomerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerStore for PostgresCustomerStore {
    async fn insert(&self, customer: &Customer) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (
                id, name, postal_code, phone_number, email, created_at,
                assigned_installer_id, assigned_installer_name, email_delivery_status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(customer.id)
        .bind(&customer.name)
        .bind(&customer.postal_code)
        .bind(&customer.phone_number)
        .bind(&customer.email)
        .bind(customer.created_at)
        .bind(customer.assigned_installer_id)
        .bind(&customer.assigned_installer_name)
        .bind(customer.email_delivery_status)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: CustomerId) -> StoreResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(customer)
    }

    async fn list(&self, limit: i64, offset: i64) -> StoreResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {COLUMNS} FROM customers ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn set_assigned_installer(
        &self,
        customer_id: CustomerId,
        installer_id: InstallerId,
        company_name: &str,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE customers SET assigned_installer_id = $2, assigned_installer_name = $3 WHERE id = $1",
        )
        .bind(customer_id)
        .bind(installer_id)
        .bind(company_name)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", customer_id));
        }
        Ok(())
    }

    async fn set_email_delivery_status(
        &self,
        customer_id: CustomerId,
        status: EmailDeliveryStatus,
    ) -> StoreResult<()> {
        let result = sqlx::query("UPDATE customers SET email_delivery_status = $2 WHERE id = $1")
            .bind(customer_id)
            .bind(status)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::not_found("Customer", customer_id));
        }
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
