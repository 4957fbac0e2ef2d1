use crate::common::{Actor, Capability, CustomerId, PageArgs};
use crate::domains::customers::models::Customer;
use crate::domains::customers::CustomerError;
use crate::kernel::{ServerDeps, StoreError};

/// A page of customers, newest first
#[derive(Debug, Clone)]
pub struct CustomerPage {
    pub customers: Vec<Customer>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

pub async fn list_customers(
    page: PageArgs,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<CustomerPage, CustomerError> {
    actor.can(Capability::ManageCustomers).check()?;

    let page = page.validate();
    let customers = deps.customers.list(page.limit, page.offset).await?;
    let total = deps.customers.count().await?;

    Ok(CustomerPage {
        customers,
        total,
        limit: page.limit,
        offset: page.offset,
    })
}

pub async fn get_customer(
    customer_id: CustomerId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Customer, CustomerError> {
    actor.can(Capability::ManageCustomers).check()?;

    deps.customers
        .find_by_id(customer_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Customer", customer_id).into())
}
