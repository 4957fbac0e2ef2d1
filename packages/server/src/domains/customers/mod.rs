//! Customers - leads submitted through intake and their assignment state.

pub mod actions;
pub mod data;
pub mod models;
pub mod store;

use thiserror::Error;

use crate::common::AuthError;
use crate::kernel::StoreError;

pub use data::{CustomerData, CustomerInput, CustomerPageData};
pub use models::{Customer, CustomerFields, EmailDeliveryStatus};
pub use store::{CustomerStore, MemoryCustomerStore, PostgresCustomerStore};

#[derive(Error, Debug)]
pub enum CustomerError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
