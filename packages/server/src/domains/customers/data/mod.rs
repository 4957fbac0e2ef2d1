pub mod customer;

pub use customer::{CustomerData, CustomerInput, CustomerPageData};
