// Installer Dispatch - API Core
//
// Backend for the installer directory and customer intake. New customers are
// assigned to the installer serving their postal area and the assignee is
// notified by email from a background job.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
