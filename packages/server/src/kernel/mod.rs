//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod email;
pub mod jobs;
pub mod store_error;
pub mod test_dependencies;
pub mod traits;

pub use deps::ServerDeps;
pub use email::{LogEmailSender, SmtpEmailSender};
pub use store_error::{StoreError, StoreResult};
pub use test_dependencies::{MockEmailSender, SentEmail, TestDependencies};
pub use traits::*;
