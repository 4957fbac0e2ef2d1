// HTTP routes
pub mod assignee;
pub mod customers;
pub mod health;
pub mod installers;

pub use assignee::*;
pub use customers::*;
pub use health::*;
pub use installers::*;
