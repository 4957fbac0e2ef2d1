//! Authorization for store-touching actions.
//!
//! Every action checks a capability before it reads or writes a store:
//!
//! ```rust,ignore
//! use crate::common::auth::{Actor, Capability};
//!
//! Actor::new(member_id, is_admin)
//!     .can(Capability::ManageInstallers)
//!     .check()?;
//! ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
