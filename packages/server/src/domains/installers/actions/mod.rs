//! Installer directory actions
//!
//! Every action checks `Capability::ManageInstallers` before touching a store.

mod mutations;
mod queries;

pub use mutations::*;
pub use queries::*;
