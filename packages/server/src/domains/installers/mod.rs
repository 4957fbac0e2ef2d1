//! Installer directory and postal-code assignment.
//!
//! Installers claim postal areas (postal-code prefixes). The resolver picks
//! the installer with the longest matching area for a customer's postal code,
//! or the single fallback installer when nothing matches.

pub mod actions;
pub mod data;
pub mod models;
pub mod resolver;
pub mod store;

use thiserror::Error;

use crate::common::{AuthError, ValidationError};
use crate::kernel::StoreError;

pub use data::{InstallerData, InstallerDirectoryData, InstallerInput};
pub use models::{Installer, InstallerFields};
pub use resolver::{resolve, resolve_among, Assignment, ResolveError};
pub use store::{InstallerStore, MemoryInstallerStore, PostgresInstallerStore};

/// Errors from installer directory actions
#[derive(Error, Debug)]
pub enum InstallerError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
