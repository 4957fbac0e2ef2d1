//! Installer persistence.
//!
//! - `PostgresInstallerStore`: production store (sqlx)
//! - `MemoryInstallerStore`: tests and `STORE=memory` development runs

mod memory;
mod postgres;

pub use memory::MemoryInstallerStore;
pub use postgres::PostgresInstallerStore;

use async_trait::async_trait;

use crate::common::InstallerId;
use crate::domains::installers::models::Installer;
use crate::kernel::StoreResult;

#[async_trait]
pub trait InstallerStore: Send + Sync {
    /// Persist a new installer as given, including its fallback flag
    async fn insert(&self, installer: &Installer) -> StoreResult<()>;

    /// Overwrite an existing installer. `NotFound` when the id is unknown.
    async fn update(&self, installer: &Installer) -> StoreResult<()>;

    async fn find_by_id(&self, id: InstallerId) -> StoreResult<Option<Installer>>;

    /// All installers ordered by company name
    async fn list(&self) -> StoreResult<Vec<Installer>>;

    /// Installers whose postal areas contain `prefix` as an exact element,
    /// ordered by id
    async fn find_by_postal_area(&self, prefix: &str) -> StoreResult<Vec<Installer>>;

    /// Installers flagged as fallback, ordered by id. More than one means the
    /// single-fallback rule was broken by a concurrent writer.
    async fn find_fallbacks(&self) -> StoreResult<Vec<Installer>>;

    /// Flag `id` as the fallback and clear the flag everywhere else
    async fn set_fallback(&self, id: InstallerId) -> StoreResult<Installer>;

    /// Reachability check for the health endpoint
    async fn ping(&self) -> StoreResult<()>;
}
