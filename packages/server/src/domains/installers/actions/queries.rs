use crate::common::{Actor, Capability, InstallerId};
use crate::domains::installers::models::Installer;
use crate::domains::installers::resolver::{self, Assignment};
use crate::domains::installers::InstallerError;
use crate::kernel::{ServerDeps, StoreError};

/// All installers plus whether a fallback is designated
#[derive(Debug, Clone)]
pub struct InstallerDirectory {
    pub installers: Vec<Installer>,
    pub fallback_set: bool,
}

pub async fn get_installer(
    installer_id: InstallerId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Installer, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    deps.installers
        .find_by_id(installer_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Installer", installer_id).into())
}

/// Installers ordered by company name
pub async fn list_installers(
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<InstallerDirectory, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    let installers = deps.installers.list().await?;
    let fallback_set = installers.iter().any(|i| i.is_fallback);

    Ok(InstallerDirectory {
        installers,
        fallback_set,
    })
}

/// Which installer a postal code would be assigned to, without side effects
pub async fn preview_assignee(
    postal_code: &str,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Assignment, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    Ok(resolver::resolve(deps.installers.as_ref(), postal_code).await?)
}
