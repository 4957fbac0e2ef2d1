use tracing::info;

use crate::common::{Actor, Capability, InstallerId};
use crate::domains::installers::data::InstallerInput;
use crate::domains::installers::models::Installer;
use crate::domains::installers::InstallerError;
use crate::kernel::{ServerDeps, StoreError};

/// Add an installer. A fallback flag on the input moves the fallback here.
pub async fn add_installer(
    input: InstallerInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Installer, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    let fields = input.validate()?;
    let mut installer = Installer::new(fields, actor.id());

    deps.installers.insert(&installer).await?;
    if installer.is_fallback {
        installer = deps.installers.set_fallback(installer.id).await?;
    }

    info!(
        installer_id = %installer.id,
        company_name = %installer.company_name,
        is_fallback = installer.is_fallback,
        "Installer added"
    );

    Ok(installer)
}

/// Replace every editable field of an installer.
///
/// Setting `is_fallback` moves the fallback here; clearing it on the current
/// fallback leaves the directory without one.
pub async fn edit_installer(
    installer_id: InstallerId,
    input: InstallerInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Installer, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    let fields = input.validate()?;
    let mut installer = deps
        .installers
        .find_by_id(installer_id)
        .await?
        .ok_or_else(|| StoreError::not_found("Installer", installer_id))?;

    installer.apply(fields, actor.id());
    deps.installers.update(&installer).await?;
    if installer.is_fallback {
        installer = deps.installers.set_fallback(installer.id).await?;
    }

    info!(installer_id = %installer.id, is_fallback = installer.is_fallback, "Installer updated");

    Ok(installer)
}

/// Make `installer_id` the only fallback installer
pub async fn set_fallback_installer(
    installer_id: InstallerId,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<Installer, InstallerError> {
    actor.can(Capability::ManageInstallers).check()?;

    let installer = deps.installers.set_fallback(installer_id).await?;

    info!(installer_id = %installer.id, set_by = %actor.id(), "Fallback installer set");

    Ok(installer)
}
