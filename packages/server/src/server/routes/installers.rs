use axum::extract::{Extension, Path};

use crate::common::InstallerId;
use crate::domains::installers::{actions, InstallerData, InstallerDirectoryData, InstallerInput};
use crate::server::app::AxumAppState;
use crate::server::extract::ApiJson;
use crate::server::middleware::CurrentActor;
use crate::server::response::{ApiError, ApiSuccess};

fn parse_installer_id(raw: &str) -> Result<InstallerId, ApiError> {
    InstallerId::parse(raw)
        .map_err(|_| ApiError::BadRequest(format!("Invalid installer id: {}", raw)))
}

/// GET /api/v1/installers
pub async fn list_installers_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
) -> Result<ApiSuccess<InstallerDirectoryData>, ApiError> {
    let directory = actions::list_installers(&actor, &state.deps).await?;
    Ok(ApiSuccess::ok(directory.into()))
}

/// POST /api/v1/installers
pub async fn create_installer_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    ApiJson(input): ApiJson<InstallerInput>,
) -> Result<ApiSuccess<InstallerData>, ApiError> {
    let installer = actions::add_installer(input, &actor, &state.deps).await?;
    Ok(ApiSuccess::created(installer.into()))
}

/// GET /api/v1/installers/{id}
pub async fn get_installer_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<ApiSuccess<InstallerData>, ApiError> {
    let id = parse_installer_id(&id)?;
    let installer = actions::get_installer(id, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(installer.into()))
}

/// PUT /api/v1/installers/{id}
pub async fn update_installer_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
    ApiJson(input): ApiJson<InstallerInput>,
) -> Result<ApiSuccess<InstallerData>, ApiError> {
    let id = parse_installer_id(&id)?;
    let installer = actions::edit_installer(id, input, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(installer.into()))
}

/// POST /api/v1/installers/{id}/fallback
pub async fn set_fallback_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<ApiSuccess<InstallerData>, ApiError> {
    let id = parse_installer_id(&id)?;
    let installer = actions::set_fallback_installer(id, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(installer.into()))
}
