use axum::extract::Extension;
use serde::{Deserialize, Serialize};

use crate::domains::installers::{actions, Assignment, InstallerData};
use crate::server::app::AxumAppState;
use crate::server::extract::ApiQuery;
use crate::server::middleware::CurrentActor;
use crate::server::response::{ApiError, ApiSuccess};

#[derive(Debug, Deserialize)]
pub struct AssigneeQuery {
    #[serde(default)]
    pub postal_code: String,
}

#[derive(Debug, Serialize)]
pub struct AssigneeResponse {
    pub installer: InstallerData,
    pub matched_prefix: Option<String>,
    pub is_fallback: bool,
}

impl From<Assignment> for AssigneeResponse {
    fn from(assignment: Assignment) -> Self {
        match assignment {
            Assignment::Matched { installer, prefix } => Self {
                installer: installer.into(),
                matched_prefix: Some(prefix),
                is_fallback: false,
            },
            Assignment::Fallback { installer } => Self {
                installer: installer.into(),
                matched_prefix: None,
                is_fallback: true,
            },
        }
    }
}

/// GET /api/v1/assignee?postal_code=
pub async fn assignee_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    ApiQuery(query): ApiQuery<AssigneeQuery>,
) -> Result<ApiSuccess<AssigneeResponse>, ApiError> {
    let assignment = actions::preview_assignee(&query.postal_code, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(assignment.into()))
}
