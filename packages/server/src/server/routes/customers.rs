use axum::extract::{Extension, Path};
use serde::Serialize;

use crate::common::{CustomerId, PageArgs};
use crate::domains::customers::{actions, CustomerData, CustomerInput, CustomerPageData};
use crate::domains::installers::InstallerData;
use crate::domains::intake;
use crate::server::app::AxumAppState;
use crate::server::extract::{ApiJson, ApiQuery};
use crate::server::middleware::CurrentActor;
use crate::server::response::{ApiError, ApiSuccess};

#[derive(Debug, Serialize)]
pub struct IntakeResponse {
    pub customer_id: String,
    pub assignee: InstallerData,
}

fn parse_customer_id(raw: &str) -> Result<CustomerId, ApiError> {
    CustomerId::parse(raw).map_err(|_| ApiError::BadRequest(format!("Invalid customer id: {}", raw)))
}

/// POST /api/v1/customers
///
/// Responds once the customer is stored and assigned; the notification email
/// is sent in the background.
pub async fn create_customer_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    ApiJson(input): ApiJson<CustomerInput>,
) -> Result<ApiSuccess<IntakeResponse>, ApiError> {
    let receipt = intake::intake(input, &actor, &state.deps).await?;

    Ok(ApiSuccess::created(IntakeResponse {
        customer_id: receipt.customer.id.to_string(),
        assignee: receipt.assignee.into(),
    }))
}

/// GET /api/v1/customers?limit=&offset=
pub async fn list_customers_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    ApiQuery(page): ApiQuery<PageArgs>,
) -> Result<ApiSuccess<CustomerPageData>, ApiError> {
    let page = actions::list_customers(page, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(page.into()))
}

/// GET /api/v1/customers/{id}
pub async fn get_customer_handler(
    Extension(state): Extension<AxumAppState>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<String>,
) -> Result<ApiSuccess<CustomerData>, ApiError> {
    let id = parse_customer_id(&id)?;
    let customer = actions::get_customer(id, &actor, &state.deps).await?;
    Ok(ApiSuccess::ok(customer.into()))
}
