use tracing::{error, info, warn};

use super::notify::{NotificationOutcome, NotifyAssigneeJob};
use super::IntakeError;
use crate::common::{Actor, Capability};
use crate::domains::customers::{Customer, CustomerInput};
use crate::domains::installers::resolver::{self, ResolveError};
use crate::domains::installers::Installer;
use crate::kernel::jobs::JobHandle;
use crate::kernel::ServerDeps;

/// Result of a successful intake
#[derive(Debug)]
pub struct IntakeReceipt {
    pub customer: Customer,
    pub assignee: Installer,

    /// Completes once the notification job has run
    pub notification: JobHandle<NotificationOutcome>,
}

/// Validate, persist and assign a new customer, then queue the notification.
///
/// Steps are not transactional. When no installer can be assigned the
/// customer stays stored with an unset delivery status and
/// `IntakeError::NoAssignee` is returned.
pub async fn intake(
    input: CustomerInput,
    actor: &Actor,
    deps: &ServerDeps,
) -> Result<IntakeReceipt, IntakeError> {
    actor.can(Capability::SubmitCustomers).check()?;

    let fields = input.validate()?;
    let customer = Customer::new(fields);
    deps.customers.insert(&customer).await?;

    info!(customer_id = %customer.id, submitted_by = %actor.id(), "Customer stored");

    let assignee = match resolver::resolve(deps.installers.as_ref(), &customer.postal_code).await
    {
        Ok(assignment) => assignment.into_installer(),
        Err(ResolveError::NoFallbackConfigured) => {
            warn!(
                customer_id = %customer.id,
                postal_code = %customer.postal_code,
                "No installer matched and no fallback configured; customer left unassigned"
            );
            return Err(IntakeError::NoAssignee {
                customer_id: customer.id,
            });
        }
        Err(ResolveError::Store(e)) => return Err(e.into()),
    };

    let notification = deps
        .notifications
        .enqueue(NotifyAssigneeJob::new(customer.clone(), &assignee))
        .map_err(|e| {
            error!(customer_id = %customer.id, error = %e, "Failed to queue assignee notification");
            e
        })?;

    info!(
        customer_id = %customer.id,
        installer_id = %assignee.id,
        job_id = %notification.job_id(),
        "Assignee notification queued"
    );

    Ok(IntakeReceipt {
        customer,
        assignee,
        notification,
    })
}
