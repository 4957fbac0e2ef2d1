//! Background notification of the assigned installer.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::message::{notification_body, NOTIFICATION_SUBJECT};
use crate::common::{CustomerId, InstallerId};
use crate::domains::customers::{Customer, CustomerStore, EmailDeliveryStatus};
use crate::domains::installers::Installer;
use crate::kernel::jobs::{JobError, JobHandler};
use crate::kernel::BaseEmailSender;

/// Everything the worker needs, captured at intake time
#[derive(Debug, Clone)]
pub struct NotifyAssigneeJob {
    pub customer: Customer,
    pub installer_id: InstallerId,
    pub installer_name: String,
    pub installer_email: String,
}

impl NotifyAssigneeJob {
    pub fn new(customer: Customer, installer: &Installer) -> Self {
        Self {
            customer,
            installer_id: installer.id,
            installer_name: installer.company_name.clone(),
            installer_email: installer.email.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationOutcome {
    pub customer_id: CustomerId,
    pub installer_id: InstallerId,
    pub delivery_status: EmailDeliveryStatus,
}

/// Records the assignee, emails it and records the delivery status
pub struct NotifyAssignee {
    customers: Arc<dyn CustomerStore>,
    email: Arc<dyn BaseEmailSender>,
}

impl NotifyAssignee {
    pub fn new(customers: Arc<dyn CustomerStore>, email: Arc<dyn BaseEmailSender>) -> Self {
        Self { customers, email }
    }
}

fn store_failure(step: &str, e: impl std::fmt::Display) -> JobError {
    JobError::Failed(format!("{}: {}", step, e))
}

#[async_trait]
impl JobHandler for NotifyAssignee {
    type Job = NotifyAssigneeJob;
    type Output = NotificationOutcome;

    fn job_type(&self) -> &'static str {
        "intake:notify_assignee"
    }

    async fn handle(&self, job: NotifyAssigneeJob) -> Result<NotificationOutcome, JobError> {
        let customer_id = job.customer.id;

        self.customers
            .set_assigned_installer(customer_id, job.installer_id, &job.installer_name)
            .await
            .map_err(|e| store_failure("set assigned installer", e))?;

        let body = notification_body(&job.customer);
        let delivery_status = match self
            .email
            .send(&job.installer_email, NOTIFICATION_SUBJECT, &body)
            .await
        {
            Ok(()) => {
                info!(
                    customer_id = %customer_id,
                    installer_id = %job.installer_id,
                    "Assignee notified"
                );
                EmailDeliveryStatus::Sent
            }
            Err(e) => {
                warn!(
                    customer_id = %customer_id,
                    installer_id = %job.installer_id,
                    error = %e,
                    "Assignee notification failed"
                );
                EmailDeliveryStatus::Failed
            }
        };

        self.customers
            .set_email_delivery_status(customer_id, delivery_status)
            .await
            .map_err(|e| store_failure("set email delivery status", e))?;

        Ok(NotificationOutcome {
            customer_id,
            installer_id: job.installer_id,
            delivery_status,
        })
    }
}
