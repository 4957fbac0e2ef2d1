use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::common::{CustomerId, InstallerId};

/// Whether the assignee notification went out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "email_delivery_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EmailDeliveryStatus {
    #[default]
    Unset,
    Sent,
    Failed,
}

impl fmt::Display for EmailDeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmailDeliveryStatus::Unset => write!(f, "unset"),
            EmailDeliveryStatus::Sent => write!(f, "sent"),
            EmailDeliveryStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for EmailDeliveryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unset" => Ok(EmailDeliveryStatus::Unset),
            "sent" => Ok(EmailDeliveryStatus::Sent),
            "failed" => Ok(EmailDeliveryStatus::Failed),
            _ => Err(anyhow::anyhow!("Invalid email delivery status: {}", s)),
        }
    }
}

/// Customer model - one intake submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub postal_code: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,

    // Written once by the notification job
    pub assigned_installer_id: Option<InstallerId>,
    pub assigned_installer_name: Option<String>,
    pub email_delivery_status: EmailDeliveryStatus,
}

/// Validated intake fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    pub name: String,
    pub postal_code: String,
    pub phone_number: String,
    pub email: String,
}

impl Customer {
    pub fn new(fields: CustomerFields) -> Self {
        Self {
            id: CustomerId::new(),
            name: fields.name,
            postal_code: fields.postal_code,
            phone_number: fields.phone_number,
            email: fields.email,
            created_at: Utc::now(),
            assigned_installer_id: None,
            assigned_installer_name: None,
            email_delivery_status: EmailDeliveryStatus::Unset,
        }
    }
}
