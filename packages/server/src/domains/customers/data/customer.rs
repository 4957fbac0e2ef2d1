use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::scalar::string_or_number;
use crate::common::{FieldErrors, ValidationError};
use crate::domains::customers::actions::CustomerPage;
use crate::domains::customers::models::{Customer, CustomerFields, EmailDeliveryStatus};

/// Customer data type returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerData {
    pub id: String,
    pub name: String,
    pub postal_code: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub assigned_installer_id: Option<String>,
    pub assigned_installer_name: Option<String>,
    pub email_delivery_status: EmailDeliveryStatus,
}

impl From<Customer> for CustomerData {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            name: customer.name,
            postal_code: customer.postal_code,
            phone_number: customer.phone_number,
            email: customer.email,
            created_at: customer.created_at,
            assigned_installer_id: customer.assigned_installer_id.map(|id| id.to_string()),
            assigned_installer_name: customer.assigned_installer_name,
            email_delivery_status: customer.email_delivery_status,
        }
    }
}

/// One page of the customer table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerPageData {
    pub customers: Vec<CustomerData>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl From<CustomerPage> for CustomerPageData {
    fn from(page: CustomerPage) -> Self {
        Self {
            customers: page.customers.into_iter().map(CustomerData::from).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Intake submission. Missing fields count as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerInput {
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub email: Option<String>,
}

impl CustomerInput {
    /// Check every field, collecting all failures in form order
    pub fn validate(self) -> Result<CustomerFields, ValidationError> {
        let trim = |v: Option<String>| v.map(|s| s.trim().to_string()).unwrap_or_default();

        let name = trim(self.name);
        let postal_code = trim(self.postal_code);
        let phone_number = trim(self.phone_number);
        let email = trim(self.email);

        let mut errors = FieldErrors::new();
        errors.require("name", "Name", &name);
        errors.require("postal_code", "Postal Code", &postal_code);
        errors.require("phone_number", "Phone Number", &phone_number);
        errors.require_email("email", &email);
        errors.into_result()?;

        Ok(CustomerFields {
            name,
            postal_code,
            phone_number,
            email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_input_is_trimmed() {
        let fields = CustomerInput {
            name: Some("  Grace Hopper ".to_string()),
            postal_code: Some("ab12 3cd".to_string()),
            phone_number: Some("07000 000000".to_string()),
            email: Some("grace@example.com ".to_string()),
        }
        .validate()
        .unwrap();

        assert_eq!(fields.name, "Grace Hopper");
        assert_eq!(fields.postal_code, "ab12 3cd");
        assert_eq!(fields.email, "grace@example.com");
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let err = CustomerInput::default().validate().unwrap_err();
        assert_eq!(
            err.errors.fields(),
            vec!["name", "postal_code", "phone_number", "email"]
        );
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn test_whitespace_name_is_missing() {
        let err = CustomerInput {
            name: Some("   ".to_string()),
            postal_code: Some("AB1".to_string()),
            phone_number: Some("1".to_string()),
            email: Some("a@example.com".to_string()),
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.errors.fields(), vec!["name"]);
    }

    #[test]
    fn test_numeric_fields_are_read_as_text() {
        let input: CustomerInput = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "postal_code": 1234,
            "phone_number": 5434554,
            "email": "ada@example.com",
        }))
        .unwrap();

        let fields = input.validate().unwrap();
        assert_eq!(fields.postal_code, "1234");
        assert_eq!(fields.phone_number, "5434554");
    }
}
