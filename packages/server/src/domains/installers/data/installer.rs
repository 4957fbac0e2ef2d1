use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::scalar::{string_or_number, strings_or_numbers};
use crate::common::validation::is_blank;
use crate::common::{FieldErrors, ValidationError};
use crate::domains::installers::actions::InstallerDirectory;
use crate::domains::installers::models::{Installer, InstallerFields};

/// Installer data type returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerData {
    pub id: String,

    // Company
    pub company_name: String,
    pub logo_url: String,

    // Address
    pub address_one: String,
    pub address_two: Option<String>,
    pub postal_code: String,
    pub city: String,

    // Contact
    pub phone_number: String,
    pub email: String,

    // Coverage
    pub postal_areas: Vec<String>,
    pub is_fallback: bool,

    // Audit
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<String>,
}

impl From<Installer> for InstallerData {
    fn from(installer: Installer) -> Self {
        Self {
            id: installer.id.to_string(),
            company_name: installer.company_name,
            logo_url: installer.logo_url,
            address_one: installer.address_one,
            address_two: installer.address_two,
            postal_code: installer.postal_code,
            city: installer.city,
            phone_number: installer.phone_number,
            email: installer.email,
            postal_areas: installer.postal_areas,
            is_fallback: installer.is_fallback,
            created_at: installer.created_at,
            created_by: installer.created_by.to_string(),
            updated_at: installer.updated_at,
            updated_by: installer.updated_by.map(|id| id.to_string()),
        }
    }
}

/// Installer list with the fallback warning flag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstallerDirectoryData {
    pub installers: Vec<InstallerData>,
    pub fallback_set: bool,
}

impl From<InstallerDirectory> for InstallerDirectoryData {
    fn from(directory: InstallerDirectory) -> Self {
        Self {
            installers: directory
                .installers
                .into_iter()
                .map(InstallerData::from)
                .collect(),
            fallback_set: directory.fallback_set,
        }
    }
}

/// Input for adding or editing an installer. Missing fields count as blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallerInput {
    #[serde(default, deserialize_with = "string_or_number")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub address_one: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub address_two: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub postal_code: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "strings_or_numbers")]
    pub postal_areas: Option<Vec<String>>,
    pub is_fallback: Option<bool>,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl InstallerInput {
    /// Check every field, collecting all failures
    pub fn validate(self) -> Result<InstallerFields, ValidationError> {
        let mut errors = FieldErrors::new();

        let logo_url = trimmed(self.logo_url);
        let company_name = trimmed(self.company_name);
        let address_one = trimmed(self.address_one);
        let postal_code = trimmed(self.postal_code);
        let city = trimmed(self.city);
        let phone_number = trimmed(self.phone_number);
        let email = trimmed(self.email);
        let postal_areas = self.postal_areas.unwrap_or_default();

        errors.require("logo_url", "Logo", &logo_url);
        errors.require("company_name", "Company Name", &company_name);
        errors.require("address_one", "Address", &address_one);
        errors.require("postal_code", "Postal Code", &postal_code);
        errors.require("city", "City", &city);
        errors.require("phone_number", "Phone Number", &phone_number);
        errors.require_email("email", &email);

        if postal_areas.is_empty() {
            errors.push("postal_areas", "Postal Areas is required");
        } else if postal_areas.iter().any(|area| is_blank(area)) {
            errors.push("postal_areas", "At least one of the Postal Codes is invalid");
        }

        errors.into_result()?;

        Ok(InstallerFields {
            company_name,
            logo_url,
            address_one,
            address_two: self
                .address_two
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            postal_code,
            city,
            phone_number,
            email,
            postal_areas,
            is_fallback: self.is_fallback.unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> InstallerInput {
        InstallerInput {
            company_name: Some("Southern Fire".to_string()),
            logo_url: Some("https://cdn.example.com/sf.png".to_string()),
            address_one: Some("2 Market Road".to_string()),
            address_two: Some("  ".to_string()),
            postal_code: Some("BN1 1AA".to_string()),
            city: Some("Brighton".to_string()),
            phone_number: Some("01273 000000".to_string()),
            email: Some("ops@southernfire.example.com".to_string()),
            postal_areas: Some(vec!["BN1".to_string(), "bn2".to_string()]),
            is_fallback: None,
        }
    }

    #[test]
    fn test_complete_input_is_valid() {
        let fields = complete().validate().unwrap();
        assert_eq!(fields.company_name, "Southern Fire");
        assert_eq!(fields.address_two, None);
        assert!(!fields.is_fallback);
    }

    #[test]
    fn test_empty_input_reports_every_field() {
        let err = InstallerInput::default().validate().unwrap_err();
        assert_eq!(
            err.errors.fields(),
            vec![
                "logo_url",
                "company_name",
                "address_one",
                "postal_code",
                "city",
                "phone_number",
                "email",
                "postal_areas"
            ]
        );
        assert_eq!(err.to_string(), "Logo is required");
        assert_eq!(
            err.errors.get("postal_areas").unwrap(),
            ["Postal Areas is required".to_string()]
        );
    }

    #[test]
    fn test_blank_postal_area_is_invalid() {
        let mut input = complete();
        input.postal_areas = Some(vec!["BN1".to_string(), " ".to_string()]);
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.errors.get("postal_areas").unwrap(),
            ["At least one of the Postal Codes is invalid".to_string()]
        );
    }

    #[test]
    fn test_malformed_email() {
        let mut input = complete();
        input.email = Some("ops-at-southernfire".to_string());
        let err = input.validate().unwrap_err();
        assert_eq!(err.errors.fields(), vec!["email"]);
        assert_eq!(err.to_string(), "Email is invalid");
    }
}
