//! Test fixtures for creating test data.

use serde_json::{json, Value};
use server_core::common::MemberId;
use server_core::domains::customers::{Customer, CustomerFields, CustomerInput};
use server_core::domains::installers::{Installer, InstallerFields, InstallerInput};

/// A complete installer form serving `areas`
pub fn installer_input(company_name: &str, areas: &[&str]) -> InstallerInput {
    InstallerInput {
        company_name: Some(company_name.to_string()),
        logo_url: Some(format!(
            "https://cdn.example.com/{}.png",
            company_name.to_lowercase().replace(' ', "-")
        )),
        address_one: Some("12 Station Road".to_string()),
        address_two: None,
        postal_code: Some("AB1 2CD".to_string()),
        city: Some("Aberdeen".to_string()),
        phone_number: Some("01224 123456".to_string()),
        email: Some(format!(
            "jobs@{}.example.com",
            company_name.to_lowercase().replace(' ', "")
        )),
        postal_areas: Some(areas.iter().map(|a| a.to_string()).collect()),
        is_fallback: None,
    }
}

pub fn fallback_installer_input(company_name: &str) -> InstallerInput {
    InstallerInput {
        is_fallback: Some(true),
        ..installer_input(company_name, &["ZZ0"])
    }
}

/// Installer record ready for a store insert
pub fn installer_record(company_name: &str, areas: &[&str], is_fallback: bool) -> Installer {
    let fields = InstallerFields::builder()
        .company_name(company_name)
        .logo_url("https://cdn.example.com/logo.png")
        .address_one("12 Station Road")
        .postal_code("AB1 2CD")
        .city("Aberdeen")
        .phone_number("01224 123456")
        .email("jobs@example.com")
        .postal_areas(areas.iter().map(|a| a.to_string()).collect::<Vec<_>>())
        .is_fallback(is_fallback)
        .build();
    Installer::new(fields, MemberId::new())
}

pub fn customer_input(name: &str, postal_code: &str) -> CustomerInput {
    CustomerInput {
        name: Some(name.to_string()),
        postal_code: Some(postal_code.to_string()),
        phone_number: Some("07700 900123".to_string()),
        email: Some("lead@example.com".to_string()),
    }
}

pub fn customer_json(name: &str, postal_code: &str, email: &str) -> Value {
    json!({
        "name": name,
        "postal_code": postal_code,
        "phone_number": "07700 900123",
        "email": email,
    })
}

pub fn customer_record(name: &str, postal_code: &str) -> Customer {
    Customer::new(CustomerFields {
        name: name.to_string(),
        postal_code: postal_code.to_string(),
        phone_number: "07700 900123".to_string(),
        email: "lead@example.com".to_string(),
    })
}
