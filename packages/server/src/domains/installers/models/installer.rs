use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use typed_builder::TypedBuilder;

use crate::common::{InstallerId, MemberId};

/// Installer model - a service company claiming a set of postal areas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Installer {
    pub id: InstallerId,
    pub company_name: String,
    pub logo_url: String,
    pub address_one: String,
    pub address_two: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub email: String,

    /// Normalized postal-code prefixes (trimmed, upper-cased, unique)
    pub postal_areas: Vec<String>,
    pub is_fallback: bool,

    pub created_at: DateTime<Utc>,
    pub created_by: MemberId,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<MemberId>,
}

/// Editable installer fields, shared by insert and update
#[derive(Debug, Clone, PartialEq, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct InstallerFields {
    pub company_name: String,
    pub logo_url: String,
    pub address_one: String,
    #[builder(default, setter(strip_option))]
    pub address_two: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub phone_number: String,
    pub email: String,
    pub postal_areas: Vec<String>,
    #[builder(default)]
    pub is_fallback: bool,
}

impl Installer {
    /// Build a new record from validated fields
    pub fn new(fields: InstallerFields, created_by: MemberId) -> Self {
        Self {
            id: InstallerId::new(),
            company_name: fields.company_name,
            logo_url: fields.logo_url,
            address_one: fields.address_one,
            address_two: fields.address_two,
            postal_code: fields.postal_code,
            city: fields.city,
            phone_number: fields.phone_number,
            email: fields.email,
            postal_areas: normalize_postal_areas(&fields.postal_areas),
            is_fallback: fields.is_fallback,
            created_at: Utc::now(),
            created_by,
            updated_at: None,
            updated_by: None,
        }
    }

    /// Replace every editable field and stamp the update
    pub fn apply(&mut self, fields: InstallerFields, updated_by: MemberId) {
        self.company_name = fields.company_name;
        self.logo_url = fields.logo_url;
        self.address_one = fields.address_one;
        self.address_two = fields.address_two;
        self.postal_code = fields.postal_code;
        self.city = fields.city;
        self.phone_number = fields.phone_number;
        self.email = fields.email;
        self.postal_areas = normalize_postal_areas(&fields.postal_areas);
        self.is_fallback = fields.is_fallback;
        self.updated_at = Some(Utc::now());
        self.updated_by = Some(updated_by);
    }

    /// Exact membership test against the normalized areas
    pub fn serves(&self, prefix: &str) -> bool {
        self.postal_areas.iter().any(|area| area == prefix)
    }
}

/// Trim, upper-case and de-duplicate postal areas, keeping first-seen order.
/// Blank entries are dropped.
pub fn normalize_postal_areas(areas: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(areas.len());
    for area in areas {
        let area = area.trim().to_uppercase();
        if !area.is_empty() && !normalized.contains(&area) {
            normalized.push(area);
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> InstallerFields {
        InstallerFields::builder()
            .company_name("Northern Alarms")
            .logo_url("https://cdn.example.com/logo.png")
            .address_one("1 High Street")
            .postal_code("LS1 4AP")
            .city("Leeds")
            .phone_number("0113 000 0000")
            .email("jobs@northern.example.com")
            .postal_areas(vec![" ls1 ".to_string(), "LS1".to_string(), "ls2".to_string()])
            .build()
    }

    #[test]
    fn test_normalize_postal_areas() {
        let areas = vec![
            " ab12 ".to_string(),
            "AB12".to_string(),
            "".to_string(),
            "cd".to_string(),
        ];
        assert_eq!(normalize_postal_areas(&areas), vec!["AB12", "CD"]);
    }

    #[test]
    fn test_new_normalizes_and_stamps() {
        let member = MemberId::new();
        let installer = Installer::new(fields(), member);

        assert_eq!(installer.postal_areas, vec!["LS1", "LS2"]);
        assert_eq!(installer.created_by, member);
        assert!(installer.updated_at.is_none());
        assert!(!installer.is_fallback);
        assert!(installer.serves("LS2"));
        assert!(!installer.serves("LS"));
    }

    #[test]
    fn test_apply_replaces_fields() {
        let mut installer = Installer::new(fields(), MemberId::new());
        let editor = MemberId::new();

        let mut changed = fields();
        changed.company_name = "Northern Security".to_string();
        changed.address_two = None;
        changed.postal_areas = vec!["m1".to_string()];
        installer.apply(changed, editor);

        assert_eq!(installer.company_name, "Northern Security");
        assert_eq!(installer.postal_areas, vec!["M1"]);
        assert_eq!(installer.updated_by, Some(editor));
        assert!(installer.updated_at.is_some());
    }
}
