//! Postal-code assignment.
//!
//! A customer's postal code is normalized (trimmed, upper-cased), then each
//! prefix from 6 characters down to 1 is looked up as an exact postal area.
//! The longest prefix with a match wins. When several installers claim the
//! winning prefix the smallest id is chosen. Without any match the fallback
//! installer is used; the same smallest-id rule applies if more than one
//! record carries the fallback flag.

use thiserror::Error;
use tracing::{debug, warn};

use super::models::Installer;
use super::store::InstallerStore;
use crate::kernel::StoreError;

/// Longest prefix tried
pub const MAX_PREFIX_LEN: usize = 6;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no fallback installer configured")]
    NoFallbackConfigured,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a resolution
#[derive(Debug, Clone, PartialEq)]
pub enum Assignment {
    /// An installer claims `prefix`
    Matched { installer: Installer, prefix: String },

    /// No prefix matched
    Fallback { installer: Installer },
}

impl Assignment {
    pub fn installer(&self) -> &Installer {
        match self {
            Assignment::Matched { installer, .. } | Assignment::Fallback { installer } => installer,
        }
    }

    pub fn into_installer(self) -> Installer {
        match self {
            Assignment::Matched { installer, .. } | Assignment::Fallback { installer } => installer,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Assignment::Fallback { .. })
    }
}

pub fn normalize_postal_code(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Prefixes of `normalized` to try, longest first, cut on char boundaries
pub fn prefixes(normalized: &str) -> Vec<&str> {
    let mut ends: Vec<usize> = normalized
        .char_indices()
        .map(|(i, _)| i)
        .skip(1)
        .chain(std::iter::once(normalized.len()))
        .filter(|end| *end > 0)
        .take(MAX_PREFIX_LEN)
        .collect();
    ends.reverse();
    ends.into_iter().map(|end| &normalized[..end]).collect()
}

fn smallest_id<'a>(installers: impl Iterator<Item = &'a Installer>) -> Option<&'a Installer> {
    installers.min_by_key(|i| i.id)
}

fn pick_fallback(fallbacks: &[&Installer]) -> Result<Installer, ResolveError> {
    if fallbacks.len() > 1 {
        warn!(
            count = fallbacks.len(),
            "Multiple fallback installers flagged, using smallest id"
        );
    }

    smallest_id(fallbacks.iter().copied())
        .cloned()
        .ok_or(ResolveError::NoFallbackConfigured)
}

/// Resolve against an in-memory candidate set
pub fn resolve_among(
    candidates: &[Installer],
    postal_code: &str,
) -> Result<Assignment, ResolveError> {
    let normalized = normalize_postal_code(postal_code);

    for prefix in prefixes(&normalized) {
        if let Some(installer) = smallest_id(candidates.iter().filter(|i| i.serves(prefix))) {
            debug!(
                installer_id = %installer.id,
                prefix_len = prefix.chars().count(),
                "Postal area matched"
            );
            return Ok(Assignment::Matched {
                installer: installer.clone(),
                prefix: prefix.to_string(),
            });
        }
    }

    let fallbacks: Vec<&Installer> = candidates.iter().filter(|i| i.is_fallback).collect();
    let installer = pick_fallback(&fallbacks)?;
    debug!(installer_id = %installer.id, "No postal area matched, using fallback");
    Ok(Assignment::Fallback { installer })
}

/// Resolve against the installer store, one exact-membership query per prefix
pub async fn resolve(
    store: &dyn InstallerStore,
    postal_code: &str,
) -> Result<Assignment, ResolveError> {
    let normalized = normalize_postal_code(postal_code);

    for prefix in prefixes(&normalized) {
        let matches = store.find_by_postal_area(prefix).await?;
        if let Some(installer) = smallest_id(matches.iter()) {
            debug!(
                installer_id = %installer.id,
                prefix_len = prefix.chars().count(),
                "Postal area matched"
            );
            return Ok(Assignment::Matched {
                installer: installer.clone(),
                prefix: prefix.to_string(),
            });
        }
    }

    let fallbacks = store.find_fallbacks().await?;
    let installer = pick_fallback(&fallbacks.iter().collect::<Vec<_>>())?;
    debug!(installer_id = %installer.id, "No postal area matched, using fallback");
    Ok(Assignment::Fallback { installer })
}
