pub mod installer;

pub use installer::{normalize_postal_areas, Installer, InstallerFields};
