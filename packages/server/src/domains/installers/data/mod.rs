pub mod installer;

pub use installer::{InstallerData, InstallerDirectoryData, InstallerInput};
