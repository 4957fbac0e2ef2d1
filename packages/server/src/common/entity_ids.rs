//! Typed ID definitions for all domain entities.

pub use super::id::Id;

/// Marker type for Installer entities (service companies).
pub struct Installer;

/// Marker type for Customer entities (intake leads).
pub struct Customer;

/// Marker type for Member entities (authenticated back-office users).
pub struct Member;

/// Typed ID for Installer entities.
pub type InstallerId = Id<Installer>;

/// Typed ID for Customer entities.
pub type CustomerId = Id<Customer>;

/// Typed ID for Member entities.
pub type MemberId = Id<Member>;
