// Business domains
pub mod auth;
pub mod customers;
pub mod installers;
pub mod intake;
