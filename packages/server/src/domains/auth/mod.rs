//! Auth domain - bearer tokens for back-office users
//!
//! Tokens are minted by operators with the `issue_token` binary and verified
//! by the HTTP middleware. There is no login flow in this service.

pub mod jwt;

pub use jwt::{Claims, JwtService};
