// HTTP server setup (Axum + REST)
pub mod app;
pub mod extract;
pub mod middleware;
pub mod response;
pub mod routes;

pub use app::*;
