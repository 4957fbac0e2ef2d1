//! Mint a bearer token for a back-office user.
//!
//! Reads `JWT_SECRET` and `JWT_ISSUER` from the environment (or `.env`) so the
//! token verifies against the running server.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use server_core::domains::auth::JwtService;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "issue_token")]
#[command(about = "Issue a JWT for the installer dispatch API")]
struct Cli {
    /// Email recorded in the token (used in logs)
    #[arg(long)]
    email: String,

    /// Member id; a new one is generated when omitted
    #[arg(long)]
    member_id: Option<Uuid>,

    /// Grant the admin role
    #[arg(long)]
    admin: bool,

    /// Token lifetime in hours
    #[arg(long, default_value_t = 24)]
    ttl_hours: i64,

    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    secret: String,

    #[arg(long, env = "JWT_ISSUER", default_value = "installer-dispatch")]
    issuer: String,
}

#[derive(Serialize)]
struct IssuedToken {
    member_id: Uuid,
    email: String,
    is_admin: bool,
    token: String,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let member_id = cli.member_id.unwrap_or_else(Uuid::now_v7);
    let jwt_service = JwtService::new(&cli.secret, cli.issuer);
    let token = jwt_service
        .create_token_with_ttl(
            member_id,
            cli.email.clone(),
            cli.admin,
            chrono::Duration::hours(cli.ttl_hours),
        )
        .context("Failed to sign token")?;

    let issued = IssuedToken {
        member_id,
        email: cli.email,
        is_admin: cli.admin,
        token,
    };
    println!("{}", serde_json::to_string_pretty(&issued)?);

    Ok(())
}
