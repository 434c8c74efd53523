#!/usr/bin/env cargo
//! Token issuing utility for EdgeGate
//!
//! Signs a gateway token offline with the same secret the server uses, for
//! scripting against a gateway whose `/generate-token` endpoint is disabled.
//!
//! Usage:
//!   cargo run --bin issue-token
//!   cargo run --bin issue-token user2
//!
//! Reads `JWT_SECRET`, `TOKEN_TTL_SECONDS` and `DEFAULT_SUBJECT_ID` from the
//! environment (or `.env`). Only the token is written to stdout.

use std::env;

use edgegate_gateway::{auth::TokenIssuer, Config};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    let subject_id = env::args()
        .nth(1)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| config.default_subject_id.clone());

    let issuer = TokenIssuer::new(&config.jwt_secret, config.token_ttl_seconds);
    let token = issuer.issue(&subject_id)?;

    match config.token_ttl_seconds {
        Some(ttl) => eprintln!("Issued token for '{}' (expires in {}s)", subject_id, ttl),
        None => eprintln!("Issued token for '{}' (no expiry)", subject_id),
    }
    println!("{}", token);

    Ok(())
}
