//! Login flow example
//!
//! Walks through what a backend does with this crate:
//! 1. Establish a family's access code (salt + hash, never the code itself)
//! 2. Log in: narrow records by code suffix, check the code, issue a token
//! 3. Authenticate a later request from its `Authorization` header
//! 4. Reject a tampered token with a generic message
//!
//! Run with `RUST_LOG=famtoken=debug` to see the library's events.

use famtoken::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,famtoken=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== famtoken - Login Flow ===\n");

    let config = AuthConfig::from_lookup(|key| match key {
        "JWT_SECRET" => Some("demo-secret-change-me".to_string()),
        "TOKEN_LIFETIME_SECONDS" => Some("3600".to_string()),
        _ => std::env::var(key).ok(),
    })?;
    let service = config.token_service();

    // Step 1: Establish access codes
    println!("Step 1: Establishing access codes...");
    let code = generate_access_code(6)?;
    let records = vec![
        CredentialRecord::establish(1, &code)?,
        CredentialRecord::establish(2, &generate_access_code(6)?)?,
    ];
    println!("  ✓ Family 1 code: {code} (lookup suffix {})", lookup_suffix(&code));
    println!("  ✓ Stored salt: {}", records[0].salt);
    println!("  ✓ Stored hash: {}\n", records[0].hash);

    // Step 2: Log in
    println!("Step 2: Logging in...");
    let Some(record) = find_matching_record(&code, &records) else {
        println!("  ✗ Invalid code");
        return Ok(());
    };
    let principal = FamilyPrincipal::new(format!("fam_{}", record.id), Role::Admin);
    let token = service.issue(principal.identity_claims(), &config.issue_options())?;
    println!("  ✓ Matched record {}", record.id);
    println!("  ✓ Token: {token}\n");

    // Step 3: Authenticate a request
    println!("Step 3: Authenticating a request...");
    let header = format!("Bearer {token}");
    let authenticated = authenticate(Some(&header), &service, &config.verify_options())?;
    println!("  ✓ Family: {}", authenticated.family_id);
    println!("  ✓ Role: {}\n", authenticated.role);

    // Step 4: Reject a tampered token
    println!("Step 4: Presenting a tampered token...");
    let tampered = format!("Bearer {}x", token);
    match authenticate(Some(&tampered), &service, &config.verify_options()) {
        Ok(_) => println!("  ✗ Tampered token accepted"),
        Err(e) => {
            println!("  ✓ Rejected ({})", e.reason());
            println!("  ✓ Client sees: {}", e.public_message());
        }
    }

    Ok(())
}
