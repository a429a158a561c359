//! Seed demo accounts and summarize the sample catalog.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;

use penny_black_core::Role;
use penny_black_storefront::services::auth::AuthError;
use penny_black_storefront::{AppError, AppState, Result};

/// Demo customer credentials, printed so the demo is usable immediately.
const DEMO_CUSTOMER_NAME: &str = "Asha Venkatesan";
const DEMO_CUSTOMER_EMAIL: &str = "asha@example.in";
const DEMO_CUSTOMER_PASSWORD: &str = "penny-red-1841";

const ADMIN_NAME: &str = "Store Admin";
const ADMIN_EMAIL: &str = "admin@pennyblack.in";

/// Create the demo customer and admin accounts (skipping ones that
/// already exist) and print the catalog summary.
pub fn run(state: &AppState) -> Result<()> {
    seed_account(
        state,
        DEMO_CUSTOMER_NAME,
        DEMO_CUSTOMER_EMAIL,
        DEMO_CUSTOMER_PASSWORD,
        Role::Customer,
    )?;

    // The admin password comes from PB_SEED_ADMIN_PASSWORD when set
    // (validated at config load), otherwise a random one is generated
    // and shown exactly once.
    let admin_password = state
        .config()
        .seed_admin_password()
        .map_or_else(generate_password, ToOwned::to_owned);
    seed_account(state, ADMIN_NAME, ADMIN_EMAIL, &admin_password, Role::Admin)?;

    println!();
    println!("Sample catalog ({} items):", state.catalog().list().len());
    for item in state.catalog().list() {
        println!(
            "  {:>3}  {:<50} {:>10}  stock {:>3}",
            item.id, item.title, item.price.to_string(), item.stock
        );
    }
    Ok(())
}

fn seed_account(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<()> {
    match state.auth().create_user(name, email, password, role) {
        Ok(user) => {
            println!("Created {role} account {email} (user {})", user.id);
            if role == Role::Admin && state.config().seed_admin_password().is_none() {
                println!("  generated password: {password}");
            } else if role == Role::Customer {
                println!("  password: {password}");
            }
            Ok(())
        }
        Err(AppError::Auth(AuthError::UserAlreadyExists)) => {
            println!("Account {email} already present, skipping");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

/// 16 random bytes, base64url: comfortably past the registry's strength
/// requirements.
fn generate_password() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
