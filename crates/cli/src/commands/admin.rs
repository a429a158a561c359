//! Admin command handlers.
//!
//! Every handler resolves the signed-in user and gates on the admin
//! role before touching anything.

use penny_black_core::{ItemId, OrderId, OrderStatus, Role, UserId};
use penny_black_storefront::models::user::User;
use penny_black_storefront::services::AuthService;
use penny_black_storefront::{AppState, Result};

fn require_admin(state: &AppState) -> Result<User> {
    let user = state.auth().current_user()?;
    AuthService::require_admin(&user)?;
    Ok(user)
}

/// List orders across accounts, optionally restricted to one user or
/// one status.
pub fn orders(state: &AppState, user: Option<i32>, status: Option<OrderStatus>) -> Result<()> {
    require_admin(state)?;

    let targets: Vec<UserId> = match user {
        Some(id) => vec![UserId::new(id)],
        None => state.auth().users()?.into_iter().map(|u| u.id).collect(),
    };

    let mut any = false;
    for target in targets {
        for order in state.orders().list(target)? {
            if status.is_some_and(|wanted| order.status != wanted) {
                continue;
            }
            any = true;
            println!(
                "user {:>3}  {}  {:<10} {:>10}  {}",
                target,
                order.id,
                order.status.to_string(),
                order.totals.total.to_string(),
                order.created_at.format("%Y-%m-%d %H:%M")
            );
        }
    }
    if !any {
        println!("No matching orders.");
    }
    Ok(())
}

/// Move an order through its lifecycle.
pub fn set_status(state: &AppState, user: i32, order: &str, status: OrderStatus) -> Result<()> {
    require_admin(state)?;
    let updated = state
        .orders()
        .set_status(UserId::new(user), &OrderId::from(order), status)?;
    println!("Order {} is now {}.", updated.id, updated.status);
    Ok(())
}

/// Set the stock level for a catalog item.
pub fn restock(state: &AppState, item: i32, stock: u32) -> Result<()> {
    require_admin(state)?;
    let updated = state.catalog().restock(ItemId::new(item), stock)?;
    println!("{} now has {} in stock.", updated.title, updated.stock);
    Ok(())
}

/// List registered accounts.
pub fn users(state: &AppState) -> Result<()> {
    require_admin(state)?;
    for user in state.auth().users()? {
        println!(
            "{:>3}  {:<25} {:<30} {:<8} joined {}",
            user.id,
            user.name,
            user.email.to_string(),
            user.role.to_string(),
            user.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

/// Create an account with an explicit role.
pub fn create_user(
    state: &AppState,
    name: &str,
    email: &str,
    password: &str,
    role: Role,
) -> Result<()> {
    require_admin(state)?;
    let user = state.auth().create_user(name, email, password, role)?;
    println!("Created {} account {} (user {}).", user.role, user.email, user.id);
    Ok(())
}
