//! Customer-facing command handlers.

use rust_decimal::Decimal;

use penny_black_core::{ItemId, Money, OrderId, PaymentMethod};
use penny_black_storefront::catalog::{CatalogItem, ItemCategory, PostalCircle};
use penny_black_storefront::models::order::{Order, ShippingAddress};
use penny_black_storefront::{AppState, Result};

/// List catalog items with optional facet filters.
pub fn catalog_list(
    state: &AppState,
    circle: Option<PostalCircle>,
    category: Option<ItemCategory>,
    search: Option<&str>,
) {
    let mut items = match (circle, search) {
        (Some(circle), _) => state.catalog().by_circle(circle),
        (None, Some(query)) => state.catalog().search(query),
        (None, None) => state.catalog().list(),
    };
    if let Some(category) = category {
        items.retain(|item| item.category == category);
    }
    if let (Some(_), Some(query)) = (circle, search) {
        let needle = query.to_lowercase();
        items.retain(|item| item.title.to_lowercase().contains(&needle));
    }

    if items.is_empty() {
        println!("No items match.");
        return;
    }
    for item in items {
        println!(
            "{:>3}  {:<50} {:>10}  {:<6} {:<12} stock {:>3}",
            item.id,
            item.title,
            item.price.to_string(),
            item.category.to_string(),
            item.postal_circle.to_string(),
            item.stock
        );
    }
}

/// Show one catalog item in detail.
pub fn catalog_show(state: &AppState, id: i32) -> Result<()> {
    let item = state.catalog().get(ItemId::new(id))?;
    print_item(&item);
    Ok(())
}

fn print_item(item: &CatalogItem) {
    println!("{}  ({})", item.title, item.id);
    println!("  {}", item.description);
    println!(
        "  {} · {} circle · issued {}",
        item.category, item.postal_circle, item.year
    );
    println!("  {}  ·  {} in stock", item.price, item.stock);
}

/// Create a customer account.
pub fn register(state: &AppState, name: &str, email: &str, password: &str) -> Result<()> {
    let user = state.auth().register(name, email, password)?;
    println!("Welcome, {}! Account {} created. Sign in with `pb-cli login`.", user.name, user.id);
    Ok(())
}

/// Sign in.
pub fn login(state: &AppState, email: &str, password: &str) -> Result<()> {
    let (user, _session) = state.auth().login(email, password)?;
    println!("Signed in as {} ({})", user.name, user.email);
    Ok(())
}

/// Sign out.
pub fn logout(state: &AppState) -> Result<()> {
    state.auth().logout()?;
    println!("Signed out.");
    Ok(())
}

/// Show the signed-in account.
pub fn whoami(state: &AppState) -> Result<()> {
    let user = state.auth().current_user()?;
    println!(
        "{} <{}> · {} · user {} · joined {}",
        user.name,
        user.email,
        user.role,
        user.id,
        user.created_at.format("%Y-%m-%d")
    );
    Ok(())
}

/// Rename the signed-in account.
pub fn profile(state: &AppState, name: &str) -> Result<()> {
    let user = state.auth().update_profile(name)?;
    println!("Name updated to {}.", user.name);
    Ok(())
}

/// Add an item to the cart.
pub fn cart_add(state: &AppState, item: i32, quantity: u32) -> Result<()> {
    let cart = state.carts().add(ItemId::new(item), quantity)?;
    println!("Added. Cart now holds {} item(s).", cart.item_count());
    Ok(())
}

/// Change a cart line's quantity.
pub fn cart_update(state: &AppState, item: i32, quantity: i64) -> Result<()> {
    let cart = state.carts().update(ItemId::new(item), quantity)?;
    println!("Updated. Cart now holds {} item(s).", cart.item_count());
    Ok(())
}

/// Remove a cart line.
pub fn cart_remove(state: &AppState, item: i32) -> Result<()> {
    let cart = state.carts().remove(ItemId::new(item))?;
    println!("Removed. Cart now holds {} item(s).", cart.item_count());
    Ok(())
}

/// Empty the cart.
pub fn cart_clear(state: &AppState) -> Result<()> {
    state.carts().clear()?;
    println!("Cart cleared.");
    Ok(())
}

/// Print the cart with computed totals.
pub fn cart_show(state: &AppState) -> Result<()> {
    let cart = state.carts().current()?;
    if cart.is_empty() {
        println!("Your cart is empty.");
        return Ok(());
    }

    for line in &cart.lines {
        let line_total = line.line_total()?;
        println!(
            "{:>3}  {:<50} {:>3} x {:>9} = {:>10}",
            line.item_id,
            line.title,
            line.quantity,
            line.unit_price.to_string(),
            line_total.to_string()
        );
    }

    let totals = state.carts().totals()?;
    println!();
    println!("  Items     {:>5}", totals.item_count);
    println!("  Subtotal  {:>10}", totals.subtotal.to_string());
    println!("  Shipping  {:>10}", totals.shipping.to_string());
    println!("  Total     {:>10}", totals.total.to_string());
    Ok(())
}

/// Print the wallet balance and ledger.
pub fn wallet_show(state: &AppState) -> Result<()> {
    let user = state.auth().current_user()?;
    let account = state.wallet().account(user.id)?;
    println!("Balance: {}", account.balance);

    let ledger = state.wallet().transactions(user.id)?;
    if ledger.is_empty() {
        return Ok(());
    }
    println!();
    for txn in ledger.iter().rev() {
        println!(
            "{}  {:<8} {:>12}  {}",
            txn.timestamp.format("%Y-%m-%d %H:%M"),
            txn.kind.to_string(),
            txn.amount.to_string(),
            txn.description
        );
    }
    Ok(())
}

/// Add money to the deposit account.
pub fn wallet_deposit(state: &AppState, amount: Decimal) -> Result<()> {
    let user = state.auth().current_user()?;
    let (account, txn) = state.wallet().deposit(user.id, Money::inr(amount))?;
    println!("Deposited {}. New balance: {}", txn.amount, account.balance);
    Ok(())
}

/// Place an order for the current cart.
#[allow(clippy::too_many_arguments)] // mirrors the checkout form fields
pub fn checkout(
    state: &AppState,
    full_name: &str,
    line1: &str,
    line2: Option<&str>,
    city: &str,
    region: &str,
    pincode: &str,
    phone: &str,
    pay: PaymentMethod,
) -> Result<()> {
    let user = state.auth().current_user()?;
    let address = ShippingAddress::new(full_name, line1, line2, city, region, pincode, phone)?;

    let order = state.checkout().place_order(user.id, address, pay)?;
    println!("Order {} placed.", order.id);
    println!(
        "  {} item(s) · subtotal {} · shipping {} · total {}",
        order.totals.item_count,
        order.totals.subtotal,
        order.totals.shipping,
        order.totals.total
    );
    if pay == PaymentMethod::Wallet {
        let account = state.wallet().account(user.id)?;
        println!("  Paid from wallet. New balance: {}", account.balance);
    } else {
        println!("  Payment: online (to be collected).");
    }
    Ok(())
}

/// List the signed-in user's orders, newest first.
pub fn orders_list(state: &AppState) -> Result<()> {
    let user = state.auth().current_user()?;
    let orders = state.orders().list(user.id)?;
    if orders.is_empty() {
        println!("No orders yet.");
        return Ok(());
    }
    for order in orders {
        print_order_line(&order);
    }
    Ok(())
}

/// Show one order in detail.
pub fn orders_show(state: &AppState, id: &str) -> Result<()> {
    let user = state.auth().current_user()?;
    let order = state.orders().get(user.id, &OrderId::from(id))?;

    println!("{} · {} · placed {}", order.id, order.status, order.created_at.format("%Y-%m-%d %H:%M"));
    for line in &order.items {
        println!(
            "  {:<50} {:>3} x {:>9}",
            line.title,
            line.quantity,
            line.unit_price.to_string()
        );
    }
    println!(
        "  Total {} ({} + {} shipping) · paid via {}",
        order.totals.total, order.totals.subtotal, order.totals.shipping, order.payment_method
    );
    let address = &order.address;
    println!(
        "  Ship to: {}, {}{}, {}, {} {} · {}",
        address.full_name,
        address.line1,
        address
            .line2
            .as_deref()
            .map(|l| format!(", {l}"))
            .unwrap_or_default(),
        address.city,
        address.state,
        address.pincode,
        address.phone
    );
    Ok(())
}

fn print_order_line(order: &Order) {
    println!(
        "{}  {:<10} {:>10}  {} item(s)  {}",
        order.id,
        order.status.to_string(),
        order.totals.total.to_string(),
        order.totals.item_count,
        order.created_at.format("%Y-%m-%d %H:%M")
    );
}

/// Show the personal collection.
pub fn collection_list(state: &AppState) -> Result<()> {
    let user = state.auth().current_user()?;
    let items = state.collections().list(user.id)?;
    if items.is_empty() {
        println!("Your collection is empty.");
        return Ok(());
    }
    for id in items {
        match state.catalog().get(id) {
            Ok(item) => println!("{:>3}  {}", id, item.title),
            // The catalog is sample data; a collected id may no longer
            // resolve after it changes.
            Err(_) => println!("{id:>3}  (no longer in catalog)"),
        }
    }
    Ok(())
}

/// Add an item to the personal collection.
pub fn collection_add(state: &AppState, item: i32) -> Result<()> {
    let user = state.auth().current_user()?;
    let items = state.collections().add(user.id, ItemId::new(item))?;
    println!("Collection now holds {} item(s).", items.len());
    Ok(())
}

/// Remove an item from the personal collection.
pub fn collection_remove(state: &AppState, item: i32) -> Result<()> {
    let user = state.auth().current_user()?;
    let items = state.collections().remove(user.id, ItemId::new(item))?;
    println!("Collection now holds {} item(s).", items.len());
    Ok(())
}
