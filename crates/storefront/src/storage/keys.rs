//! Storage key namespace.
//!
//! A handful of global keys for the active session plus per-user keys
//! suffixed with the numeric user id. Key spellings are part of the
//! stored-data format: renaming one orphans existing blobs.

use penny_black_core::UserId;

/// The active cart snapshot (one cart per storefront session).
pub const CART: &str = "cart";

/// The active session token.
pub const TOKEN: &str = "token";

/// The signed-in user's profile.
pub const CURRENT_USER: &str = "user";

/// The account registry (all registered users with credentials).
pub const USERS: &str = "users";

/// Wallet balance for a user.
#[must_use]
pub fn wallet(user: UserId) -> String {
    format!("wallet_{user}")
}

/// Wallet transaction ledger for a user.
#[must_use]
pub fn transactions(user: UserId) -> String {
    format!("transactions_{user}")
}

/// Order history for a user.
#[must_use]
pub fn orders(user: UserId) -> String {
    format!("orders_{user}")
}

/// Personal stamp collection for a user.
#[must_use]
pub fn collections(user: UserId) -> String {
    format!("collections_{user}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_user_keys_embed_the_id() {
        let user = UserId::new(7);
        assert_eq!(wallet(user), "wallet_7");
        assert_eq!(transactions(user), "transactions_7");
        assert_eq!(orders(user), "orders_7");
        assert_eq!(collections(user), "collections_7");
    }
}
