//! Record-store contracts the services depend on.
//!
//! Methods are synchronous. Callers on an async runtime are expected to
//! run them on the blocking pool.

use anyhow::Result;
use chirp_types::{Account, Message, NewAccount, NewMessage};

pub trait AccountStore: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<Account>>;

    /// Exact match on both fields.
    fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>>;

    /// Insert and return the stored row with its assigned id.
    fn save_account(&self, account: NewAccount) -> Result<Account>;
}

pub trait MessageStore: Send + Sync {
    fn find_message(&self, message_id: i64) -> Result<Option<Message>>;

    /// Whether an account with this id exists. Used to validate `postedBy`.
    fn account_exists(&self, account_id: i64) -> Result<bool>;

    fn insert_message(&self, message: NewMessage) -> Result<Message>;

    /// Persist the text of an already stored message. Fails when no row
    /// has that id.
    fn update_message(&self, message: &Message) -> Result<()>;

    /// Remove the row if present. A missing row is not an error.
    fn delete_message(&self, message: &Message) -> Result<()>;

    /// Every message, in insertion order.
    fn all_messages(&self) -> Result<Vec<Message>>;

    fn messages_by_author(&self, account_id: i64) -> Result<Vec<Message>>;

    fn count_messages(&self) -> Result<u64>;
}
