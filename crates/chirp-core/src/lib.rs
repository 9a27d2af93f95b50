//! Validation and consistency rules for accounts and messages.
//!
//! Both services are stateless: they hold a borrowed record store and
//! nothing else. Persistence lives behind [`AccountStore`] and
//! [`MessageStore`], implemented by `chirp-db` for SQLite and by
//! [`MemoryStore`] for tests.

pub mod accounts;
pub mod error;
pub mod memory;
pub mod messages;
pub mod store;

pub use accounts::AccountDirectory;
pub use error::{CoreError, Result};
pub use memory::MemoryStore;
pub use messages::{DeleteOutcome, MessageBoard};
pub use store::{AccountStore, MessageStore};
