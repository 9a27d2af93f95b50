//! In-memory record store.
//!
//! Same semantics as the SQLite store: ids start at 1 and are never
//! reused, lists come back in insertion order. Used by tests.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Result, anyhow};
use chirp_types::{Account, Message, NewAccount, NewMessage};

use crate::store::{AccountStore, MessageStore};

/// Thread-safe via RwLock. Everything is lost on drop.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

#[derive(Default)]
struct MemoryStoreInner {
    accounts: BTreeMap<i64, Account>,
    messages: BTreeMap<i64, Message>,
    last_account_id: i64,
    last_message_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner::default()),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>> {
        self.inner
            .read()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>> {
        self.inner
            .write()
            .map_err(|e| anyhow!("Store lock poisoned: {}", e))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountStore for MemoryStore {
    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        let inner = self.read()?;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username)
            .cloned())
    }

    fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        let inner = self.read()?;
        Ok(inner
            .accounts
            .values()
            .find(|a| a.username == username && a.password == password)
            .cloned())
    }

    fn save_account(&self, account: NewAccount) -> Result<Account> {
        let mut inner = self.write()?;
        if inner.accounts.values().any(|a| a.username == account.username) {
            return Err(anyhow!("UNIQUE constraint failed: account.username"));
        }

        inner.last_account_id += 1;
        let stored = Account {
            account_id: inner.last_account_id,
            username: account.username,
            password: account.password,
        };
        inner.accounts.insert(stored.account_id, stored.clone());
        Ok(stored)
    }
}

impl MessageStore for MemoryStore {
    fn find_message(&self, message_id: i64) -> Result<Option<Message>> {
        Ok(self.read()?.messages.get(&message_id).cloned())
    }

    fn account_exists(&self, account_id: i64) -> Result<bool> {
        Ok(self.read()?.accounts.contains_key(&account_id))
    }

    fn insert_message(&self, message: NewMessage) -> Result<Message> {
        let mut inner = self.write()?;
        inner.last_message_id += 1;
        let stored = Message {
            message_id: inner.last_message_id,
            posted_by: message.posted_by,
            message_text: message.message_text,
        };
        inner.messages.insert(stored.message_id, stored.clone());
        Ok(stored)
    }

    fn update_message(&self, message: &Message) -> Result<()> {
        let mut inner = self.write()?;
        let stored = inner
            .messages
            .get_mut(&message.message_id)
            .ok_or_else(|| anyhow!("Message not found: {}", message.message_id))?;
        stored.message_text = message.message_text.clone();
        Ok(())
    }

    fn delete_message(&self, message: &Message) -> Result<()> {
        self.write()?.messages.remove(&message.message_id);
        Ok(())
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        Ok(self.read()?.messages.values().cloned().collect())
    }

    fn messages_by_author(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .read()?
            .messages
            .values()
            .filter(|m| m.posted_by == account_id)
            .cloned()
            .collect())
    }

    fn count_messages(&self) -> Result<u64> {
        Ok(self.read()?.messages.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ghost() -> Message {
        Message {
            message_id: 42,
            posted_by: 1,
            message_text: "ghost".into(),
        }
    }

    #[test]
    fn update_missing_message_fails() {
        let store = MemoryStore::new();
        let err = store.update_message(&ghost()).unwrap_err();
        assert_eq!(err.to_string(), "Message not found: 42");
    }

    #[test]
    fn delete_missing_message_is_noop() {
        let store = MemoryStore::new();
        store.delete_message(&ghost()).unwrap();
        assert_eq!(store.count_messages().unwrap(), 0);
    }
}
