use crate::Database;
use crate::models::{AccountRow, MessageRow};
use anyhow::{Result, bail};
use chirp_core::{AccountStore, MessageStore};
use chirp_types::{Account, Message, NewAccount, NewMessage};
use rusqlite::{Connection, Row};

const ACCOUNT_COLUMNS: &str = "account_id, username, password";
const MESSAGE_COLUMNS: &str = "message_id, posted_by, message_text";

impl Database {
    // -- Accounts --

    pub fn create_account(&self, username: &str, password: &str) -> Result<AccountRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO account (username, password) VALUES (?1, ?2)",
                (username, password),
            )?;
            Ok(AccountRow {
                account_id: conn.last_insert_rowid(),
                username: username.to_string(),
                password: password.to_string(),
            })
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                &format!("SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1"),
                rusqlite::params![username],
            )
        })
    }

    pub fn get_account_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AccountRow>> {
        self.with_conn(|conn| {
            query_account(
                conn,
                &format!(
                    "SELECT {ACCOUNT_COLUMNS} FROM account WHERE username = ?1 AND password = ?2"
                ),
                rusqlite::params![username, password],
            )
        })
    }

    pub fn account_id_exists(&self, account_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM account WHERE account_id = ?1)",
                [account_id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    // -- Messages --

    pub fn insert_message_row(&self, posted_by: i64, message_text: &str) -> Result<MessageRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO message (posted_by, message_text) VALUES (?1, ?2)",
                rusqlite::params![posted_by, message_text],
            )?;
            Ok(MessageRow {
                message_id: conn.last_insert_rowid(),
                posted_by,
                message_text: message_text.to_string(),
            })
        })
    }

    pub fn get_message(&self, message_id: i64) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message WHERE message_id = ?1"
            ))?;
            let row = stmt.query_row([message_id], message_row).optional()?;
            Ok(row)
        })
    }

    /// Returns the number of rows changed.
    pub fn set_message_text(&self, message_id: i64, message_text: &str) -> Result<usize> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE message SET message_text = ?1 WHERE message_id = ?2",
                rusqlite::params![message_text, message_id],
            )?;
            Ok(changed)
        })
    }

    /// Returns the number of rows removed.
    pub fn delete_message_row(&self, message_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let removed = conn.execute("DELETE FROM message WHERE message_id = ?1", [message_id])?;
            Ok(removed)
        })
    }

    pub fn get_messages(&self, posted_by: Option<i64>) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| query_messages(conn, posted_by))
    }

    pub fn message_count(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM message", [], |row| row.get(0))?;
            Ok(count as u64)
        })
    }
}

impl AccountStore for Database {
    fn find_by_username(&self, username: &str) -> Result<Option<Account>> {
        Ok(self.get_account_by_username(username)?.map(Account::from))
    }

    fn find_by_username_and_password(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Account>> {
        Ok(self
            .get_account_by_credentials(username, password)?
            .map(Account::from))
    }

    fn save_account(&self, account: NewAccount) -> Result<Account> {
        Ok(self
            .create_account(&account.username, &account.password)?
            .into())
    }
}

impl MessageStore for Database {
    fn find_message(&self, message_id: i64) -> Result<Option<Message>> {
        Ok(self.get_message(message_id)?.map(Message::from))
    }

    fn account_exists(&self, account_id: i64) -> Result<bool> {
        self.account_id_exists(account_id)
    }

    fn insert_message(&self, message: NewMessage) -> Result<Message> {
        Ok(self
            .insert_message_row(message.posted_by, &message.message_text)?
            .into())
    }

    fn update_message(&self, message: &Message) -> Result<()> {
        if self.set_message_text(message.message_id, &message.message_text)? == 0 {
            bail!("Message not found: {}", message.message_id);
        }
        Ok(())
    }

    fn delete_message(&self, message: &Message) -> Result<()> {
        self.delete_message_row(message.message_id)?;
        Ok(())
    }

    fn all_messages(&self) -> Result<Vec<Message>> {
        Ok(self
            .get_messages(None)?
            .into_iter()
            .map(Message::from)
            .collect())
    }

    fn messages_by_author(&self, account_id: i64) -> Result<Vec<Message>> {
        Ok(self
            .get_messages(Some(account_id))?
            .into_iter()
            .map(Message::from)
            .collect())
    }

    fn count_messages(&self) -> Result<u64> {
        self.message_count()
    }
}

fn account_row(row: &Row<'_>) -> rusqlite::Result<AccountRow> {
    Ok(AccountRow {
        account_id: row.get(0)?,
        username: row.get(1)?,
        password: row.get(2)?,
    })
}

fn message_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_id: row.get(0)?,
        posted_by: row.get(1)?,
        message_text: row.get(2)?,
    })
}

fn query_account(
    conn: &Connection,
    sql: &str,
    params: &[&dyn rusqlite::types::ToSql],
) -> Result<Option<AccountRow>> {
    let mut stmt = conn.prepare(sql)?;
    let row = stmt.query_row(params, account_row).optional()?;
    Ok(row)
}

fn query_messages(conn: &Connection, posted_by: Option<i64>) -> Result<Vec<MessageRow>> {
    let rows = match posted_by {
        Some(author) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message WHERE posted_by = ?1 ORDER BY message_id"
            ))?;
            stmt.query_map([author], message_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {MESSAGE_COLUMNS} FROM message ORDER BY message_id"
            ))?;
            stmt.query_map([], message_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_account() -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let account = db
            .save_account(NewAccount {
                username: "author".into(),
                password: "password".into(),
            })
            .unwrap();
        (db, account.account_id)
    }

    fn new_message(posted_by: i64, text: &str) -> NewMessage {
        NewMessage {
            posted_by,
            message_text: text.into(),
        }
    }

    #[test]
    fn account_ids_are_assigned() {
        let db = Database::open_in_memory().unwrap();
        let first = db
            .save_account(NewAccount {
                username: "a".into(),
                password: "pass".into(),
            })
            .unwrap();
        let second = db
            .save_account(NewAccount {
                username: "b".into(),
                password: "pass".into(),
            })
            .unwrap();
        assert_eq!(first.account_id, 1);
        assert_eq!(second.account_id, 2);
    }

    #[test]
    fn duplicate_username_violates_constraint() {
        let (db, _) = db_with_account();
        let result = db.save_account(NewAccount {
            username: "author".into(),
            password: "other".into(),
        });
        assert!(result.is_err());
    }

    #[test]
    fn account_lookups() {
        let (db, id) = db_with_account();

        let found = db.find_by_username("author").unwrap().unwrap();
        assert_eq!(found.account_id, id);
        assert!(db.find_by_username("Author").unwrap().is_none());

        assert!(
            db.find_by_username_and_password("author", "password")
                .unwrap()
                .is_some()
        );
        assert!(
            db.find_by_username_and_password("author", "wrong")
                .unwrap()
                .is_none()
        );

        assert!(db.account_exists(id).unwrap());
        assert!(!db.account_exists(id + 1).unwrap());
    }

    #[test]
    fn message_lifecycle() {
        let (db, author) = db_with_account();

        let mut message = db.insert_message(new_message(author, "hello")).unwrap();
        assert_eq!(db.count_messages().unwrap(), 1);
        assert_eq!(db.find_message(message.message_id).unwrap(), Some(message.clone()));

        message.message_text = "edited".into();
        db.update_message(&message).unwrap();
        assert_eq!(
            db.find_message(message.message_id).unwrap().unwrap().message_text,
            "edited"
        );

        db.delete_message(&message).unwrap();
        assert_eq!(db.count_messages().unwrap(), 0);
        assert!(db.find_message(message.message_id).unwrap().is_none());
    }

    #[test]
    fn update_missing_message_fails() {
        let (db, author) = db_with_account();
        let ghost = Message {
            message_id: 42,
            posted_by: author,
            message_text: "ghost".into(),
        };

        let err = db.update_message(&ghost).unwrap_err();
        assert_eq!(err.to_string(), "Message not found: 42");
        assert!(db.find_message(42).unwrap().is_none());
    }

    #[test]
    fn delete_missing_message_is_noop() {
        let (db, author) = db_with_account();
        db.insert_message(new_message(author, "stay")).unwrap();
        let ghost = Message {
            message_id: 42,
            posted_by: author,
            message_text: "ghost".into(),
        };

        db.delete_message(&ghost).unwrap();
        assert_eq!(db.count_messages().unwrap(), 1);
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let (db, author) = db_with_account();
        let first = db.insert_message(new_message(author, "one")).unwrap();
        db.delete_message(&first).unwrap();

        let second = db.insert_message(new_message(author, "two")).unwrap();
        assert!(second.message_id > first.message_id);
    }

    #[test]
    fn listing_is_ordered_and_filtered() {
        let (db, author) = db_with_account();
        let a = db.insert_message(new_message(author, "a")).unwrap();
        let b = db.insert_message(new_message(author + 1, "b")).unwrap();
        let c = db.insert_message(new_message(author, "c")).unwrap();

        assert_eq!(db.all_messages().unwrap(), vec![a.clone(), b, c.clone()]);
        assert_eq!(db.messages_by_author(author).unwrap(), vec![a, c]);
        assert!(db.messages_by_author(999).unwrap().is_empty());
    }

    #[test]
    fn empty_store_lists_nothing() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.all_messages().unwrap().is_empty());
        assert_eq!(db.count_messages().unwrap(), 0);
    }
}
