use chirp_types::{Account, Credentials, NewAccount};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::store::AccountStore;

const MIN_PASSWORD_LEN: usize = 4;

/// Registration and login against an account store.
pub struct AccountDirectory<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: AccountStore + ?Sized> AccountDirectory<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// A taken username is rejected first. After that, the candidate is
    /// refused only when the username is blank AND the password is too
    /// short; either condition on its own still registers.
    ///
    /// The lookup and the insert are not wrapped in a transaction, so two
    /// concurrent registrations of the same name can race.
    pub fn register(&self, candidate: NewAccount) -> Result<Account> {
        if self.store.find_by_username(&candidate.username)?.is_some() {
            warn!("Registration rejected: username '{}' taken", candidate.username);
            return Err(CoreError::DuplicateUsername);
        }

        if candidate.username.trim().is_empty()
            && candidate.password.chars().count() < MIN_PASSWORD_LEN
        {
            warn!("Registration rejected: blank username and short password");
            return Err(CoreError::InvalidInput("blank username and short password"));
        }

        let account = self.store.save_account(candidate)?;
        debug!("Registered account {} ({})", account.account_id, account.username);
        Ok(account)
    }

    /// Look up the account matching both username and password exactly.
    pub fn verify(&self, credentials: &Credentials) -> Result<Account> {
        self.store
            .find_by_username_and_password(&credentials.username, &credentials.password)?
            .ok_or(CoreError::InvalidCredentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn candidate(username: &str, password: &str) -> NewAccount {
        NewAccount {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn register_assigns_id() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let account = accounts.register(candidate("alice", "hunter2")).unwrap();
        assert_eq!(account.username, "alice");
        assert_eq!(account.password, "hunter2");
        assert!(account.account_id > 0);
    }

    #[test]
    fn duplicate_username_rejected() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        accounts.register(candidate("alice", "hunter2")).unwrap();
        let err = accounts.register(candidate("alice", "different")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateUsername));
    }

    #[test]
    fn blank_username_and_short_password_rejected() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let err = accounts.register(candidate("", "ab")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
        assert!(store.find_by_username("").unwrap().is_none());
    }

    #[test]
    fn blank_username_alone_is_accepted() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let account = accounts.register(candidate("", "abcdef")).unwrap();
        assert_eq!(account.username, "");
    }

    #[test]
    fn short_password_alone_is_accepted() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let account = accounts.register(candidate("bob", "ab")).unwrap();
        assert_eq!(account.password, "ab");
    }

    #[test]
    fn whitespace_username_counts_as_blank() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let err = accounts.register(candidate("   ", "abc")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn verify_returns_stored_account() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let registered = accounts.register(candidate("alice", "hunter2")).unwrap();
        let verified = accounts
            .verify(&Credentials {
                username: "alice".into(),
                password: "hunter2".into(),
            })
            .unwrap();
        assert_eq!(verified, registered);
    }

    #[test]
    fn verify_wrong_password_fails() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        accounts.register(candidate("alice", "hunter2")).unwrap();
        let err = accounts
            .verify(&Credentials {
                username: "alice".into(),
                password: "hunter3".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
    }

    #[test]
    fn verify_unknown_user_fails() {
        let store = MemoryStore::new();
        let accounts = AccountDirectory::new(&store);

        let err = accounts
            .verify(&Credentials {
                username: "nobody".into(),
                password: "whatever".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidCredentials));
    }
}
